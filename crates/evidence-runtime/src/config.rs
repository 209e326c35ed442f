//! # Runtime Configuration
//!
//! Session-level settings for the pipeline. Defaults suit a development
//! session; production deployments set the `EC_*` environment variables.
//!
//! ## Environment Variables
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `EC_QUEUE_CAPACITY` | `queue_capacity` | 1024 |
//! | `EC_CHUNK_SIZE` | `chunk_size` | 256 |
//! | `EC_BATCH_MAX_EVENTS` | `batch.max_events` | 1000 |
//! | `EC_BATCH_MAX_AGE_MS` | `batch.max_age` | 1000 ms |
//! | `EC_TRADING_DATE` | `trading_date` | today (UTC) |
//! | `EC_SESSION_ID` | `session_id` | random v4 |
//! | `EC_ALGORITHM_NAME` / `EC_ALGORITHM_VERSION` | governance | empty |
//! | `EC_FIRM_ID` | governance | empty |
//! | `EC_POLICY_ID` / `EC_ISSUER` | policy | empty |
//! | `EC_CONFORMANCE_TIER` | policy | PLATINUM |

use std::str::FromStr;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use ec_03_field_mapping::MappingContext;
use ec_07_merkle_batching::BatchPolicy;
use serde::{Deserialize, Serialize};
use shared_types::{ConformanceTier, GovernanceSection, PolicyIdentification};
use uuid::Uuid;

use crate::errors::ConfigError;

pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;
pub const DEFAULT_CHUNK_SIZE: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Bound of the queue in front of the chain stage.
    pub queue_capacity: usize,
    /// Raw messages decoded and mapped per parallel step.
    pub chunk_size: usize,
    pub batch: BatchPolicy,
    /// Date that wire timestamps (nanoseconds since midnight) refer to.
    pub trading_date: NaiveDate,
    /// Namespace for the session's event IDs.
    pub session_id: Uuid,
    pub algorithm_name: String,
    pub algorithm_version: String,
    pub firm_id: String,
    pub policy_id: String,
    pub conformance_tier: ConformanceTier,
    pub issuer: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            chunk_size: DEFAULT_CHUNK_SIZE,
            batch: BatchPolicy::default(),
            trading_date: Utc::now().date_naive(),
            session_id: Uuid::new_v4(),
            algorithm_name: String::new(),
            algorithm_version: String::new(),
            firm_id: String::new(),
            policy_id: String::new(),
            conformance_tier: ConformanceTier::default(),
            issuer: String::new(),
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by the `EC_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("EC_QUEUE_CAPACITY") {
            config.queue_capacity = parse("EC_QUEUE_CAPACITY", &value)?;
        }
        if let Some(value) = lookup("EC_CHUNK_SIZE") {
            config.chunk_size = parse("EC_CHUNK_SIZE", &value)?;
        }
        if let Some(value) = lookup("EC_BATCH_MAX_EVENTS") {
            config.batch.max_events = parse("EC_BATCH_MAX_EVENTS", &value)?;
        }
        if let Some(value) = lookup("EC_BATCH_MAX_AGE_MS") {
            config.batch.max_age = Duration::from_millis(parse("EC_BATCH_MAX_AGE_MS", &value)?);
        }
        if let Some(value) = lookup("EC_TRADING_DATE") {
            config.trading_date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map_err(|e| ConfigError::invalid("EC_TRADING_DATE", &value, e))?;
        }
        if let Some(value) = lookup("EC_SESSION_ID") {
            config.session_id = parse("EC_SESSION_ID", &value)?;
        }
        if let Some(value) = lookup("EC_CONFORMANCE_TIER") {
            config.conformance_tier = parse("EC_CONFORMANCE_TIER", &value)?;
        }

        // Free text
        if let Some(value) = lookup("EC_ALGORITHM_NAME") {
            config.algorithm_name = value;
        }
        if let Some(value) = lookup("EC_ALGORITHM_VERSION") {
            config.algorithm_version = value;
        }
        if let Some(value) = lookup("EC_FIRM_ID") {
            config.firm_id = value;
        }
        if let Some(value) = lookup("EC_POLICY_ID") {
            config.policy_id = value;
        }
        if let Some(value) = lookup("EC_ISSUER") {
            config.issuer = value;
        }

        Ok(config)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_capacity == 0 {
            return Err(ConfigError::Zero("queue_capacity"));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::Zero("chunk_size"));
        }
        if self.batch.max_events == 0 {
            return Err(ConfigError::Zero("batch.max_events"));
        }
        if self.batch.max_age.is_zero() {
            return Err(ConfigError::Zero("batch.max_age"));
        }
        Ok(())
    }

    pub fn governance(&self) -> GovernanceSection {
        GovernanceSection {
            algorithm_name: self.algorithm_name.clone(),
            algorithm_version: self.algorithm_version.clone(),
            firm_id: self.firm_id.clone(),
        }
    }

    pub fn policy(&self) -> PolicyIdentification {
        PolicyIdentification {
            policy_id: self.policy_id.clone(),
            conformance_tier: self.conformance_tier,
            issuer: self.issuer.clone(),
        }
    }

    /// Session inputs for the field mapper.
    pub fn mapping_context(&self) -> MappingContext {
        MappingContext::new(self.session_id, self.trading_date)
            .with_governance(self.governance())
            .with_policy(self.policy())
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::invalid(key, value, e))
}
