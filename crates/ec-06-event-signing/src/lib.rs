//! # Event Signing Subsystem (ec-06)
//!
//! Ed25519 signatures computed over the 32-byte `EventHash`, never over the
//! canonical payload: checking a signature needs only the hash.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): sign/verify over event hashes
//! - **Ports Layer** (`ports/`): [`KeyProvider`], the key-holding collaborator
//! - **Adapters** (`adapters/`): [`LocalKeyProvider`] holding a key pair in memory
//! - **Service Layer** (`service.rs`): [`EventSigner`], sealed → signed
//!
//! Key generation and storage are the key provider's business; this crate
//! only calls `sign` and reads the public key.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::LocalKeyProvider;
pub use domain::{sign_event_hash, verify_event_hash, verify_event_signature, SigningError};
pub use ports::KeyProvider;
pub use service::EventSigner;
