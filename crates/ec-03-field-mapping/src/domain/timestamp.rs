//! # Timestamps
//!
//! Wire timestamps are nanoseconds since midnight. Turning them into
//! absolute time needs the trading date, supplied by configuration. Midnight
//! of the trading date is taken in UTC.

use chrono::{NaiveDate, NaiveTime};

use super::errors::MappingError;

/// Nanoseconds in one day; wire values must be strictly below this.
pub const NANOS_PER_DAY: u64 = 86_400_000_000_000;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Absolute event time in both document forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTimestamp {
    /// `YYYY-MM-DDTHH:MM:SS.nnnnnnnnnZ`
    pub iso: String,
    /// Nanoseconds since the Unix epoch.
    pub epoch_ns: u64,
}

pub fn decode_timestamp(nanos: u64, trading_date: NaiveDate) -> Result<EventTimestamp, MappingError> {
    if nanos >= NANOS_PER_DAY {
        return Err(MappingError::TimestampOutOfRange { nanos });
    }
    let seconds = (nanos / NANOS_PER_SECOND) as u32;
    let fraction = (nanos % NANOS_PER_SECOND) as u32;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, fraction)
        .ok_or(MappingError::TimestampOutOfRange { nanos })?;
    let moment = trading_date.and_time(time).and_utc();

    let epoch_ns = moment
        .timestamp_nanos_opt()
        .and_then(|ns| u64::try_from(ns).ok())
        .ok_or(MappingError::TimestampOutOfRange { nanos })?;

    Ok(EventTimestamp {
        iso: moment.format("%Y-%m-%dT%H:%M:%S%.9fZ").to_string(),
        epoch_ns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
    }

    #[test]
    fn test_market_open() {
        let ts = decode_timestamp(34_200_000_000_001, date()).unwrap();
        assert_eq!(ts.iso, "2025-01-02T09:30:00.000000001Z");
        assert_eq!(ts.epoch_ns, 1_735_810_200_000_000_001);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(
            decode_timestamp(0, date()).unwrap().iso,
            "2025-01-02T00:00:00.000000000Z"
        );
        assert_eq!(
            decode_timestamp(NANOS_PER_DAY - 1, date()).unwrap().iso,
            "2025-01-02T23:59:59.999999999Z"
        );
        assert_eq!(
            decode_timestamp(NANOS_PER_DAY, date()),
            Err(MappingError::TimestampOutOfRange {
                nanos: NANOS_PER_DAY
            })
        );
    }

    #[test]
    fn test_pre_epoch_date_rejected() {
        let date = NaiveDate::from_ymd_opt(1969, 12, 31).unwrap();
        assert!(decode_timestamp(0, date).is_err());
    }

    proptest! {
        #[test]
        fn fractional_part_is_nanos_mod_billion(
            t in 0u64..NANOS_PER_DAY,
            day in 0u32..20_000,
        ) {
            let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
                + chrono::Days::new(u64::from(day));
            let ts = decode_timestamp(t, date).unwrap();

            prop_assert_eq!(ts.iso.len(), 30);
            prop_assert!(ts.iso.ends_with('Z'));
            let fraction = &ts.iso[20..29];
            let expected = format!("{:09}", t % 1_000_000_000);
            prop_assert_eq!(fraction, expected.as_str());
            prop_assert!(chrono::DateTime::parse_from_rfc3339(&ts.iso).is_ok());
        }
    }
}
