use parking_lot::RwLock;
use shared_types::ClockSyncStatus;

use crate::ports::ClockSyncSource;

/// Reports whatever status was last set. Stands in for a PTP/NTP monitor.
#[derive(Debug, Default)]
pub struct StaticClockSource {
    status: RwLock<ClockSyncStatus>,
}

impl StaticClockSource {
    pub fn new(status: ClockSyncStatus) -> Self {
        Self {
            status: RwLock::new(status),
        }
    }

    pub fn set(&self, status: ClockSyncStatus) {
        *self.status.write() = status;
    }
}

impl ClockSyncSource for StaticClockSource {
    fn status(&self) -> ClockSyncStatus {
        *self.status.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_updates() {
        let clock = StaticClockSource::new(ClockSyncStatus::PtpLocked);
        assert_eq!(clock.status(), ClockSyncStatus::PtpLocked);
        clock.set(ClockSyncStatus::Unreliable);
        assert_eq!(clock.status(), ClockSyncStatus::Unreliable);
        assert_eq!(StaticClockSource::default().status(), ClockSyncStatus::BestEffort);
    }
}
