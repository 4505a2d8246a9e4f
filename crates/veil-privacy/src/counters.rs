//! Blocked-content counters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyCounters {
    pub trackers_blocked: u64,
    pub ads_blocked: u64,
    pub cookies_blocked: u64,
    pub fingerprinting_blocked: u64,
}

/// Amounts added to the counters by one page load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementReport {
    pub trackers: u64,
    pub ads: u64,
    pub cookies: u64,
    pub fingerprinting: u64,
}

impl PrivacyCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trackers plus ads, shown in the tab strip badge
    pub fn total_blocked(&self) -> u64 {
        self.trackers_blocked.saturating_add(self.ads_blocked)
    }

    pub fn apply(&mut self, report: &IncrementReport) {
        self.trackers_blocked = self.trackers_blocked.saturating_add(report.trackers);
        self.ads_blocked = self.ads_blocked.saturating_add(report.ads);
        self.cookies_blocked = self.cookies_blocked.saturating_add(report.cookies);
        self.fingerprinting_blocked = self
            .fingerprinting_blocked
            .saturating_add(report.fingerprinting);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_total() {
        let mut counters = PrivacyCounters::new();
        counters.apply(&IncrementReport {
            trackers: 3,
            ads: 4,
            cookies: 1,
            fingerprinting: 2,
        });
        counters.apply(&IncrementReport {
            trackers: 1,
            ads: 0,
            cookies: 2,
            fingerprinting: 0,
        });

        assert_eq!(counters.trackers_blocked, 4);
        assert_eq!(counters.ads_blocked, 4);
        assert_eq!(counters.cookies_blocked, 3);
        assert_eq!(counters.fingerprinting_blocked, 2);
        assert_eq!(counters.total_blocked(), 8);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut counters = PrivacyCounters {
            trackers_blocked: 10,
            ads_blocked: 20,
            cookies_blocked: 30,
            fingerprinting_blocked: u64::MAX,
        };
        counters.reset();
        assert!(counters.is_zero());
        assert_eq!(counters, PrivacyCounters::default());
    }

    #[test]
    fn test_apply_saturates() {
        let mut counters = PrivacyCounters {
            cookies_blocked: u64::MAX,
            ..Default::default()
        };
        counters.apply(&IncrementReport {
            cookies: 5,
            ..Default::default()
        });
        assert_eq!(counters.cookies_blocked, u64::MAX);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(PrivacyCounters::new()).unwrap();
        assert_eq!(json["trackers_blocked"], 0);
        assert_eq!(json["fingerprinting_blocked"], 0);
    }
}
