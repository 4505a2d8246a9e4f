//! Simulated blocking on page load
//!
//! | Counter        | Added per load | Gate             |
//! |----------------|----------------|------------------|
//! | Trackers       | 1..=5          | Tracker blocking |
//! | Fingerprinting | 0..=2          | Tracker blocking |
//! | Ads            | 2..=9          | Ad blocking      |
//! | Cookies        | 1..=4          | Always           |

use rand::Rng;
use std::ops::RangeInclusive;

use crate::counters::{IncrementReport, PrivacyCounters};
use crate::flags::SessionFlags;

pub const TRACKERS_RANGE: RangeInclusive<u64> = 1..=5;
pub const FINGERPRINTING_RANGE: RangeInclusive<u64> = 0..=2;
pub const ADS_RANGE: RangeInclusive<u64> = 2..=9;
pub const COOKIES_RANGE: RangeInclusive<u64> = 1..=4;

/// Where increment amounts come from
pub trait IncrementSource {
    /// Draw a value uniformly from `range`
    fn draw(&mut self, range: RangeInclusive<u64>) -> u64;
}

impl<R: Rng> IncrementSource for R {
    fn draw(&mut self, range: RangeInclusive<u64>) -> u64 {
        self.gen_range(range)
    }
}

/// Always draws one end of the requested range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinnedSource {
    Low,
    High,
}

impl IncrementSource for PinnedSource {
    fn draw(&mut self, range: RangeInclusive<u64>) -> u64 {
        match self {
            PinnedSource::Low => *range.start(),
            PinnedSource::High => *range.end(),
        }
    }
}

pub struct PrivacySimulator<S> {
    source: S,
}

impl<S: IncrementSource> PrivacySimulator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Draw the increments for one finished page load
    pub fn roll(&mut self, flags: &SessionFlags) -> IncrementReport {
        let mut report = IncrementReport::default();

        if flags.tracker_blocking() {
            report.trackers = self.source.draw(TRACKERS_RANGE);
            report.fingerprinting = self.source.draw(FINGERPRINTING_RANGE);
        }

        if flags.ad_blocking() {
            report.ads = self.source.draw(ADS_RANGE);
        }

        report.cookies = self.source.draw(COOKIES_RANGE);

        report
    }

    /// Roll the increments and add them to `counters`
    pub fn on_page_loaded(
        &mut self,
        flags: &SessionFlags,
        counters: &mut PrivacyCounters,
    ) -> IncrementReport {
        let report = self.roll(flags);
        counters.apply(&report);

        tracing::debug!(
            trackers = report.trackers,
            ads = report.ads,
            cookies = report.cookies,
            fingerprinting = report.fingerprinting,
            "Simulated blocking for page load"
        );

        report
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
