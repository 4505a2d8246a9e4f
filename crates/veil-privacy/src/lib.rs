//! Veil Privacy
//!
//! Session-wide protection toggles and the simulated counters shown on the
//! new-tab dashboard:
//! - Tracker blocking (also counts fingerprinting attempts)
//! - Ad blocking
//! - Cookie blocking (always on)
//!
//! Nothing is actually intercepted. Each finished page load adds a random
//! amount to every enabled counter.

mod counters;
mod flags;
mod simulator;

pub use counters::{IncrementReport, PrivacyCounters};
pub use flags::{FlagError, ModeFlag, SessionFlags};
pub use simulator::{
    IncrementSource, PinnedSource, PrivacySimulator, ADS_RANGE, COOKIES_RANGE,
    FINGERPRINTING_RANGE, TRACKERS_RANGE,
};
