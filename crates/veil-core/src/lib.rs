//! Veil Core
//!
//! Central coordination layer for the Veil browser chrome.
//! One `Browser` owns all session state; every mutation goes through it.

mod browser;
mod config;
mod error;
mod scheduler;
mod voice;

pub use browser::{Browser, BrowserSnapshot, ClearDataToken, ContentView, Effect, TaskKey};
pub use config::Config;
pub use error::CoreError;
pub use scheduler::Scheduler;
pub use voice::{NoVoiceCapture, VoiceCapture, VoiceError};

// Re-export core components
pub use veil_navigation::{
    derive_title, suggest, Destination, DestinationKind, InputResolver, NavigationError,
    Suggester,
};
pub use veil_privacy::{
    FlagError, IncrementReport, IncrementSource, ModeFlag, PinnedSource, PrivacyCounters,
    PrivacySimulator, SessionFlags,
};
pub use veil_tabs::{CloseOutcome, NewTabTemplate, Tab, TabError, TabId, TabRegistry};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
