//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tab error: {0}")]
    Tab(#[from] veil_tabs::TabError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] veil_navigation::NavigationError),

    #[error("Flag error: {0}")]
    Flag(#[from] veil_privacy::FlagError),

    #[error("Voice search is not supported in this environment")]
    VoiceUnsupported,

    #[error("Voice error: {0}")]
    Voice(#[from] crate::voice::VoiceError),

    #[error("Clearing data was not requested or the request expired")]
    ClearNotRequested,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
