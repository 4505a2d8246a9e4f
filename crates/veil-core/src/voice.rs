//! Voice capture bridge
//!
//! Speech recognition lives in the host. The core only asks whether it is
//! available and asks it to start; transcripts and failures come back
//! through `Browser::on_voice_result`, `on_voice_error` and `on_voice_end`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Voice capture failed to start: {0}")]
    StartFailed(String),
}

pub trait VoiceCapture: Send {
    /// Whether the host can capture speech at all
    fn is_supported(&self) -> bool;

    /// Begin listening. Results arrive later through the browser callbacks.
    fn start(&mut self, locale: &str) -> Result<(), VoiceError>;
}

/// Capture for hosts without speech recognition
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVoiceCapture;

impl VoiceCapture for NoVoiceCapture {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self, _locale: &str) -> Result<(), VoiceError> {
        Err(VoiceError::StartFailed("no speech recognition available".to_string()))
    }
}
