//! Application state management
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

use veil_core::{Browser, ClearDataToken, Config, Result, VoiceCapture, VoiceError};

/// Voice capture fed by `say` commands on stdin
#[derive(Debug, Clone, Copy, Default)]
pub struct LineVoice;

impl VoiceCapture for LineVoice {
    fn is_supported(&self) -> bool {
        true
    }

    fn start(&mut self, locale: &str) -> std::result::Result<(), VoiceError> {
        tracing::info!(locale = %locale, "Dictation started, type `say <text>`");
        Ok(())
    }
}

/// Shared application state wrapper
pub struct AppState {
    browser: Arc<RwLock<Browser>>,
    pending_clear: Arc<RwLock<Option<ClearDataToken>>>,
}

impl AppState {
    pub fn new(config: Config, voice_enabled: bool) -> Result<Self> {
        let mut browser = Browser::new(config)?;
        if voice_enabled {
            browser = browser.with_voice(LineVoice);
        }

        Ok(Self {
            browser: Arc::new(RwLock::new(browser)),
            pending_clear: Arc::new(RwLock::new(None)),
        })
    }

    pub fn with_browser<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Browser) -> Result<T>,
    {
        let guard = self.browser.read();
        f(&guard)
    }

    pub fn with_browser_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Browser) -> Result<T>,
    {
        let mut guard = self.browser.write();
        f(&mut guard)
    }

    /// Advance the browser clock by wall time
    pub fn advance(&self, elapsed: Duration) -> usize {
        self.browser.write().advance(elapsed)
    }

    pub fn remember_clear_token(&self, token: ClearDataToken) {
        *self.pending_clear.write() = Some(token);
    }

    pub fn take_clear_token(&self) -> Option<ClearDataToken> {
        self.pending_clear.write().take()
    }
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            browser: Arc::clone(&self.browser),
            pending_clear: Arc::clone(&self.pending_clear),
        }
    }
}
