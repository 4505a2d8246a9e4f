//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use veil_navigation::{default_corpus, DEFAULT_SEARCH_ENGINE, FALLBACK_TITLE};
use veil_navigation::{MAX_SUGGESTIONS, MIN_QUERY_CHARS};
use veil_privacy::SessionFlags;
use veil_tabs::{BLANK_URL, NEW_TAB_TITLE};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search engine URL template
    pub search_engine: String,
    /// Location of a fresh tab
    pub new_tab_url: String,
    /// Title of a fresh tab
    pub new_tab_title: String,
    /// Title used when a destination has no readable host
    pub fallback_title: String,
    /// Simulated page load time before privacy counters update
    pub page_load_delay_ms: u64,
    /// Pause between a voice transcript arriving and navigating to it
    pub voice_submit_delay_ms: u64,
    /// Locale handed to the voice capture
    pub voice_locale: String,
    /// Corpus the address bar suggestions are drawn from
    pub suggestions: Vec<String>,
    pub max_suggestions: usize,
    /// Input must be longer than this before suggestions appear
    pub min_query_chars: usize,
    /// Shortcut destinations on the new-tab page
    pub quick_links: Vec<String>,
    /// Session flags at startup
    pub flags: SessionFlags,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.new_tab_url.trim().is_empty() {
            return Err(CoreError::Config("new_tab_url cannot be empty".to_string()));
        }
        if self.max_suggestions == 0 || self.max_suggestions > MAX_SUGGESTIONS {
            return Err(CoreError::Config(format!(
                "max_suggestions must be between 1 and {}, got {}",
                MAX_SUGGESTIONS, self.max_suggestions
            )));
        }
        Ok(())
    }

    pub fn page_load_delay(&self) -> Duration {
        Duration::from_millis(self.page_load_delay_ms)
    }

    pub fn voice_submit_delay(&self) -> Duration {
        Duration::from_millis(self.voice_submit_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_engine: DEFAULT_SEARCH_ENGINE.to_string(),
            new_tab_url: BLANK_URL.to_string(),
            new_tab_title: NEW_TAB_TITLE.to_string(),
            fallback_title: FALLBACK_TITLE.to_string(),
            page_load_delay_ms: 1000,
            voice_submit_delay_ms: 500,
            voice_locale: "ru-RU".to_string(),
            suggestions: default_corpus(),
            max_suggestions: MAX_SUGGESTIONS,
            min_query_chars: MIN_QUERY_CHARS,
            quick_links: vec![
                "rocket.com".to_string(),
                "youtube.com".to_string(),
                "github.com".to_string(),
            ],
            flags: SessionFlags::default(),
        }
    }
}
