//! Tab data structure
//!
//! A tab shows a title, the location it points at, and whether it was
//! opened in incognito mode. Ids are handed out by the registry in
//! creation order and never reused.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TabError;

/// Location of a tab that has not navigated anywhere yet
pub const BLANK_URL: &str = "about:blank";

/// Title shown for a tab that has not navigated anywhere yet
pub const NEW_TAB_TITLE: &str = "New Tab";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TabId {
    type Err = TabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(TabId)
            .map_err(|_| TabError::InvalidId(s.to_string()))
    }
}

/// Placeholder location and title given to freshly opened tabs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTabTemplate {
    pub url: String,
    pub title: String,
}

impl Default for NewTabTemplate {
    fn default() -> Self {
        Self {
            url: BLANK_URL.to_string(),
            title: NEW_TAB_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    /// Unique identifier, monotonic in creation order
    pub id: TabId,
    /// Display title
    pub title: String,
    /// Current location
    pub url: String,
    /// Whether this is the foreground tab
    pub is_active: bool,
    /// Fixed at creation from the session's incognito mode
    pub is_incognito: bool,
    /// When the tab was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Tab {
    pub(crate) fn new(id: TabId, template: &NewTabTemplate, incognito: bool) -> Self {
        let now = Utc::now();

        Self {
            id,
            title: template.title.clone(),
            url: template.url.clone(),
            is_active: false,
            is_incognito: incognito,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn activate(&mut self) {
        if !self.is_active {
            tracing::debug!(tab_id = %self.id, "Tab activated");
            self.is_active = true;
            self.updated_at = Utc::now();
        }
    }

    pub(crate) fn blur(&mut self) {
        if self.is_active {
            tracing::debug!(tab_id = %self.id, "Tab moved to background");
            self.is_active = false;
            self.updated_at = Utc::now();
        }
    }

    /// Point the tab at a new location
    pub(crate) fn navigate(&mut self, url: String, title: String) {
        self.url = url;
        self.title = title;
        self.updated_at = Utc::now();
    }

    /// True while the tab still shows the new-tab page
    pub fn is_blank(&self) -> bool {
        self.url == BLANK_URL
    }

    /// Get display title (with fallback to URL)
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}
