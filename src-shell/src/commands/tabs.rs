//! Tab management commands
use serde::{Deserialize, Serialize};

use veil_core::{Browser, CloseOutcome, Tab, TabId};

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    pub url: String,
    pub title: String,
    pub is_active: bool,
    pub is_incognito: bool,
    pub is_loading: bool,
}

impl TabInfo {
    fn from_tab(browser: &Browser, tab: &Tab) -> Self {
        Self {
            id: tab.id,
            url: tab.url.clone(),
            title: tab.display_title().to_string(),
            is_active: tab.is_active,
            is_incognito: tab.is_incognito,
            is_loading: browser.is_loading(tab.id),
        }
    }
}

pub fn new_tab(state: &AppState) -> CommandResult<TabInfo> {
    CommandResult::from_result(state.with_browser_mut(|browser| {
        let id = browser.new_tab();
        let tab = browser.tab(id)?;
        Ok(TabInfo::from_tab(browser, tab))
    }))
}

pub fn close_tab(state: &AppState, tab_id: &str) -> CommandResult<&'static str> {
    CommandResult::from_result(state.with_browser_mut(|browser| {
        let id: TabId = tab_id.parse()?;
        Ok(match browser.close_tab(id) {
            CloseOutcome::Closed { .. } => "closed",
            CloseOutcome::LastTab => "last_tab",
            CloseOutcome::NotFound => "not_found",
        })
    }))
}

pub fn switch_tab(state: &AppState, tab_id: &str) -> CommandResult<bool> {
    CommandResult::from_result(state.with_browser_mut(|browser| {
        let id: TabId = tab_id.parse()?;
        Ok(browser.switch_tab(id))
    }))
}

pub fn get_tabs(state: &AppState) -> CommandResult<Vec<TabInfo>> {
    CommandResult::from_result(state.with_browser(|browser| {
        Ok(browser
            .tabs()
            .iter()
            .map(|tab| TabInfo::from_tab(browser, tab))
            .collect())
    }))
}
