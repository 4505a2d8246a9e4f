//! Privacy toggles and clear-data commands

use serde::{Deserialize, Serialize};

use veil_core::{ModeFlag, PrivacyCounters};

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct FlagInfo {
    pub flag: ModeFlag,
    pub label: String,
    pub enabled: bool,
}

pub fn toggle_flag(state: &AppState, flag: &str) -> CommandResult<FlagInfo> {
    CommandResult::from_result(state.with_browser_mut(|browser| {
        let flag: ModeFlag = flag.parse()?;
        let enabled = browser.toggle_flag(flag);
        Ok(FlagInfo {
            flag,
            label: flag.label().to_string(),
            enabled,
        })
    }))
}

pub fn get_flags(state: &AppState) -> CommandResult<Vec<FlagInfo>> {
    CommandResult::from_result(state.with_browser(|browser| {
        Ok(ModeFlag::ALL
            .iter()
            .map(|flag| FlagInfo {
                flag: *flag,
                label: flag.label().to_string(),
                enabled: browser.flags().get(*flag),
            })
            .collect())
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProtectionSetting {
    pub label: String,
    pub enabled: bool,
}

/// Protection settings as listed in the privacy dialog
pub fn get_privacy_summary(state: &AppState) -> CommandResult<Vec<ProtectionSetting>> {
    CommandResult::from_result(state.with_browser(|browser| {
        Ok(browser
            .flags()
            .summary()
            .into_iter()
            .map(|(label, enabled)| ProtectionSetting {
                label: label.to_string(),
                enabled,
            })
            .collect())
    }))
}

pub fn get_counters(state: &AppState) -> CommandResult<PrivacyCounters> {
    CommandResult::from_result(state.with_browser(|browser| Ok(*browser.counters())))
}

/// First half of clearing data; the user answers with `confirm` or `cancel`
pub fn request_clear(state: &AppState) -> CommandResult<&'static str> {
    CommandResult::from_result(state.with_browser_mut(|browser| {
        let token = browser.request_clear_data();
        state.remember_clear_token(token);
        Ok("Clear all browsing data? Answer `confirm` or `cancel`.")
    }))
}

pub fn confirm_clear(state: &AppState) -> CommandResult<PrivacyCounters> {
    let Some(token) = state.take_clear_token() else {
        return CommandResult::from_result(Err(veil_core::CoreError::ClearNotRequested));
    };

    CommandResult::from_result(state.with_browser_mut(|browser| {
        browser.confirm_clear_data(token)?;
        Ok(*browser.counters())
    }))
}

pub fn cancel_clear(state: &AppState) -> CommandResult<()> {
    state.take_clear_token();
    CommandResult::from_result(state.with_browser_mut(|browser| {
        browser.cancel_clear_data();
        Ok(())
    }))
}
