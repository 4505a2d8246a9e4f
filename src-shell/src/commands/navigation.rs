//! Navigation and address bar commands

use veil_core::Destination;

use super::CommandResult;
use crate::state::AppState;

/// Replace the address bar text; returns the new suggestions
pub fn type_text(state: &AppState, text: &str) -> CommandResult<Vec<String>> {
    CommandResult::from_result(state.with_browser_mut(|browser| {
        browser.set_address_text(text);
        Ok(browser.suggestions().to_vec())
    }))
}

/// Submit the address bar, optionally typing `text` first
pub fn go(state: &AppState, text: &str) -> CommandResult<Option<Destination>> {
    CommandResult::from_result(state.with_browser_mut(|browser| {
        if !text.is_empty() {
            browser.set_address_text(text);
        }
        Ok(browser.submit_address())
    }))
}

pub fn pick_suggestion(state: &AppState, index: &str) -> CommandResult<Option<Destination>> {
    match index.parse::<usize>() {
        Ok(index) => CommandResult::from_result(
            state.with_browser_mut(|browser| Ok(browser.choose_suggestion(index))),
        ),
        Err(_) => CommandResult::err(format!("Expected a suggestion index, got: {:?}", index)),
    }
}

pub fn quick_link(state: &AppState, index: &str) -> CommandResult<Option<Destination>> {
    match index.parse::<usize>() {
        Ok(index) => CommandResult::from_result(
            state.with_browser_mut(|browser| Ok(browser.open_quick_link(index))),
        ),
        Err(_) => CommandResult::err(format!("Expected a quick link index, got: {:?}", index)),
    }
}
