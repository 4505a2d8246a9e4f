//! Voice search commands

use super::CommandResult;
use crate::state::AppState;

pub fn start_voice(state: &AppState) -> CommandResult<()> {
    CommandResult::from_result(state.with_browser_mut(|browser| browser.start_voice_search()))
}

/// Deliver a transcript as the host's recognizer would
pub fn voice_result(state: &AppState, transcript: &str) -> CommandResult<String> {
    CommandResult::from_result(state.with_browser_mut(|browser| {
        browser.on_voice_result(transcript);
        Ok(browser.address_text().to_string())
    }))
}

pub fn voice_error(state: &AppState) -> CommandResult<()> {
    CommandResult::from_result(state.with_browser_mut(|browser| {
        browser.on_voice_error();
        Ok(())
    }))
}

pub fn voice_end(state: &AppState) -> CommandResult<()> {
    CommandResult::from_result(state.with_browser_mut(|browser| {
        browser.on_voice_end();
        Ok(())
    }))
}
