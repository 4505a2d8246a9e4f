//! Shell commands
//!
//! One command per input line; each produces one JSON `CommandResult`.
//! These bridge the host's input events to the browser core.

pub mod navigation;
pub mod privacy;
pub mod tabs;
pub mod voice;

use serde::Serialize;
use std::time::Duration;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    pub fn from_result(result: veil_core::Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// What the event loop should do after a line
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Skip,
    Quit,
}

pub fn dispatch(state: &AppState, line: &str) -> Reply {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Reply::Skip;
    }

    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    tracing::debug!(verb = %verb, arg = %arg, "Dispatching command");

    let output = match verb.to_lowercase().as_str() {
        "new" => render(tabs::new_tab(state)),
        "close" => render(tabs::close_tab(state, arg)),
        "switch" => render(tabs::switch_tab(state, arg)),
        "tabs" => render(tabs::get_tabs(state)),
        "type" => render(navigation::type_text(state, arg)),
        "go" => render(navigation::go(state, arg)),
        "pick" => render(navigation::pick_suggestion(state, arg)),
        "quick" => render(navigation::quick_link(state, arg)),
        "toggle" => render(privacy::toggle_flag(state, arg)),
        "flags" => render(privacy::get_flags(state)),
        "privacy" => render(privacy::get_privacy_summary(state)),
        "counters" => render(privacy::get_counters(state)),
        "clear" => render(privacy::request_clear(state)),
        "confirm" => render(privacy::confirm_clear(state)),
        "cancel" => render(privacy::cancel_clear(state)),
        "voice" => render(voice::start_voice(state)),
        "say" => render(voice::voice_result(state, arg)),
        "voice-error" => render(voice::voice_error(state)),
        "voice-end" => render(voice::voice_end(state)),
        "state" => render(get_state(state)),
        "wait" => render(wait(state, arg)),
        "quit" | "exit" => return Reply::Quit,
        other => render(CommandResult::<()>::err(format!("Unknown command: {}", other))),
    };

    Reply::Output(output)
}

fn render<T: Serialize>(result: CommandResult<T>) -> String {
    serde_json::to_string(&result).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"data":null,"error":"serialization failed: {}"}}"#,
            e
        )
    })
}

pub fn get_state(state: &AppState) -> CommandResult<veil_core::BrowserSnapshot> {
    CommandResult::from_result(state.with_browser(|browser| Ok(browser.snapshot())))
}

/// Fast-forward the browser clock without waiting
pub fn wait(state: &AppState, arg: &str) -> CommandResult<usize> {
    match arg.parse::<u64>() {
        Ok(ms) => CommandResult::ok(state.advance(Duration::from_millis(ms))),
        Err(_) => CommandResult::err(format!("Expected milliseconds, got: {:?}", arg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_core::Config;

    fn test_state() -> AppState {
        AppState::new(Config::default(), true).unwrap()
    }

    fn run(state: &AppState, line: &str) -> serde_json::Value {
        match dispatch(state, line) {
            Reply::Output(json) => serde_json::from_str(&json).unwrap(),
            other => panic!("expected output for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_skip_and_quit() {
        let state = test_state();
        assert_eq!(dispatch(&state, "   "), Reply::Skip);
        assert_eq!(dispatch(&state, "# comment"), Reply::Skip);
        assert_eq!(dispatch(&state, "quit"), Reply::Quit);
    }

    #[test]
    fn test_unknown_command() {
        let state = test_state();
        let out = run(&state, "fly away");
        assert_eq!(out["success"], false);
        assert_eq!(out["error"], "Unknown command: fly");
    }

    #[test]
    fn test_tab_lifecycle() {
        let state = test_state();
        let created = run(&state, "new");
        assert_eq!(created["data"]["id"], 2);
        assert_eq!(created["data"]["is_active"], true);

        let tabs = run(&state, "tabs");
        assert_eq!(tabs["data"].as_array().unwrap().len(), 2);

        assert_eq!(run(&state, "switch 1")["data"], true);
        assert_eq!(run(&state, "switch 99")["data"], false);

        assert_eq!(run(&state, "close 1")["data"], "closed");
        assert_eq!(run(&state, "close 2")["data"], "last_tab");
        assert_eq!(run(&state, "close x")["success"], false);
    }

    #[test]
    fn test_navigation_and_counters() {
        let state = test_state();
        let out = run(&state, "go github.com");
        assert_eq!(out["data"]["url"], "https://github.com");
        assert_eq!(out["data"]["title"], "Github");

        assert_eq!(run(&state, "wait 1000")["data"], 1);
        let counters = run(&state, "counters");
        assert!(counters["data"]["cookies_blocked"].as_u64().unwrap() >= 1);

        assert_eq!(run(&state, "type")["data"], serde_json::json!([]));
        assert_eq!(run(&state, "go")["data"], serde_json::Value::Null);
        assert_eq!(run(&state, "wait soon")["success"], false);
    }

    #[test]
    fn test_clear_flow() {
        let state = test_state();
        assert_eq!(run(&state, "confirm")["success"], false);

        run(&state, "go github.com");
        run(&state, "wait 1000");
        run(&state, "clear");
        assert_eq!(run(&state, "confirm")["success"], true);

        let counters = run(&state, "counters");
        assert_eq!(counters["data"]["cookies_blocked"], 0);
    }

    #[test]
    fn test_voice_flow() {
        let state = test_state();
        assert_eq!(run(&state, "voice")["success"], true);
        assert_eq!(run(&state, "state")["data"]["listening"], true);

        run(&state, "say github.com");
        run(&state, "wait 500");
        let snapshot = run(&state, "state");
        assert_eq!(snapshot["data"]["listening"], false);
        assert_eq!(snapshot["data"]["content"]["url"], "https://github.com");
    }

    #[test]
    fn test_voice_unsupported() {
        let state = AppState::new(Config::default(), false).unwrap();
        let out = run(&state, "voice");
        assert_eq!(out["success"], false);
        assert_eq!(
            out["error"],
            "Voice search is not supported in this environment"
        );
    }

    #[test]
    fn test_toggle_flags() {
        let state = test_state();
        let out = run(&state, "toggle incognito");
        assert_eq!(out["data"]["enabled"], true);
        assert_eq!(run(&state, "new")["data"]["is_incognito"], true);
        assert_eq!(run(&state, "toggle warp")["success"], false);
    }

    #[test]
    fn test_privacy_summary() {
        let state = test_state();
        run(&state, "toggle ads");

        let out = run(&state, "privacy");
        let settings = out["data"].as_array().unwrap();
        assert_eq!(settings.len(), 4);
        assert_eq!(settings[0]["label"], "Tracker blocking");
        assert_eq!(settings[0]["enabled"], true);
        assert_eq!(settings[1]["label"], "Ad blocking");
        assert_eq!(settings[1]["enabled"], false);
        assert_eq!(settings[3]["label"], "Auto-delete data");
    }
}
