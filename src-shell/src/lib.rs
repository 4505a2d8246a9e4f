//! Veil Browser - Headless Shell
//!
//! Reads one command per line from stdin and prints one JSON result per
//! line. The browser clock follows wall time, so page loads and voice
//! submits complete on their own while the shell waits for input.

mod commands;
mod state;

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};

use commands::Reply;
use state::AppState;
use veil_core::Config;

/// How often the browser clock is brought up to date
const TICK: Duration = Duration::from_millis(50);

pub async fn run(config: Config, voice_enabled: bool) -> anyhow::Result<()> {
    let state = AppState::new(config, voice_enabled)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    tracing::info!(voice = voice_enabled, "Veil shell started");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };

                match commands::dispatch(&state, &line) {
                    Reply::Output(json) => println!("{}", json),
                    Reply::Skip => {}
                    Reply::Quit => break,
                }
            }
            now = ticker.tick() => {
                let elapsed = now.duration_since(last_tick);
                last_tick = now;

                let fired = state.advance(elapsed);
                if fired > 0 {
                    tracing::debug!(fired, "Deferred effects applied");
                }
            }
        }
    }

    tracing::info!("Veil shell stopped");
    Ok(())
}
