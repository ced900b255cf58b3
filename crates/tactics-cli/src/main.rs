//! Tactics command-line driver.
//!
//! Reads one command per line on stdin and answers with one JSON message
//! per line on stdout. Logs go to stderr.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::Context;
use tactics_core::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use tactics_core::player::STARTING_CREDITS;
use tactics_core::GameConfig;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod protocol;
mod session;

use protocol::{parse_line, ServerMessage};
use session::Session;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Parse settings from env or use defaults
    let config = GameConfig::new(
        env_or("TACTICS_WIDTH", DEFAULT_WIDTH)?,
        env_or("TACTICS_HEIGHT", DEFAULT_HEIGHT)?,
        env_or("TACTICS_CREDITS", STARTING_CREDITS)?,
    )?;
    let seed = std::env::var("TACTICS_SEED")
        .ok()
        .map(|s| s.parse::<u64>())
        .transpose()
        .context("TACTICS_SEED must be an unsigned integer")?;

    info!("Starting tactics session...");

    let mut session = Session::new(config, seed);
    run(&mut session, io::stdin().lock(), io::stdout().lock())
}

/// Read an environment variable, falling back to `default` when unset
fn env_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", name, value)),
        Err(_) => Ok(default),
    }
}

/// Serve commands until input runs out
fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut output: W) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let responses = match parse_line(&line) {
            Ok(msg) => session.handle(msg),
            Err(e) => {
                warn!(line = %line, error = %e, "Unparsable command");
                vec![ServerMessage::Error {
                    message: e.to_string(),
                }]
            }
        };

        for response in responses {
            serde_json::to_writer(&mut output, &response)?;
            writeln!(output)?;
        }
        output.flush()?;
    }

    info!("Input closed, session over");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tactics_core::{GamePhase, Player};

    fn run_script(script: &str) -> (Session, Vec<ServerMessage>) {
        let mut session = Session::new(GameConfig::default(), Some(1));
        let mut output = Vec::new();
        run(&mut session, script.as_bytes(), &mut output).unwrap();

        let responses = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (session, responses)
    }

    #[test]
    fn test_scripted_session() {
        let script = "\
deploy tank 1 1 blue
deploy infantry 8 1 red

start
{\"type\":\"Action\",\"payload\":{\"action\":\"EndTurn\"}}
ping
";
        let (session, responses) = run_script(script);

        assert_eq!(responses.len(), 5);
        assert!(responses[..4]
            .iter()
            .all(|r| matches!(r, ServerMessage::ActionResult { success: true, .. })));
        assert_eq!(responses[4], ServerMessage::Pong);

        let state = session.state();
        assert_eq!(state.phase, GamePhase::Battle);
        assert_eq!(state.current_player, Player::Red);
        assert_eq!(state.credits.blue, 700);
        assert_eq!(state.credits.red, 900);
    }

    #[test]
    fn test_bad_lines_get_error_responses() {
        let (_, responses) = run_script("warp 1 1\nselect 0 0\n");
        assert!(matches!(
            &responses[0],
            ServerMessage::Error { message } if message == "Unknown command: warp"
        ));
        // Empty cell: rejected without a notice
        assert_eq!(
            responses[1],
            ServerMessage::ActionResult {
                success: false,
                events: Vec::new(),
                notices: Vec::new(),
                error: Some("No unit at (0, 0)".to_string()),
            }
        );
    }

    #[test]
    fn test_env_or_default() {
        let value: u32 = env_or("TACTICS_TEST_SURELY_UNSET", 42).unwrap();
        assert_eq!(value, 42);
    }
}
