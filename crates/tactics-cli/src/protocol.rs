//! Line protocol for the tactics CLI.
//!
//! Each input line is one [`ClientMessage`], written either as JSON
//! (`{"type":"Action","payload":{"action":"EndTurn"}}`) or as a short text
//! command (`end`). Each response is one JSON [`ServerMessage`] per line.

use serde::{Deserialize, Serialize};
use tactics_core::{GameAction, GameEvent, GameState, Notice, Player, Position, UnitType};
use thiserror::Error;

/// Messages read from the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Submit a game action
    Action { action: GameAction },

    /// Request the full game state
    GetState,

    /// Request the actions currently on offer
    ValidActions,

    /// Ping for liveness
    Ping,
}

/// Messages written back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Outcome of an action. A rejected action still carries its notice.
    ActionResult {
        success: bool,
        events: Vec<GameEvent>,
        notices: Vec<Notice>,
        error: Option<String>,
    },

    /// Full game state
    State { state: Box<GameState> },

    /// Actions currently on offer
    ValidActions { actions: Vec<GameAction> },

    /// Game finished
    GameOver { winner: Player },

    /// The line could not be understood
    Error { message: String },

    /// Pong response
    Pong,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Unknown unit type: {0}")]
    UnknownUnitType(String),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Invalid JSON message: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse one input line
pub fn parse_line(line: &str) -> Result<ClientMessage, ProtocolError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }
    if line.starts_with('{') {
        return Ok(serde_json::from_str(line)?);
    }
    parse_command(line)
}

fn parse_command(line: &str) -> Result<ClientMessage, ProtocolError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((command, args)) = tokens.split_first() else {
        return Err(ProtocolError::Empty);
    };
    let command = command.to_ascii_lowercase();

    let action = match command.as_str() {
        "select" => GameAction::Select(parse_position(args, "select <x> <y>")?),
        "move" => GameAction::Move(parse_position(args, "move <x> <y>")?),
        "attack" => GameAction::Attack(parse_position(args, "attack <x> <y>")?),
        "cancel" => GameAction::Cancel,
        "end" => GameAction::EndTurn,
        "deploy" => parse_deploy(args)?,
        "start" => GameAction::StartBattle,
        "reset" => GameAction::ResetGame,
        "state" => return Ok(ClientMessage::GetState),
        "actions" => return Ok(ClientMessage::ValidActions),
        "ping" => return Ok(ClientMessage::Ping),
        _ => return Err(ProtocolError::UnknownCommand(command)),
    };

    Ok(ClientMessage::Action { action })
}

fn parse_position(args: &[&str], usage: &'static str) -> Result<Position, ProtocolError> {
    match args {
        [x, y] => Ok(Position::new(parse_coordinate(x)?, parse_coordinate(y)?)),
        _ => Err(ProtocolError::Usage(usage)),
    }
}

fn parse_coordinate(token: &str) -> Result<i32, ProtocolError> {
    token
        .parse()
        .map_err(|_| ProtocolError::InvalidCoordinate(token.to_string()))
}

fn parse_deploy(args: &[&str]) -> Result<GameAction, ProtocolError> {
    let [unit_type, x, y, player] = args else {
        return Err(ProtocolError::Usage("deploy <infantry|tank|helicopter> <x> <y> <blue|red>"));
    };

    let unit_type = UnitType::ALL
        .into_iter()
        .find(|t| t.name().eq_ignore_ascii_case(unit_type))
        .ok_or_else(|| ProtocolError::UnknownUnitType(unit_type.to_string()))?;
    let player = Player::ALL
        .into_iter()
        .find(|p| p.name().eq_ignore_ascii_case(player))
        .ok_or_else(|| ProtocolError::UnknownPlayer(player.to_string()))?;

    Ok(GameAction::DeployUnit {
        unit_type,
        position: Position::new(parse_coordinate(x)?, parse_coordinate(y)?),
        player,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn action(line: &str) -> GameAction {
        match parse_line(line).unwrap() {
            ClientMessage::Action { action } => action,
            other => panic!("expected an action, got {:?}", other),
        }
    }

    #[test]
    fn test_text_commands() {
        assert_eq!(action("select 1 2"), GameAction::Select(Position::new(1, 2)));
        assert_eq!(action("  MOVE 2 2 "), GameAction::Move(Position::new(2, 2)));
        assert_eq!(action("attack 3 -1"), GameAction::Attack(Position::new(3, -1)));
        assert_eq!(action("cancel"), GameAction::Cancel);
        assert_eq!(action("end"), GameAction::EndTurn);
        assert_eq!(action("start"), GameAction::StartBattle);
        assert_eq!(action("reset"), GameAction::ResetGame);
        assert_eq!(
            action("deploy Tank 0 3 blue"),
            GameAction::DeployUnit {
                unit_type: UnitType::Tank,
                position: Position::new(0, 3),
                player: Player::Blue,
            }
        );

        assert_eq!(parse_line("state").unwrap(), ClientMessage::GetState);
        assert_eq!(parse_line("actions").unwrap(), ClientMessage::ValidActions);
        assert_eq!(parse_line("ping").unwrap(), ClientMessage::Ping);
    }

    #[test]
    fn test_bad_text_commands() {
        assert!(matches!(parse_line("   "), Err(ProtocolError::Empty)));
        assert!(matches!(
            parse_line("fly 1 2"),
            Err(ProtocolError::UnknownCommand(c)) if c == "fly"
        ));
        assert!(matches!(parse_line("move 1"), Err(ProtocolError::Usage(_))));
        assert!(matches!(
            parse_line("select a 2"),
            Err(ProtocolError::InvalidCoordinate(t)) if t == "a"
        ));
        assert!(matches!(
            parse_line("deploy boat 0 0 blue"),
            Err(ProtocolError::UnknownUnitType(_))
        ));
        assert!(matches!(
            parse_line("deploy tank 0 0 green"),
            Err(ProtocolError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_json_messages() {
        let msg = parse_line(r#"{"type":"Action","payload":{"action":{"Move":{"x":4,"y":1}}}}"#)
            .unwrap();
        assert_eq!(
            msg,
            ClientMessage::Action {
                action: GameAction::Move(Position::new(4, 1))
            }
        );
        assert_eq!(parse_line(r#"{"type":"Ping"}"#).unwrap(), ClientMessage::Ping);
        assert!(matches!(parse_line("{not json"), Err(ProtocolError::Json(_))));
    }

    #[test]
    fn test_server_message_shape() {
        let json = serde_json::to_string(&ServerMessage::GameOver {
            winner: Player::Red,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"GameOver","payload":{"winner":"Red"}}"#);
        assert_eq!(
            serde_json::to_string(&ServerMessage::Pong).unwrap(),
            r#"{"type":"Pong"}"#
        );
    }
}
