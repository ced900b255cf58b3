//! Commands the presentation layer can issue, and what comes back.
//!
//! This module defines all possible actions in the game, the events that
//! result from them, and the user-facing notices derived from both.

use crate::player::Player;
use crate::position::Position;
use crate::unit::{UnitId, UnitType};
use serde::{Deserialize, Serialize};

/// All possible actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    // ==================== Battle ====================
    /// Select one of the current player's units
    Select(Position),
    /// Move the selected unit to one of its available moves
    Move(Position),
    /// Attack one of the selected unit's available targets
    Attack(Position),
    /// Drop the current selection
    Cancel,
    /// Hand play to the other side
    EndTurn,

    // ==================== Deployment ====================
    /// Buy a unit and put it on the board
    DeployUnit {
        unit_type: UnitType,
        position: Position,
        player: Player,
    },
    /// Close deployment and start the battle
    StartBattle,

    // ==================== Session ====================
    /// Throw everything away and start over on a fresh board
    ResetGame,
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A message meant for the player. How it is shown is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A unit was selected
    UnitSelected {
        unit_id: UnitId,
        position: Position,
        moves: usize,
        attacks: usize,
    },

    /// The selection was dropped
    SelectionCleared,

    /// A unit moved
    UnitMoved {
        unit_id: UnitId,
        from: Position,
        to: Position,
    },

    /// A unit was hit. Followed by `UnitDestroyed` if the hit was lethal.
    UnitAttacked {
        attacker: UnitId,
        target: Position,
        damage: f64,
        remaining_health: f64,
    },

    /// A unit was hit and destroyed
    UnitDestroyed {
        unit_id: UnitId,
        player: Player,
        position: Position,
    },

    /// Play passed to the other side
    TurnEnded {
        player: Player,
        next_player: Player,
        turn: u32,
    },

    /// A unit was bought and placed
    UnitDeployed {
        unit_id: UnitId,
        unit_type: UnitType,
        player: Player,
        position: Position,
        credits_remaining: u32,
    },

    /// Deployment is over
    BattleStarted,

    /// One side has no units left
    GameWon { player: Player },

    /// The game was reset
    GameReset,
}

impl GameEvent {
    /// The notice to show for this event, if any
    pub fn notice(&self) -> Option<Notice> {
        match self {
            GameEvent::UnitSelected { .. } | GameEvent::SelectionCleared => None,
            GameEvent::UnitMoved { to, .. } => Some(Notice::success(format!("Unit moved to {}", to))),
            GameEvent::UnitAttacked {
                damage,
                remaining_health,
                ..
            } => {
                // a kill is announced by UnitDestroyed instead
                if *remaining_health > 0.0 {
                    Some(Notice::info(format!("Dealt {} damage to enemy unit", damage)))
                } else {
                    None
                }
            }
            GameEvent::UnitDestroyed { .. } => Some(Notice::success("Enemy unit destroyed!")),
            GameEvent::TurnEnded { next_player, .. } => {
                Some(Notice::info(format!("{} player's turn", next_player.name())))
            }
            GameEvent::UnitDeployed {
                unit_type, player, ..
            } => Some(Notice::success(format!(
                "Deployed {} for {} player",
                unit_type, player
            ))),
            GameEvent::BattleStarted => {
                Some(Notice::success("Deployment phase complete. Battle begins!"))
            }
            GameEvent::GameWon { player } => {
                Some(Notice::success(format!("{} player wins!", player.name())))
            }
            GameEvent::GameReset => Some(Notice::info("Game reset")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_event_notices() {
        let moved = GameEvent::UnitMoved {
            unit_id: Uuid::new_v4(),
            from: Position::new(1, 1),
            to: Position::new(3, 2),
        };
        assert_eq!(moved.notice(), Some(Notice::success("Unit moved to (3, 2)")));

        let hit = GameEvent::UnitAttacked {
            attacker: Uuid::new_v4(),
            target: Position::new(3, 2),
            damage: 22.5,
            remaining_health: 77.5,
        };
        assert_eq!(
            hit.notice(),
            Some(Notice::info("Dealt 22.5 damage to enemy unit"))
        );

        let turn = GameEvent::TurnEnded {
            player: Player::Blue,
            next_player: Player::Red,
            turn: 1,
        };
        assert_eq!(turn.notice(), Some(Notice::info("Red player's turn")));

        let kill = GameEvent::UnitAttacked {
            attacker: Uuid::new_v4(),
            target: Position::new(3, 2),
            damage: 50.0,
            remaining_health: 0.0,
        };
        assert_eq!(kill.notice(), None);

        let deployed = GameEvent::UnitDeployed {
            unit_id: Uuid::new_v4(),
            unit_type: UnitType::Helicopter,
            player: Player::Red,
            position: Position::new(8, 0),
            credits_remaining: 600,
        };
        assert_eq!(
            deployed.notice().unwrap().message,
            "Deployed helicopter for red player"
        );
    }

    #[test]
    fn test_selection_events_are_silent() {
        assert_eq!(GameEvent::SelectionCleared.notice(), None);
        let selected = GameEvent::UnitSelected {
            unit_id: Uuid::new_v4(),
            position: Position::new(0, 0),
            moves: 9,
            attacks: 0,
        };
        assert_eq!(selected.notice(), None);
    }

    #[test]
    fn test_action_json_shape() {
        let action = GameAction::DeployUnit {
            unit_type: UnitType::Tank,
            position: Position::new(0, 3),
            player: Player::Blue,
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(
            json,
            r#"{"DeployUnit":{"unit_type":"Tank","position":{"x":0,"y":3},"player":"Blue"}}"#
        );
        let parsed: GameAction = serde_json::from_str(r#"{"Select":{"x":2,"y":5}}"#).unwrap();
        assert_eq!(parsed, GameAction::Select(Position::new(2, 5)));
        let parsed: GameAction = serde_json::from_str(r#""EndTurn""#).unwrap();
        assert_eq!(parsed, GameAction::EndTurn);
    }
}
