//! A single local game session.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tactics_core::{GameAction, GameConfig, GameError, GameEvent, GameState};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::protocol::{ClientMessage, ServerMessage};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Action rejected: {0}")]
    Rejected(#[from] GameError),
}

/// Owns the game and the RNG that draws its boards.
pub struct Session {
    state: GameState,
    rng: StdRng,
}

impl Session {
    /// Start a session. With a seed, every board (including those drawn by
    /// resets) is reproducible.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = GameState::with_rng(config, &mut rng);

        info!(
            width = config.width,
            height = config.height,
            credits = config.starting_credits,
            seed = ?seed,
            "Session started"
        );

        Self { state, rng }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply one action to the game
    pub fn apply(&mut self, action: GameAction) -> Result<Vec<GameEvent>, SessionError> {
        let phase = self.state.phase;

        match self.state.apply_action_with_rng(action.clone(), &mut self.rng) {
            Ok(events) => {
                debug!(?action, events = events.len(), "Action applied");
                if self.state.phase != phase {
                    info!(from = ?phase, to = ?self.state.phase, "Phase changed");
                }
                Ok(events)
            }
            Err(e) => {
                warn!(?action, error = %e, "Action rejected");
                Err(e.into())
            }
        }
    }

    /// Answer one client message
    pub fn handle(&mut self, msg: ClientMessage) -> Vec<ServerMessage> {
        match msg {
            ClientMessage::Action { action } => self.handle_action(action),
            ClientMessage::GetState => vec![ServerMessage::State {
                state: Box::new(self.state.clone()),
            }],
            ClientMessage::ValidActions => vec![ServerMessage::ValidActions {
                actions: self.state.valid_actions(),
            }],
            ClientMessage::Ping => vec![ServerMessage::Pong],
        }
    }

    fn handle_action(&mut self, action: GameAction) -> Vec<ServerMessage> {
        match self.apply(action) {
            Ok(events) => {
                let notices = events.iter().filter_map(GameEvent::notice).collect();
                let winner = events.iter().find_map(|e| match e {
                    GameEvent::GameWon { player } => Some(*player),
                    _ => None,
                });

                let mut responses = vec![ServerMessage::ActionResult {
                    success: true,
                    events,
                    notices,
                    error: None,
                }];
                if let Some(winner) = winner {
                    responses.push(ServerMessage::GameOver { winner });
                }
                responses
            }
            Err(SessionError::Rejected(e)) => vec![ServerMessage::ActionResult {
                success: false,
                events: Vec::new(),
                notices: e.notice().into_iter().collect(),
                error: Some(e.to_string()),
            }],
        }
    }
}
