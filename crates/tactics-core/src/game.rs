//! Core game state machine.
//!
//! This module contains the `GameState` struct and the reducer that applies
//! [`GameAction`]s to it. Every handler validates first and mutates second,
//! so an action that returns `Err` leaves the state exactly as it was.

use crate::actions::{GameAction, GameEvent, Notice};
use crate::combat;
use crate::config::GameConfig;
use crate::grid::Grid;
use crate::player::{Credits, Player};
use crate::position::Position;
use crate::range::{available_attacks, available_moves};
use crate::unit::{Unit, UnitType};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Game phase. Moves strictly forward; only a reset goes back to `Deployment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Both sides buy and place units
    Deployment,
    /// Sides alternate moving and attacking
    Battle,
    /// One side has been wiped out
    GameOver { winner: Player },
}

/// Reasons an action was rejected. None of these are fatal; the state is
/// untouched and the caller decides what to show.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("No unit at {0}")]
    NoUnitAt(Position),

    #[error("Unit at {0} belongs to the other player")]
    NotYourUnit(Position),

    #[error("This unit has already completed its actions for this turn")]
    UnitExhausted,

    #[error("No unit selected")]
    NoUnitSelected,

    #[error("Cannot move to {0}")]
    IllegalMove(Position),

    #[error("No enemy in range at {0}")]
    IllegalTarget(Position),

    #[error("Invalid action for current phase")]
    InvalidPhase,

    #[error("Not enough credits to deploy {0}")]
    InsufficientCredits(UnitType),

    #[error("Invalid deployment position for {0} player")]
    InvalidDeploymentPosition(Player),

    #[error("This cell is already occupied")]
    CellOccupied(Position),

    #[error("Game is over")]
    GameOver,
}

impl GameError {
    /// The notice to show for this rejection.
    ///
    /// Clicking an empty cell, an enemy unit, or acting in the wrong phase
    /// is silently ignored.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            GameError::NoUnitAt(_)
            | GameError::NotYourUnit(_)
            | GameError::NoUnitSelected
            | GameError::InvalidPhase => None,
            GameError::UnitExhausted | GameError::GameOver => Some(Notice::info(self.to_string())),
            _ => Some(Notice::error(self.to_string())),
        }
    }
}

/// Result of [`GameState::reduce`]: the next snapshot and what happened.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: GameState,
    pub outcome: Result<Vec<GameEvent>, GameError>,
}

impl Transition {
    /// Flatten the outcome into the notices to display
    pub fn notices(&self) -> Vec<Notice> {
        match &self.outcome {
            Ok(events) => events.iter().filter_map(GameEvent::notice).collect(),
            Err(err) => err.notice().into_iter().collect(),
        }
    }
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Board size and economy
    pub config: GameConfig,
    /// The board, including every unit
    pub grid: Grid,
    /// Side whose turn it is
    pub current_player: Player,
    /// Current game phase
    pub phase: GamePhase,
    /// Remaining deployment credits
    pub credits: Credits,
    /// Snapshot of the selected unit, kept in step with the board
    pub selected_unit: Option<Unit>,
    /// Where the selected unit may move
    pub available_moves: Vec<Position>,
    /// Enemy positions the selected unit may attack
    pub available_attacks: Vec<Position>,
    /// Round number (starts at 1, advances when play returns to blue)
    pub turn: u32,
}

impl GameState {
    /// Create a new game on a default-sized, randomized board
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Create a new game with the given settings
    pub fn with_config(config: GameConfig) -> Self {
        let mut rng = rand::thread_rng();
        Self::with_rng(config, &mut rng)
    }

    /// Create a new game drawing terrain from a provided RNG
    pub fn with_rng<R: Rng>(config: GameConfig, rng: &mut R) -> Self {
        Self {
            config,
            grid: Grid::random_with_rng(config.width, config.height, rng),
            current_player: Player::Blue,
            phase: GamePhase::Deployment,
            credits: Credits::new(config.starting_credits),
            selected_unit: None,
            available_moves: Vec::new(),
            available_attacks: Vec::new(),
            turn: 1,
        }
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// Get the winner if the game is finished
    pub fn winner(&self) -> Option<Player> {
        if let GamePhase::GameOver { winner } = self.phase {
            Some(winner)
        } else {
            None
        }
    }

    /// Surviving units for a side
    pub fn unit_count(&self, player: Player) -> usize {
        self.grid.unit_count(player)
    }

    /// Whether `player` may place a unit at `position` (ignoring credits)
    pub fn can_deploy_at(&self, player: Player, position: Position) -> bool {
        self.grid.contains(&position)
            && self.config.in_deployment_zone(player, position.x)
            && !self.grid.is_occupied(&position)
    }

    /// Serialize the full state for a presentation layer
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Get all currently sensible actions.
    ///
    /// This is what a UI would offer: selections of units that can still
    /// act, the selected unit's moves and targets, and every affordable
    /// deployment. [`apply_action`](Self::apply_action) is the authority on
    /// what is accepted.
    pub fn valid_actions(&self) -> Vec<GameAction> {
        let mut actions = Vec::new();

        match self.phase {
            GamePhase::GameOver { .. } => {
                if self.selected_unit.is_some() {
                    actions.push(GameAction::Cancel);
                }
            }

            GamePhase::Deployment => {
                for player in Player::ALL {
                    for unit_type in UnitType::ALL {
                        if !self.credits.can_afford(player, unit_type.cost()) {
                            continue;
                        }
                        for cell in self.grid.rows().iter().flatten() {
                            if self.can_deploy_at(player, cell.position) {
                                actions.push(GameAction::DeployUnit {
                                    unit_type,
                                    position: cell.position,
                                    player,
                                });
                            }
                        }
                    }
                }
                actions.push(GameAction::StartBattle);
            }

            GamePhase::Battle => {
                let selected_id = self.selected_unit.as_ref().map(|u| u.id);

                if selected_id.is_some() {
                    actions.extend(self.available_moves.iter().copied().map(GameAction::Move));
                    actions.extend(
                        self.available_attacks
                            .iter()
                            .copied()
                            .map(GameAction::Attack),
                    );
                    actions.push(GameAction::Cancel);
                }

                for unit in self.grid.units() {
                    if unit.player == self.current_player
                        && !unit.is_exhausted()
                        && Some(unit.id) != selected_id
                    {
                        actions.push(GameAction::Select(unit.position));
                    }
                }

                actions.push(GameAction::EndTurn);
            }
        }

        actions.push(GameAction::ResetGame);
        actions
    }

    /// Apply an action and return the resulting events.
    ///
    /// On `Err` nothing has changed.
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        let mut rng = rand::thread_rng();
        self.apply_action_with_rng(action, &mut rng)
    }

    /// Apply an action, using `rng` for anything random (the board drawn by
    /// a reset)
    pub fn apply_action_with_rng<R: Rng>(
        &mut self,
        action: GameAction,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, GameError> {
        // Once someone has won, only a reset or clearing the selection is accepted
        if self.is_finished() && !matches!(action, GameAction::ResetGame | GameAction::Cancel) {
            return Err(GameError::GameOver);
        }

        match action {
            GameAction::Select(position) => self.select(position),
            GameAction::Move(position) => self.move_selected(position),
            GameAction::Attack(position) => self.attack(position),
            GameAction::Cancel => Ok(self.cancel()),
            GameAction::EndTurn => Ok(self.end_turn()),
            GameAction::DeployUnit {
                unit_type,
                position,
                player,
            } => self.deploy_unit(unit_type, position, player),
            GameAction::StartBattle => self.start_battle(),
            GameAction::ResetGame => Ok(self.reset(rng)),
        }
    }

    /// Pure form of [`apply_action`](Self::apply_action): leaves `self`
    /// alone and returns the next snapshot alongside the outcome.
    pub fn reduce(&self, action: GameAction) -> Transition {
        let mut state = self.clone();
        let outcome = state.apply_action(action);
        Transition { state, outcome }
    }

    // ==================== Handlers ====================

    fn select(&mut self, position: Position) -> Result<Vec<GameEvent>, GameError> {
        self.grid.check_bounds(&position)?;
        let unit = self
            .grid
            .unit_at(&position)
            .ok_or(GameError::NoUnitAt(position))?;

        if unit.player != self.current_player {
            return Err(GameError::NotYourUnit(position));
        }
        if unit.is_exhausted() {
            return Err(GameError::UnitExhausted);
        }

        let moves = if unit.has_moved {
            Vec::new()
        } else {
            available_moves(&self.grid, unit)
        };
        let attacks = if unit.has_attacked {
            Vec::new()
        } else {
            available_attacks(&self.grid, unit)
        };

        let event = GameEvent::UnitSelected {
            unit_id: unit.id,
            position,
            moves: moves.len(),
            attacks: attacks.len(),
        };

        self.selected_unit = Some(unit.clone());
        self.available_moves = moves;
        self.available_attacks = attacks;

        Ok(vec![event])
    }

    fn move_selected(&mut self, to: Position) -> Result<Vec<GameEvent>, GameError> {
        let from = self
            .selected_unit
            .as_ref()
            .ok_or(GameError::NoUnitSelected)?
            .position;
        self.grid.check_bounds(&to)?;
        if !self.available_moves.contains(&to) {
            return Err(GameError::IllegalMove(to));
        }

        let unit = self.grid.move_unit(from, to)?;
        unit.has_moved = true;
        let unit = unit.clone();

        self.available_attacks = if unit.has_attacked {
            Vec::new()
        } else {
            available_attacks(&self.grid, &unit)
        };
        self.available_moves.clear();

        let event = GameEvent::UnitMoved {
            unit_id: unit.id,
            from,
            to,
        };
        self.selected_unit = Some(unit);

        Ok(vec![event])
    }

    fn attack(&mut self, target: Position) -> Result<Vec<GameEvent>, GameError> {
        let attacker = self
            .selected_unit
            .as_ref()
            .ok_or(GameError::NoUnitSelected)?;
        let (attacker_id, attacker_pos) = (attacker.id, attacker.position);

        self.grid.check_bounds(&target)?;
        if !self.grid.is_occupied(&target) {
            return Err(GameError::NoUnitAt(target));
        }
        if !self.available_attacks.contains(&target) {
            return Err(GameError::IllegalTarget(target));
        }

        let result = combat::resolve_attack(&mut self.grid, attacker_pos, target)?;

        let mut events = vec![GameEvent::UnitAttacked {
            attacker: attacker_id,
            target,
            damage: result.damage,
            remaining_health: result.remaining_health,
        }];
        if result.destroyed {
            events.push(GameEvent::UnitDestroyed {
                unit_id: result.defender.id,
                player: result.defender.player,
                position: target,
            });
        }

        self.selected_unit = self.grid.unit_at(&attacker_pos).cloned();
        self.available_moves.clear();
        self.available_attacks.clear();

        events.extend(self.check_win_condition());
        Ok(events)
    }

    fn cancel(&mut self) -> Vec<GameEvent> {
        self.clear_selection();
        vec![GameEvent::SelectionCleared]
    }

    fn end_turn(&mut self) -> Vec<GameEvent> {
        let player = self.current_player;
        for unit in self.grid.units_mut().filter(|u| u.player == player) {
            unit.reset_actions();
        }

        let next_player = player.other();
        self.current_player = next_player;
        if next_player == Player::Blue {
            self.turn += 1;
        }
        self.clear_selection();

        vec![GameEvent::TurnEnded {
            player,
            next_player,
            turn: self.turn,
        }]
    }

    fn deploy_unit(
        &mut self,
        unit_type: UnitType,
        position: Position,
        player: Player,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != GamePhase::Deployment {
            return Err(GameError::InvalidPhase);
        }
        self.grid.check_bounds(&position)?;

        let cost = unit_type.cost();
        if !self.credits.can_afford(player, cost) {
            return Err(GameError::InsufficientCredits(unit_type));
        }
        if !self.config.in_deployment_zone(player, position.x) {
            return Err(GameError::InvalidDeploymentPosition(player));
        }
        if self.grid.is_occupied(&position) {
            return Err(GameError::CellOccupied(position));
        }

        let unit = Unit::new(unit_type, player, position);
        let unit_id = unit.id;
        self.grid.place_unit(unit)?;
        self.credits.spend(player, cost);

        Ok(vec![GameEvent::UnitDeployed {
            unit_id,
            unit_type,
            player,
            position,
            credits_remaining: self.credits.get(player),
        }])
    }

    fn start_battle(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != GamePhase::Deployment {
            return Err(GameError::InvalidPhase);
        }

        self.phase = GamePhase::Battle;
        self.current_player = Player::Blue;
        self.turn = 1;

        Ok(vec![GameEvent::BattleStarted])
    }

    fn reset<R: Rng>(&mut self, rng: &mut R) -> Vec<GameEvent> {
        *self = Self::with_rng(self.config, rng);
        vec![GameEvent::GameReset]
    }

    // ==================== Helpers ====================

    fn clear_selection(&mut self) {
        self.selected_unit = None;
        self.available_moves.clear();
        self.available_attacks.clear();
    }

    /// A side with no units left loses. Only checked during battle.
    fn check_winner(&self) -> Option<Player> {
        if self.phase != GamePhase::Battle {
            return None;
        }

        let blue = self.unit_count(Player::Blue);
        let red = self.unit_count(Player::Red);
        if blue == 0 {
            Some(Player::Red)
        } else if red == 0 {
            Some(Player::Blue)
        } else {
            None
        }
    }

    fn check_win_condition(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if let Some(winner) = self.check_winner() {
            self.phase = GamePhase::GameOver { winner };
            events.push(GameEvent::GameWon { player: winner });
        }

        events
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
