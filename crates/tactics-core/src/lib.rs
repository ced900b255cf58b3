//! Tactics - a two-player turn-based grid tactics rules engine
//!
//! This crate holds the whole rules engine:
//! - A rectangular board with random terrain
//! - Three unit types with fixed stats and costs
//! - A deployment phase funded by per-side credits
//! - A battle phase of alternating turns, with Manhattan-range movement and
//!   a deterministic damage formula
//!
//! # Architecture
//!
//! The engine does no I/O. A caller feeds [`GameAction`]s to
//! [`GameState::apply_action`] and renders the resulting state, events and
//! notices however it likes. It builds natively for the CLI driver and, with
//! the `wasm` feature, for the browser.
//!
//! # Modules
//!
//! - [`position`]: Board coordinates and distance
//! - [`player`]: Sides and deployment credits
//! - [`unit`]: Unit types, stats and per-turn flags
//! - [`grid`]: Terrain and the cell grid
//! - [`range`]: Move and attack range queries
//! - [`combat`]: Damage calculation
//! - [`config`]: Board size and starting credits
//! - [`actions`]: Actions, events and notices
//! - [`game`]: Game state machine

pub mod actions;
pub mod combat;
pub mod config;
pub mod game;
pub mod grid;
pub mod player;
pub mod position;
pub mod range;
pub mod unit;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent, Notice, Severity};
pub use combat::{calculate_damage, CombatResult};
pub use config::{ConfigError, GameConfig};
pub use game::{GameError, GamePhase, GameState, Transition};
pub use grid::{Cell, Grid, Terrain};
pub use player::{Credits, Player};
pub use position::Position;
pub use range::{available_attacks, available_moves};
pub use unit::{Unit, UnitId, UnitStats, UnitType};
