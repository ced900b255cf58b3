//! Sides and their deployment purses.
//!
//! This module contains:
//! - `Player`, the two sides of a match
//! - `Credits`, the per-side currency spent on deployment

use serde::{Deserialize, Serialize};
use std::fmt;

/// Credits each side starts a game with
pub const STARTING_CREDITS: u32 = 1000;

/// One of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Deploys on the left, always opens the battle
    Blue,
    /// Deploys on the right
    Red,
}

impl Player {
    /// Both sides, in turn order
    pub const ALL: [Player; 2] = [Player::Blue, Player::Red];

    /// The opposing side
    pub fn other(&self) -> Player {
        match self {
            Player::Blue => Player::Red,
            Player::Red => Player::Blue,
        }
    }

    /// Display name ("Blue" / "Red")
    pub fn name(&self) -> &'static str {
        match self {
            Player::Blue => "Blue",
            Player::Red => "Red",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Player::Blue => "blue",
            Player::Red => "red",
        })
    }
}

/// Per-side credit balances.
///
/// Credits only ever go down during a game; a reset builds a fresh purse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credits {
    pub blue: u32,
    pub red: u32,
}

impl Credits {
    /// Both sides start with the same amount
    pub fn new(starting: u32) -> Self {
        Self {
            blue: starting,
            red: starting,
        }
    }

    /// Balance for a side
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::Blue => self.blue,
            Player::Red => self.red,
        }
    }

    fn get_mut(&mut self, player: Player) -> &mut u32 {
        match player {
            Player::Blue => &mut self.blue,
            Player::Red => &mut self.red,
        }
    }

    /// Check if a side can pay `cost`
    pub fn can_afford(&self, player: Player, cost: u32) -> bool {
        self.get(player) >= cost
    }

    /// Debit `cost` from one side only. Returns false (and changes nothing)
    /// if the balance is too low.
    pub fn spend(&mut self, player: Player, cost: u32) -> bool {
        if !self.can_afford(player, cost) {
            return false;
        }
        *self.get_mut(player) -= cost;
        true
    }
}

impl Default for Credits {
    fn default() -> Self {
        Self::new(STARTING_CREDITS)
    }
}
