//! Unit types, the fixed stat table, and live unit state.

use crate::player::Player;
use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a deployed unit
pub type UnitId = Uuid;

/// Kinds of unit that can be deployed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    /// Cheap, short-ranged
    Infantry,
    /// Heavy armour, medium range
    Tank,
    /// Fast and long-ranged, but fragile for its price
    Helicopter,
}

impl UnitType {
    /// All unit types, cheapest first
    pub const ALL: [UnitType; 3] = [UnitType::Infantry, UnitType::Tank, UnitType::Helicopter];

    /// Base stats for this unit type
    pub fn stats(&self) -> UnitStats {
        match self {
            UnitType::Infantry => UnitStats {
                health: 100.0,
                attack: 30.0,
                defense: 20.0,
                move_range: 3,
                attack_range: 1,
                cost: 100,
            },
            UnitType::Tank => UnitStats {
                health: 200.0,
                attack: 60.0,
                defense: 50.0,
                move_range: 5,
                attack_range: 2,
                cost: 300,
            },
            UnitType::Helicopter => UnitStats {
                health: 150.0,
                attack: 70.0,
                defense: 30.0,
                move_range: 7,
                attack_range: 3,
                cost: 400,
            },
        }
    }

    /// Deployment cost in credits
    pub fn cost(&self) -> u32 {
        self.stats().cost
    }

    /// Lowercase name used in notices
    pub fn name(&self) -> &'static str {
        match self {
            UnitType::Infantry => "infantry",
            UnitType::Tank => "tank",
            UnitType::Helicopter => "helicopter",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stat block shared by every unit of one type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub health: f64,
    pub attack: f64,
    pub defense: f64,
    pub move_range: u32,
    pub attack_range: u32,
    pub cost: u32,
}

/// A unit on the board.
///
/// Health is fractional: combat halves defense without rounding, so a unit
/// can end up on e.g. 92.5 health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub unit_type: UnitType,
    pub player: Player,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub attack: f64,
    pub defense: f64,
    pub move_range: u32,
    pub attack_range: u32,
    pub cost: u32,
    /// Whether the unit has moved this turn
    pub has_moved: bool,
    /// Whether the unit has attacked this turn
    pub has_attacked: bool,
}

impl Unit {
    /// Create a fresh, full-health unit with a new id
    pub fn new(unit_type: UnitType, player: Player, position: Position) -> Self {
        let stats = unit_type.stats();
        Self {
            id: Uuid::new_v4(),
            unit_type,
            player,
            position,
            health: stats.health,
            max_health: stats.health,
            attack: stats.attack,
            defense: stats.defense,
            move_range: stats.move_range,
            attack_range: stats.attack_range,
            cost: stats.cost,
            has_moved: false,
            has_attacked: false,
        }
    }

    /// A unit that has both moved and attacked can do nothing more this turn
    pub fn is_exhausted(&self) -> bool {
        self.has_moved && self.has_attacked
    }

    /// Clear the per-turn action flags
    pub fn reset_actions(&mut self) {
        self.has_moved = false;
        self.has_attacked = false;
    }
}
