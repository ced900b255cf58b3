//! Damage calculation and application.
//!
//! # Formula
//!
//! ```text
//! damage = max(MIN_DAMAGE, attacker.attack - defender.defense / 2)
//! health = max(0, health - damage)
//! ```
//!
//! No rounding is applied, so health can go fractional (a tank hitting a
//! helicopter deals 45, an infantry hitting a tank deals 5).

use crate::game::GameError;
use crate::grid::Grid;
use crate::position::Position;
use crate::unit::Unit;
use serde::{Deserialize, Serialize};

/// Floor on the damage of any hit
pub const MIN_DAMAGE: f64 = 5.0;

/// Damage `attacker` deals to `defender` in one hit
pub fn calculate_damage(attacker: &Unit, defender: &Unit) -> f64 {
    (attacker.attack - defender.defense / 2.0).max(MIN_DAMAGE)
}

/// What happened in one exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    pub damage: f64,
    /// Defender's health after the hit (0 if destroyed)
    pub remaining_health: f64,
    pub destroyed: bool,
    /// The defender as it was after the hit. Already off the board if destroyed.
    pub defender: Unit,
}

/// Resolve an attack by the unit at `attacker_pos` on the unit at `target_pos`.
///
/// The defender loses health and is removed from the board if it drops to
/// zero. The attacker stays where it is and is marked as having attacked.
/// Both cells are checked before the board is touched.
pub fn resolve_attack(
    grid: &mut Grid,
    attacker_pos: Position,
    target_pos: Position,
) -> Result<CombatResult, GameError> {
    grid.check_bounds(&attacker_pos)?;
    grid.check_bounds(&target_pos)?;
    let attacker = grid
        .unit_at(&attacker_pos)
        .ok_or(GameError::NoUnitAt(attacker_pos))?;
    let defender = grid
        .unit_at(&target_pos)
        .ok_or(GameError::NoUnitAt(target_pos))?;

    let damage = calculate_damage(attacker, defender);
    let mut defender = defender.clone();
    defender.health = (defender.health - damage).max(0.0);
    let destroyed = defender.health <= 0.0;

    if destroyed {
        grid.remove_unit(&target_pos);
    } else if let Some(slot) = grid.unit_at_mut(&target_pos) {
        slot.health = defender.health;
    }

    if let Some(attacker) = grid.unit_at_mut(&attacker_pos) {
        attacker.has_attacked = true;
    }

    Ok(CombatResult {
        damage,
        remaining_health: defender.health,
        destroyed,
        defender,
    })
}
