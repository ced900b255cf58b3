//! Move and attack range queries.
//!
//! Both queries scan the bounding box `[x - r, x + r] x [y - r, y + r]`
//! clipped to the board, keeping cells within Manhattan distance `r` of the
//! unit. Results come back in row-major order (y, then x). Terrain plays no
//! part in range; see [`Terrain::movement_cost`](crate::grid::Terrain::movement_cost).
//!
//! Nothing here is cached: call again after any change to the board.

use crate::grid::Grid;
use crate::position::Position;
use crate::unit::Unit;

/// Cells within `range` of `origin`, excluding `origin` itself
fn cells_in_range(grid: &Grid, origin: Position, range: u32) -> impl Iterator<Item = Position> {
    let range = i32::try_from(range).unwrap_or(i32::MAX);
    let min_y = origin.y.saturating_sub(range).max(0);
    let max_y = origin.y.saturating_add(range).min(grid.height() as i32 - 1);
    let min_x = origin.x.saturating_sub(range).max(0);
    let max_x = origin.x.saturating_add(range).min(grid.width() as i32 - 1);

    (min_y..=max_y)
        .flat_map(move |y| (min_x..=max_x).map(move |x| Position::new(x, y)))
        .filter(move |pos| *pos != origin && origin.manhattan_distance(pos) <= range as u32)
}

/// Empty cells the unit could move to from where it stands.
///
/// Any occupied cell is excluded, friend or foe.
pub fn available_moves(grid: &Grid, unit: &Unit) -> Vec<Position> {
    cells_in_range(grid, unit.position, unit.move_range)
        .filter(|pos| !grid.is_occupied(pos))
        .collect()
}

/// Cells holding an enemy of `unit` within its attack range
pub fn available_attacks(grid: &Grid, unit: &Unit) -> Vec<Position> {
    cells_in_range(grid, unit.position, unit.attack_range)
        .filter(|pos| {
            grid.unit_at(pos)
                .map(|target| target.player != unit.player)
                .unwrap_or(false)
        })
        .collect()
}
