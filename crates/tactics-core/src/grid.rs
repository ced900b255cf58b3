//! The battlefield: a fixed-size rectangle of terrain cells.
//!
//! This module contains:
//! - Terrain types and their (currently inert) movement costs
//! - `Cell`, one square of the board and the unit standing on it
//! - `Grid`, the board itself with occupancy-checked placement
//!
//! A cell owns the unit standing on it. Moving a unit hands it from one cell
//! to another; there is never a second copy of a unit on the board.

use crate::game::GameError;
use crate::player::Player;
use crate::position::Position;
use crate::unit::Unit;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Terrain of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    #[default]
    Grass,
    Water,
    Mountain,
    Road,
}

impl Terrain {
    /// Map a uniform draw in `[0, 1)` to a terrain.
    ///
    /// Thresholds are cumulative and checked in order: 5% mountain, 10% water,
    /// 15% road, the remaining 70% grass.
    pub fn from_draw(draw: f64) -> Self {
        if draw < 0.05 {
            Terrain::Mountain
        } else if draw < 0.15 {
            Terrain::Water
        } else if draw < 0.30 {
            Terrain::Road
        } else {
            Terrain::Grass
        }
    }

    /// Pick a terrain with the weighted distribution of [`Terrain::from_draw`]
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::from_draw(rng.gen::<f64>())
    }

    /// Movement cost of entering this terrain.
    ///
    /// Not consulted by range calculation, which is plain Manhattan distance.
    /// Exposed so a presentation layer can show it.
    pub fn movement_cost(&self) -> f64 {
        match self {
            Terrain::Grass => 1.0,
            Terrain::Road => 0.5,
            Terrain::Water => 3.0,
            Terrain::Mountain => 2.0,
        }
    }
}

/// A single square of the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub position: Position,
    pub terrain: Terrain,
    /// The unit standing here, if any
    pub unit: Option<Unit>,
}

/// The game board, stored row by row (`cells[y][x]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create an all-grass board with no units
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_terrain(width, height, |_| Terrain::Grass)
    }

    /// Create a board with randomized terrain
    pub fn random(width: u32, height: u32) -> Self {
        let mut rng = rand::thread_rng();
        Self::random_with_rng(width, height, &mut rng)
    }

    /// Create a board with randomized terrain from a provided RNG.
    /// Cells are drawn in row-major order, so a seeded RNG gives a
    /// reproducible board.
    pub fn random_with_rng<R: Rng>(width: u32, height: u32, rng: &mut R) -> Self {
        Self::from_terrain(width, height, |_| Terrain::random(rng))
    }

    fn from_terrain<F>(width: u32, height: u32, mut terrain_at: F) -> Self
    where
        F: FnMut(Position) -> Terrain,
    {
        let cells = (0..height as i32)
            .map(|y| {
                (0..width as i32)
                    .map(|x| {
                        let position = Position::new(x, y);
                        Cell {
                            position,
                            terrain: terrain_at(position),
                            unit: None,
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Check if a position lies on the board
    pub fn contains(&self, pos: &Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Reject positions off the board
    pub fn check_bounds(&self, pos: &Position) -> Result<(), GameError> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds(*pos))
        }
    }

    /// Get a cell
    pub fn cell(&self, pos: &Position) -> Option<&Cell> {
        if !self.contains(pos) {
            return None;
        }
        Some(&self.cells[pos.y as usize][pos.x as usize])
    }

    fn cell_mut(&mut self, pos: &Position) -> Option<&mut Cell> {
        if !self.contains(pos) {
            return None;
        }
        Some(&mut self.cells[pos.y as usize][pos.x as usize])
    }

    /// Terrain at a position
    pub fn terrain_at(&self, pos: &Position) -> Option<Terrain> {
        self.cell(pos).map(|c| c.terrain)
    }

    /// The unit standing at a position, if any
    pub fn unit_at(&self, pos: &Position) -> Option<&Unit> {
        self.cell(pos).and_then(|c| c.unit.as_ref())
    }

    pub(crate) fn unit_at_mut(&mut self, pos: &Position) -> Option<&mut Unit> {
        self.cell_mut(pos).and_then(|c| c.unit.as_mut())
    }

    /// Check if a unit stands at a position
    pub fn is_occupied(&self, pos: &Position) -> bool {
        self.unit_at(pos).is_some()
    }

    /// Iterate over every unit on the board, in row-major order
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.cells
            .iter()
            .flatten()
            .filter_map(|cell| cell.unit.as_ref())
    }

    pub(crate) fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.cells
            .iter_mut()
            .flatten()
            .filter_map(|cell| cell.unit.as_mut())
    }

    /// Count a side's surviving units
    pub fn unit_count(&self, player: Player) -> usize {
        self.units().filter(|u| u.player == player).count()
    }

    /// Put a unit on the board at its own `position`.
    /// Fails without touching the board if the cell is off-grid or taken.
    pub(crate) fn place_unit(&mut self, unit: Unit) -> Result<(), GameError> {
        let pos = unit.position;
        let cell = self.cell_mut(&pos).ok_or(GameError::OutOfBounds(pos))?;
        if cell.unit.is_some() {
            return Err(GameError::CellOccupied(pos));
        }
        cell.unit = Some(unit);
        Ok(())
    }

    /// Hand the unit at `from` over to the empty cell at `to`, updating its
    /// position. Both cells are checked before anything moves.
    pub(crate) fn move_unit(
        &mut self,
        from: Position,
        to: Position,
    ) -> Result<&mut Unit, GameError> {
        self.check_bounds(&from)?;
        self.check_bounds(&to)?;
        if !self.is_occupied(&from) {
            return Err(GameError::NoUnitAt(from));
        }
        if self.is_occupied(&to) {
            return Err(GameError::CellOccupied(to));
        }

        let mut unit = self.remove_unit(&from).ok_or(GameError::NoUnitAt(from))?;
        unit.position = to;
        let cell = self.cell_mut(&to).ok_or(GameError::OutOfBounds(to))?;
        Ok(cell.unit.insert(unit))
    }

    /// Take a unit off the board
    pub(crate) fn remove_unit(&mut self, pos: &Position) -> Option<Unit> {
        self.cell_mut(pos).and_then(|c| c.unit.take())
    }
}
