//! A single player's board: the grid, the fleet placed on it, and the
//! placement and attack-resolution rules.

use log::debug;
use rand::Rng;

use crate::coord::Coordinate;
use crate::ships::{Orientation, Ship, ShipSpec};

use self::grid::Grid;
pub use self::{
    errors::{AttackError, PlaceError},
    grid::CellState,
};

mod errors;
mod grid;

/// How many random origin/orientation samples [`Board::place_random`] tries
/// before concluding the board is full.
const MAX_PLACE_ATTEMPTS: usize = 1_000;

/// Identifies a ship within its owning [`Board`]. The grid's cell→ship
/// backreferences carry this id rather than any owning pointer; the board
/// alone owns the ships.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShipId(usize);

/// Result of resolving an attack against a board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AttackOutcome {
    /// The shot landed in open water.
    Miss,
    /// The shot struck the ship with the given id. Whether that sank it is
    /// a derived property; check [`Board::ship`] afterward.
    Hit(ShipId),
}

impl AttackOutcome {
    /// Get the id of the ship that was hit, if any.
    pub fn ship(&self) -> Option<ShipId> {
        match self {
            AttackOutcome::Miss => None,
            AttackOutcome::Hit(id) => Some(*id),
        }
    }
}

/// Represents a single player's board, including their ships and their side
/// of the ocean.
#[derive(Debug)]
pub struct Board {
    /// Grid of cells, each knowing its occupying ship (if any) and whether
    /// it has been struck.
    grid: Grid,

    /// Ships placed on this board, indexed by [`ShipId`].
    ships: Vec<Ship>,
}

impl Board {
    /// Construct an empty board of the given size. Panics if `size` is 0;
    /// validated configuration should come through
    /// [`GameConfig`][crate::game::GameConfig].
    pub fn new(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            ships: Vec::new(),
        }
    }

    /// The side length of this board.
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Whether the given coordinate lies on this board.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.grid.contains(coord)
    }

    /// The logical state of the cell at `coord`, or `None` out of bounds.
    pub fn cell(&self, coord: Coordinate) -> Option<CellState> {
        self.grid.get(coord).map(|cell| cell.state())
    }

    /// The ship occupying `coord`, if any.
    pub fn ship_at(&self, coord: Coordinate) -> Option<ShipId> {
        self.grid.get(coord).and_then(|cell| cell.ship)
    }

    /// Get the ship with the given id.
    pub fn ship(&self, id: ShipId) -> &Ship {
        &self.ships[id.0]
    }

    /// Iterate all ships placed on this board.
    pub fn ships(&self) -> impl Iterator<Item = (ShipId, &Ship)> {
        self.ships
            .iter()
            .enumerate()
            .map(|(i, ship)| (ShipId(i), ship))
    }

    /// Iterate the board's cell states row by row, for display.
    pub fn rows<'a>(&'a self) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = CellState>> {
        let size = self.grid.size();
        (0..size).map(move |row| {
            (0..size).map(move |col| self.grid[Coordinate::new(row, col)].state())
        })
    }

    /// Attempt to place a ship with the given origin and orientation.
    ///
    /// The ship occupies `spec.length()` contiguous cells extending right
    /// (horizontal) or down (vertical) from `origin`. Placement fails with
    /// [`PlaceError::OutOfBounds`] if any cell leaves the grid, and with
    /// [`PlaceError::Overlap`] if any cell or any of its eight neighbors is
    /// occupied: fleets may not touch, even diagonally. On failure the
    /// board is left untouched.
    pub fn place(
        &mut self,
        spec: ShipSpec,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipId, PlaceError> {
        let mut cells = Vec::with_capacity(spec.length());
        for i in 0..spec.length() {
            let cell = match orientation {
                Orientation::Horizontal => Coordinate::new(origin.row, origin.col + i),
                Orientation::Vertical => Coordinate::new(origin.row + i, origin.col),
            };
            if !self.grid.contains(cell) {
                return Err(PlaceError::OutOfBounds);
            }
            cells.push(cell);
        }

        // Validate every cell before mutating anything so a failed
        // placement leaves no trace.
        for &cell in &cells {
            if self.grid[cell].ship.is_some() {
                return Err(PlaceError::Overlap);
            }
            for neighbor in self.grid.neighbors(cell) {
                if self.grid[neighbor].ship.is_some() {
                    return Err(PlaceError::Overlap);
                }
            }
        }

        let id = ShipId(self.ships.len());
        for &cell in &cells {
            self.grid[cell].ship = Some(id);
        }
        debug!(
            "placed {} ({} cells) at {} {:?}",
            spec.name(),
            spec.length(),
            origin,
            orientation
        );
        self.ships.push(Ship::new(spec, cells));
        Ok(id)
    }

    /// Place a ship at a uniformly sampled origin and orientation, retrying
    /// until placement succeeds.
    ///
    /// Attempts are bounded; exhausting them yields
    /// [`PlaceError::BoardFull`], which means the configured fleet cannot
    /// fit the board and should be treated as fatal rather than retried.
    pub fn place_random<R: Rng>(
        &mut self,
        rng: &mut R,
        spec: ShipSpec,
    ) -> Result<ShipId, PlaceError> {
        let size = self.grid.size();
        for _ in 0..MAX_PLACE_ATTEMPTS {
            let origin = Coordinate::new(rng.gen_range(0, size), rng.gen_range(0, size));
            let orientation = rng.gen();
            match self.place(spec.clone(), origin, orientation) {
                Ok(id) => return Ok(id),
                Err(PlaceError::OutOfBounds) | Err(PlaceError::Overlap) => continue,
                Err(PlaceError::BoardFull) => unreachable!(),
            }
        }
        Err(PlaceError::BoardFull)
    }

    /// Resolve an attack against the cell at `target`.
    ///
    /// A ship cell registers a hit on that ship and the cell is marked
    /// struck; open water is marked as a miss. Re-attacking a cell is
    /// permitted and idempotent: it returns the same outcome without
    /// changing any state. Rejecting duplicate shots is the attacker's
    /// concern (tracked in their shot history), not the board's.
    pub fn receive_attack(
        &mut self,
        target: Coordinate,
    ) -> Result<AttackOutcome, AttackError> {
        debug_assert!(
            !self.ships.is_empty(),
            "attack resolved against a board with no fleet"
        );
        let cell = match self.grid.get_mut(target) {
            None => return Err(AttackError::InvalidCoordinate(target)),
            Some(cell) => cell,
        };
        cell.struck = true;
        match cell.ship {
            None => Ok(AttackOutcome::Miss),
            Some(id) => {
                self.ships[id.0].register_hit(target);
                Ok(AttackOutcome::Hit(id))
            }
        }
    }

    /// Returns true once every ship on this board has been sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(|ship| ship.is_sunk())
    }
}
