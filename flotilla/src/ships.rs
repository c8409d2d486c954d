//! Ship specifications, the fleet roster, and placed ships.

use std::collections::HashSet;

use rand::{
    distributions::{Distribution, Standard},
    Rng,
};
use thiserror::Error;

use crate::coord::Coordinate;

/// Placement orientation of a ship: extending right or down from its origin.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Distribution<Orientation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        if rng.gen() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// Error raised when building a [`ShipSpec`] or [`Roster`] from bad
/// configuration. Rosters are validated up front so that placement never has
/// to deal with degenerate ships.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum RosterError {
    /// A ship was specified with length 0.
    #[error("ship {name:?} has invalid length {length}; ships must be at least 1 cell long")]
    InvalidLength { name: String, length: usize },

    /// The roster contained no ships at all.
    #[error("a fleet roster must contain at least one ship")]
    Empty,
}

/// Specification of a single ship: its display name and its length in cells.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ShipSpec {
    name: String,
    length: usize,
}

impl ShipSpec {
    /// Create a ship specification. Lengths below 1 are a configuration
    /// error.
    pub fn new(name: impl Into<String>, length: usize) -> Result<Self, RosterError> {
        let name = name.into();
        if length == 0 {
            Err(RosterError::InvalidLength { name, length })
        } else {
            Ok(Self { name, length })
        }
    }

    /// The ship's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ship's length in cells.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// The ordered list of ships each player places during setup.
#[derive(Debug, Clone)]
pub struct Roster {
    ships: Vec<ShipSpec>,
}

impl Roster {
    /// Build a roster from the given specifications. The roster must be
    /// non-empty.
    pub fn new(ships: Vec<ShipSpec>) -> Result<Self, RosterError> {
        if ships.is_empty() {
            Err(RosterError::Empty)
        } else {
            Ok(Self { ships })
        }
    }

    /// Build a roster from `(name, length)` pairs, validating each entry.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = (&'a str, usize)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, length)| ShipSpec::new(name, length))
                .collect::<Result<_, _>>()?,
        )
    }

    /// Number of ships in the roster.
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// The specification at the given position, in placement order.
    pub fn get(&self, index: usize) -> Option<&ShipSpec> {
        self.ships.get(index)
    }

    /// Iterate the specifications in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &ShipSpec> {
        self.ships.iter()
    }

    /// Total number of cells the roster occupies once placed.
    pub fn total_cells(&self) -> usize {
        self.ships.iter().map(|spec| spec.length()).sum()
    }
}

impl Default for Roster {
    /// The classic fleet: Aircraft Carrier 5, Battleship 4, Cruiser 3,
    /// Submarine 3, Minesweeper 2.
    fn default() -> Self {
        // The classic lengths are all nonzero, so validation cannot fail.
        Self::from_pairs(vec![
            ("Aircraft Carrier", 5),
            ("Battleship", 4),
            ("Cruiser", 3),
            ("Submarine", 3),
            ("Minesweeper", 2),
        ])
        .unwrap()
    }
}

/// A ship placed on a board: its specification, the cells it occupies, and
/// the subset of those cells that have been hit.
///
/// The cell list is fixed at placement; the hit set only ever grows.
#[derive(Debug, Clone)]
pub struct Ship {
    spec: ShipSpec,
    cells: Vec<Coordinate>,
    hits: HashSet<Coordinate>,
}

impl Ship {
    pub(crate) fn new(spec: ShipSpec, cells: Vec<Coordinate>) -> Self {
        debug_assert_eq!(spec.length(), cells.len());
        Self {
            spec,
            cells,
            hits: HashSet::new(),
        }
    }

    /// The ship's display name.
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// The ship's length in cells.
    pub fn length(&self) -> usize {
        self.spec.length()
    }

    /// The cells this ship occupies, in placement order.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    /// Iterate the ship's cells along with whether each has been hit.
    pub fn hits(&self) -> impl Iterator<Item = (Coordinate, bool)> + '_ {
        self.cells
            .iter()
            .map(move |&cell| (cell, self.hits.contains(&cell)))
    }

    /// Number of distinct cells of this ship that have been hit.
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    /// Record a hit on the given cell. Idempotent.
    pub(crate) fn register_hit(&mut self, cell: Coordinate) {
        debug_assert!(
            self.cells.contains(&cell),
            "hit registered on a cell the ship does not occupy"
        );
        self.hits.insert(cell);
    }

    /// A ship is sunk once every one of its cells has been hit.
    pub fn is_sunk(&self) -> bool {
        self.hits.len() == self.cells.len()
    }
}
