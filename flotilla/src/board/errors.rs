//! Errors used by the [`Board`][crate::board::Board] operations.

use thiserror::Error;

use crate::coord::Coordinate;

/// Reason why a ship could not be placed at the requested position.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum PlaceError {
    /// Part of the ship would extend past the edge of the board.
    #[error("the ship would extend past the edge of the board")]
    OutOfBounds,

    /// The ship would overlap another ship or touch one, diagonals
    /// included.
    #[error("the ship would overlap or touch another ship")]
    Overlap,

    /// Random placement exhausted its attempt cap; the fleet does not fit
    /// this board. Unlike the other variants this is not recoverable by
    /// retrying with different input.
    #[error("no position could fit the ship; the fleet is too large for this board")]
    BoardFull,
}

/// Error returned when an attack targets a cell outside the grid.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum AttackError {
    /// The target does not lie on the board.
    #[error("target {0} is outside the board")]
    InvalidCoordinate(Coordinate),
}
