//! Rules engine for the classic game Battleship.
//!
//! The crate is the part of the game with actual rules in it: fleet
//! placement validation (boundary checks plus the no-touching rule,
//! diagonals included), attack resolution, and the strictly alternating
//! two-player match. Everything that prompts, draws, or parses command
//! lines lives in front-end collaborators that feed validated coordinates
//! in and render the typed outcomes that come back.
//!
//! The pieces, leaves first:
//!
//! - [`coord`] converts between `"D10"`-style call signs and zero-based
//!   `(row, col)` pairs.
//! - [`ships`] defines ship specifications, the validated fleet [`Roster`],
//!   and placed [`Ship`]s with their hit sets.
//! - [`board`] owns the grid and enforces placement and attack rules.
//! - [`player`] pairs a fleet board with the player's shot history.
//! - [`game`] runs a match through its phases ([`MatchSetup`] into
//!   [`Match`]), and the [`Session`] keeps the win tally across replays.
//!
//! [`Roster`]: ships::Roster
//! [`Ship`]: ships::Ship
//! [`MatchSetup`]: game::MatchSetup
//! [`Match`]: game::Match
//! [`Session`]: game::Session

pub mod board;
pub mod coord;
pub mod game;
pub mod player;
pub mod ships;
