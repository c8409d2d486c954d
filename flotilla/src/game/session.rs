//! Session state that outlives a single match: the rules configuration and
//! the running win tally.

use std::collections::HashMap;

use thiserror::Error;

use crate::player::PlacementStrategy;
use crate::ships::Roster;

use super::MatchSetup;

/// Largest supported board. Row labels stay single letters and the classic
/// call signs stay readable.
pub const MAX_BOARD_SIZE: usize = 26;

/// Error raised by invalid game configuration.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum ConfigError {
    /// The board size was 0 or larger than [`MAX_BOARD_SIZE`].
    #[error("board size must be between 1 and 26, got {0}")]
    InvalidSize(usize),
}

/// The rules a session plays by: board size and fleet roster. Both are
/// configuration inputs, not constants of the engine.
#[derive(Debug, Clone)]
pub struct GameConfig {
    size: usize,
    roster: Roster,
}

impl GameConfig {
    /// Build a configuration with the given board size and roster.
    pub fn new(size: usize, roster: Roster) -> Result<Self, ConfigError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            Err(ConfigError::InvalidSize(size))
        } else {
            Ok(Self { size, roster })
        }
    }

    /// The board side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The fleet each player places.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

impl Default for GameConfig {
    /// The classic game: a 10×10 board and the five-ship fleet.
    fn default() -> Self {
        Self {
            size: 10,
            roster: Roster::default(),
        }
    }
}

/// Owns a series of matches played by the same configuration, plus the win
/// tally that survives between them.
///
/// Each game gets a fresh [`MatchSetup`]; only the tally persists, keyed by
/// player name.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    tally: HashMap<String, u32>,
}

impl Session {
    /// Start a session with the given configuration.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            tally: HashMap::new(),
        }
    }

    /// The configuration every match in this session uses.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the setup for a fresh match, registering both names in the
    /// tally so the scoreboard lists them even before their first win.
    pub fn new_match(&mut self, players: [(&str, PlacementStrategy); 2]) -> MatchSetup {
        for (name, _) in &players {
            self.tally.entry((*name).to_owned()).or_insert(0);
        }
        MatchSetup::new(&self.config, players)
    }

    /// Credit a win to the named player.
    pub fn record_win(&mut self, name: &str) {
        *self.tally.entry(name.to_owned()).or_insert(0) += 1;
    }

    /// Wins recorded for the named player this session.
    pub fn wins(&self, name: &str) -> u32 {
        self.tally.get(name).copied().unwrap_or(0)
    }

    /// The scoreboard, most wins first, ties by name.
    pub fn standings(&self) -> Vec<(&str, u32)> {
        let mut standings: Vec<_> = self
            .tally
            .iter()
            .map(|(name, &wins)| (name.as_str(), wins))
            .collect();
        standings.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        standings
    }

    /// Clear the tally without touching the configuration.
    pub fn reset(&mut self) {
        self.tally.clear();
    }
}
