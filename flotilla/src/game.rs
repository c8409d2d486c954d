//! The match itself: the setup phase, the alternating combat phase, and the
//! session wrapper that owns replays and the win tally.
//!
//! Phases are expressed as types. [`MatchSetup`] walks both players through
//! the roster in specification order and, once every ship is down,
//! [`MatchSetup::start`] consumes it into a [`Match`]. A match whose
//! [`Match::winner`] is set is over; playing again means asking the
//! [`Session`] for a fresh setup.

use log::info;
use rand::Rng;
use thiserror::Error;

use crate::board::{AttackOutcome, PlaceError, ShipId};
use crate::coord::Coordinate;
use crate::player::{PlacementStrategy, Player};
use crate::ships::{Orientation, Roster, ShipSpec};

pub use self::session::{ConfigError, GameConfig, Session, MAX_BOARD_SIZE};

mod session;

/// Reason why a shot could not be taken.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum FireError {
    /// The target does not lie on the board.
    #[error("target {0} is outside the board")]
    OutOfRange(Coordinate),

    /// The attacker has already targeted that cell. Rejected without
    /// consuming the turn.
    #[error("{0} has already been targeted")]
    DuplicateTarget(Coordinate),

    /// The match is already decided.
    #[error("the match is already over")]
    GameOver,
}

/// Outcome of a successfully taken shot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// Nothing was hit.
    Miss,
    /// The given ship was hit but not sunk.
    Hit(ShipId),
    /// The given ship was hit and sunk, but the defender has ships left.
    Sunk(ShipId),
    /// The given ship was hit and sunk, and with it the defender's last
    /// ship: the attacker has won.
    Victory(ShipId),
}

impl ShotOutcome {
    /// Get the id of the ship that was hit, if any.
    pub fn ship(&self) -> Option<ShipId> {
        match self {
            ShotOutcome::Miss => None,
            ShotOutcome::Hit(id) | ShotOutcome::Sunk(id) | ShotOutcome::Victory(id) => Some(*id),
        }
    }
}

/// The setup phase of a match. Ships are placed one at a time in roster
/// order, player 0 first; a failed placement leaves the walk where it was
/// so the same request can be re-solicited and retried.
#[derive(Debug)]
pub struct MatchSetup {
    players: [Player; 2],
    roster: Roster,

    /// Player currently placing.
    current: usize,
    /// Position in the roster of the next ship the current player places.
    next_ship: usize,
    complete: bool,
}

impl MatchSetup {
    /// Begin setup for a match between the two named players on boards
    /// sized by `config`.
    pub fn new(config: &GameConfig, players: [(&str, PlacementStrategy); 2]) -> Self {
        let size = config.size();
        let [(name0, strat0), (name1, strat1)] = players;
        Self {
            players: [
                Player::new(name0, size, strat0),
                Player::new(name1, size, strat1),
            ],
            roster: config.roster().clone(),
            current: 0,
            next_ship: 0,
            complete: false,
        }
    }

    /// The roster being placed.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Get the player with the given index (0 or 1).
    pub fn player(&self, index: usize) -> &Player {
        &self.players[index]
    }

    /// Index of the player currently placing ships, or `None` once both
    /// fleets are complete.
    pub fn setup_player(&self) -> Option<usize> {
        if self.complete {
            None
        } else {
            Some(self.current)
        }
    }

    /// The specification the current setup player places next, or `None`
    /// once both fleets are complete.
    pub fn next_ship(&self) -> Option<&ShipSpec> {
        if self.complete {
            None
        } else {
            self.roster.get(self.next_ship)
        }
    }

    /// Whether the given player has placed their whole roster.
    pub fn is_player_ready(&self, index: usize) -> bool {
        self.players[index].fleet().ships().count() == self.roster.len()
    }

    /// Whether both fleets are complete and the match can start.
    pub fn ready(&self) -> bool {
        self.complete
    }

    /// Place the current player's next ship at the given position.
    ///
    /// On success the walk advances to the next roster entry (or the next
    /// player). On failure nothing advances: the request is expected to be
    /// re-solicited, never skipped.
    pub fn place_next(
        &mut self,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipId, PlaceError> {
        let spec = self
            .next_ship()
            .cloned()
            .expect("place_next called after setup completed");
        let id = self.players[self.current]
            .fleet_mut()
            .place(spec, origin, orientation)?;
        self.advance();
        Ok(id)
    }

    /// Place all of the current player's remaining ships with the bounded
    /// random strategy, advancing to the next player when their roster is
    /// done.
    ///
    /// [`PlaceError::BoardFull`] aborts the walk mid-roster; it means the
    /// configuration cannot fit and there is no point re-sampling.
    pub fn place_remaining_random<R: Rng>(&mut self, rng: &mut R) -> Result<(), PlaceError> {
        let player = match self.setup_player() {
            Some(player) => player,
            None => return Ok(()),
        };
        while !self.complete && self.current == player {
            let spec = self
                .roster
                .get(self.next_ship)
                .cloned()
                .expect("roster walk out of range");
            self.players[player].fleet_mut().place_random(rng, spec)?;
            self.advance();
        }
        Ok(())
    }

    fn advance(&mut self) {
        self.next_ship += 1;
        if self.next_ship == self.roster.len() {
            if self.current == 0 {
                self.current = 1;
                self.next_ship = 0;
            } else {
                self.complete = true;
            }
        }
    }

    /// Tries to start the match. If both fleets are fully placed, returns
    /// a [`Match`] with player 0 to act; otherwise returns `self`.
    pub fn start(self) -> Result<Match, Self> {
        if !self.ready() {
            Err(self)
        } else {
            Ok(Match {
                players: self.players,
                current: 0,
                winner: None,
            })
        }
    }
}

/// The combat phase. Turns strictly alternate, hit or miss, until one
/// fleet is fully sunk.
#[derive(Debug)]
pub struct Match {
    players: [Player; 2],
    current: usize,
    winner: Option<usize>,
}

impl Match {
    /// Index of the player whose turn it is.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Index of the player being shot at this turn.
    pub fn opponent(&self) -> usize {
        1 - self.current
    }

    /// Get the player with the given index (0 or 1).
    pub fn player(&self, index: usize) -> &Player {
        &self.players[index]
    }

    /// The winning player's index, or `None` while the match is live.
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    /// Take the current player's shot at `target` on the opponent's board.
    ///
    /// Checks run in order: the match must be live, the target must be on
    /// the board, and the attacker must not have targeted it before.
    /// Duplicate requests are rejected without consuming the turn, which
    /// also covers shots at ships that are already wrecks. The attacker's
    /// shot log records the outcome, a sinking upgrades every cell of the
    /// sunk ship in that log, and the turn passes to the opponent unless
    /// the shot just won the match.
    pub fn fire(&mut self, target: Coordinate) -> Result<ShotOutcome, FireError> {
        if self.winner.is_some() {
            return Err(FireError::GameOver);
        }
        let attacker = self.current;
        let defender = self.opponent();
        if !self.players[attacker].shots().contains(target) {
            return Err(FireError::OutOfRange(target));
        }
        if self.players[attacker].shots().already_targeted(target) {
            return Err(FireError::DuplicateTarget(target));
        }

        let outcome = match self.players[defender].fleet_mut().receive_attack(target) {
            Ok(outcome) => outcome,
            // Bounds were checked against the shot log, which mirrors the
            // defender's grid.
            Err(_) => unreachable!(),
        };

        match outcome {
            AttackOutcome::Miss => {
                self.players[attacker].shots_mut().record_miss(target);
                self.current = defender;
                Ok(ShotOutcome::Miss)
            }
            AttackOutcome::Hit(id) => {
                self.players[attacker].shots_mut().record_hit(target);
                if self.players[defender].fleet().ship(id).is_sunk() {
                    let cells = self.players[defender].fleet().ship(id).cells().to_vec();
                    self.players[attacker].shots_mut().record_sunk(&cells);
                    info!(
                        "{} sank {}'s {}",
                        self.players[attacker].name(),
                        self.players[defender].name(),
                        self.players[defender].fleet().ship(id).name()
                    );
                    if self.players[defender].fleet().all_sunk() {
                        info!("{} wins the match", self.players[attacker].name());
                        self.winner = Some(attacker);
                        return Ok(ShotOutcome::Victory(id));
                    }
                    self.current = defender;
                    return Ok(ShotOutcome::Sunk(id));
                }
                self.current = defender;
                Ok(ShotOutcome::Hit(id))
            }
        }
    }
}
