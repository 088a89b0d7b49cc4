use foursome_core::{Assignment, PairingScore, Player, PlayerId};
use rand::Rng;

use crate::{ComposeSeed, Strata};

/// Default number of players per team.
pub const DEFAULT_GROUP_SIZE: usize = 4;

/// Default number of random trials per compose call.
pub const DEFAULT_TRIAL_COUNT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ComposeError {
    #[display("group size must be between 2 and {max}, got {group_size}")]
    InvalidGroupSize { group_size: usize, max: usize },
    #[display("need at least {group_size} players to form a team, got {players}")]
    InsufficientPlayers { players: usize, group_size: usize },
    #[display("{players} players cannot be split evenly into teams of {group_size}")]
    UnevenRoster { players: usize, group_size: usize },
    #[display("invalid player record: {_0}")]
    InvalidPlayerRecord(InvalidPlayerRecord),
}

impl ComposeError {
    /// For [`UnevenRoster`](Self::UnevenRoster), how many players must join
    /// to complete the last team.
    #[must_use]
    pub fn players_to_add(&self) -> Option<usize> {
        match *self {
            Self::UnevenRoster {
                players,
                group_size,
            } => Some(group_size - players % group_size),
            _ => None,
        }
    }

    /// For [`UnevenRoster`](Self::UnevenRoster), how many players must sit
    /// out to drop the incomplete team.
    #[must_use]
    pub fn players_to_remove(&self) -> Option<usize> {
        match *self {
            Self::UnevenRoster {
                players,
                group_size,
            } => Some(players % group_size),
            _ => None,
        }
    }
}

impl From<InvalidPlayerRecord> for ComposeError {
    fn from(err: InvalidPlayerRecord) -> Self {
        Self::InvalidPlayerRecord(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidPlayerRecord {
    #[display("player {id} has a non-finite handicap")]
    NonFiniteHandicap { id: PlayerId },
    #[display("player id {id} appears more than once")]
    DuplicateId { id: PlayerId },
}

/// The winning trial of a compose call.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// The chosen teams.
    pub assignment: Assignment,
    /// Total pairing score of `assignment` against the ledger it was composed with.
    pub score: u64,
    /// Zero-based index of the trial that produced `assignment`.
    pub trial: usize,
}

/// Builds balanced teams that avoid repeating past pairings.
///
/// Composition is a bounded random search:
///
/// 1. Split the roster into `group_size` handicap strata (see [`Strata`])
/// 2. Run `trials` independent draws, each shuffling every stratum and dealing
///    one player per stratum to each team
/// 3. Score every draw by summing the pairing history of all co-teamed pairs
/// 4. Keep the lowest score; the earliest trial wins ties
///
/// The composer holds no state between calls. Given the same roster, ledger
/// snapshot and random stream it always returns the same teams. It does not
/// guarantee a global optimum.
///
/// # Example
///
/// ```
/// use foursome_composer::{ComposeSeed, TeamComposer};
/// use foursome_core::{PairingLedger, Roster};
///
/// let mut roster = Roster::new();
/// for (name, handicap) in [("Ann", 2.0), ("Bob", 9.5), ("Cy", 14.0), ("Dee", 21.3)] {
///     roster.add_or_update(name, handicap).unwrap();
/// }
///
/// let composer = TeamComposer::new();
/// let seed = ComposeSeed::from_bytes([7; 16]);
/// let composition = composer
///     .compose_with_seed(roster.players(), &PairingLedger::new(), seed)
///     .unwrap();
///
/// assert_eq!(composition.assignment.len(), 1);
/// assert_eq!(composition.score, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamComposer {
    group_size: usize,
    trials: usize,
}

impl Default for TeamComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamComposer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            group_size: DEFAULT_GROUP_SIZE,
            trials: DEFAULT_TRIAL_COUNT,
        }
    }

    #[must_use]
    pub const fn with_group_size(self, group_size: usize) -> Self {
        Self { group_size, ..self }
    }

    /// Sets the number of trials. At least one trial always runs.
    #[must_use]
    pub const fn with_trials(self, trials: usize) -> Self {
        let trials = if trials == 0 { 1 } else { trials };
        Self { trials, ..self }
    }

    #[must_use]
    pub const fn group_size(&self) -> usize {
        self.group_size
    }

    #[must_use]
    pub const fn trials(&self) -> usize {
        self.trials
    }

    /// Composes teams from `players`, drawing randomness from `rng`.
    ///
    /// Neither `players` nor `ledger` is modified. All validation happens
    /// before the first trial.
    pub fn compose<L, R>(
        &self,
        players: &[Player],
        ledger: &L,
        rng: &mut R,
    ) -> Result<Composition, ComposeError>
    where
        L: PairingScore + ?Sized,
        R: Rng + ?Sized,
    {
        let strata = Strata::new(players, self.group_size)?;

        let mut best = strata.draw(rng);
        let mut best_score = best.score(ledger);
        let mut best_trial = 0;
        tracing::debug!(trial = 0, score = best_score, "initial trial");

        for trial in 1..self.trials {
            let candidate = strata.draw(rng);
            let score = candidate.score(ledger);
            if score < best_score {
                tracing::debug!(trial, score, previous = best_score, "improved trial");
                best = candidate;
                best_score = score;
                best_trial = trial;
            }
        }

        tracing::info!(
            players = players.len(),
            teams = strata.num_teams(),
            trials = self.trials,
            score = best_score,
            trial = best_trial,
            "composed teams"
        );

        Ok(Composition {
            assignment: best.to_assignment(),
            score: best_score,
            trial: best_trial,
        })
    }

    /// Like [`Self::compose`], but with a seeded generator for reproducible results.
    pub fn compose_with_seed<L>(
        &self,
        players: &[Player],
        ledger: &L,
        seed: ComposeSeed,
    ) -> Result<Composition, ComposeError>
    where
        L: PairingScore + ?Sized,
    {
        self.compose(players, ledger, &mut seed.rng())
    }
}
