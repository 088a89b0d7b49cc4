use std::collections::HashSet;

use foursome_core::{Assignment, PairingScore, Player, Slot, Team, TeamMember};
use rand::{Rng, seq::SliceRandom as _};

use crate::{ComposeError, InvalidPlayerRecord};

/// A roster split into skill strata.
///
/// Players are sorted by handicap (ties keep roster order) and cut into
/// `group_size` contiguous slices of `num_teams` players each. Stratum 0 holds
/// the lowest handicaps. Every candidate drawn from the strata takes exactly
/// one player per stratum for each team, so the stratification holds for any
/// shuffle.
#[derive(Debug, Clone)]
pub struct Strata<'a> {
    strata: Vec<Vec<&'a Player>>,
}

impl<'a> Strata<'a> {
    /// Validates `players` and splits them into `group_size` strata.
    ///
    /// Checks, in order: the group size has slot labels, every handicap is
    /// finite and every id unique, there are enough players for one team, and
    /// the players divide evenly into teams.
    pub fn new(players: &'a [Player], group_size: usize) -> Result<Self, ComposeError> {
        if !(2..=Slot::LEN).contains(&group_size) {
            return Err(ComposeError::InvalidGroupSize {
                group_size,
                max: Slot::LEN,
            });
        }

        let mut seen = HashSet::with_capacity(players.len());
        for player in players {
            if !player.handicap.is_finite() {
                return Err(InvalidPlayerRecord::NonFiniteHandicap { id: player.id }.into());
            }
            if !seen.insert(player.id) {
                return Err(InvalidPlayerRecord::DuplicateId { id: player.id }.into());
            }
        }

        if players.len() < group_size {
            return Err(ComposeError::InsufficientPlayers {
                players: players.len(),
                group_size,
            });
        }
        if players.len() % group_size != 0 {
            return Err(ComposeError::UnevenRoster {
                players: players.len(),
                group_size,
            });
        }

        let mut sorted = players.iter().collect::<Vec<_>>();
        sorted.sort_by(|a, b| a.handicap.total_cmp(&b.handicap));

        let num_teams = players.len() / group_size;
        let strata = sorted
            .chunks_exact(num_teams)
            .map(<[_]>::to_vec)
            .collect();
        Ok(Self { strata })
    }

    #[must_use]
    pub fn group_size(&self) -> usize {
        self.strata.len()
    }

    #[must_use]
    pub fn num_teams(&self) -> usize {
        self.strata.first().map_or(0, Vec::len)
    }

    /// Returns the players of stratum `index`, lowest handicap first.
    #[must_use]
    pub fn stratum(&self, index: usize) -> &[&'a Player] {
        &self.strata[index]
    }

    /// Draws one trial: shuffles each stratum independently (first stratum
    /// first) and deals team `i` the `i`-th player of every stratum.
    pub fn draw<R>(&self, rng: &mut R) -> Candidate<'a>
    where
        R: Rng + ?Sized,
    {
        let strata = self
            .strata
            .iter()
            .map(|stratum| {
                let mut shuffled = stratum.clone();
                shuffled.shuffle(rng);
                shuffled
            })
            .collect();
        Candidate { strata }
    }
}

/// One candidate assignment, still borrowing the roster.
///
/// Team `i` is made of `strata[s][i]` for every stratum `s`.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    strata: Vec<Vec<&'a Player>>,
}

impl<'a> Candidate<'a> {
    #[must_use]
    pub fn num_teams(&self) -> usize {
        self.strata.first().map_or(0, Vec::len)
    }

    /// Returns the members of team `index` in slot order.
    pub fn team(&self, index: usize) -> impl Iterator<Item = &'a Player> + '_ {
        self.strata.iter().map(move |stratum| stratum[index])
    }

    /// Total pairing score of the candidate; lower is better.
    #[must_use]
    pub fn score<L>(&self, ledger: &L) -> u64
    where
        L: PairingScore + ?Sized,
    {
        (0..self.num_teams())
            .map(|i| ledger.group_score(&self.team(i).collect::<Vec<_>>()))
            .sum()
    }

    /// Materializes the candidate, tagging each member with its stratum's slot.
    #[must_use]
    pub fn to_assignment(&self) -> Assignment {
        let teams = (0..self.num_teams())
            .map(|i| {
                let members = self
                    .team(i)
                    .enumerate()
                    .map(|(s, player)| TeamMember {
                        player: player.clone(),
                        // `Strata::new` caps the number of strata at `Slot::LEN`
                        slot: Slot::from_index(s).expect("stratum index has a slot label"),
                    })
                    .collect();
                Team::new(members)
            })
            .collect();
        Assignment::new(teams)
    }
}
