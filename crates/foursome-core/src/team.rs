use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{PairingScore, Player, PlayerId};

/// Label of the skill stratum a team member was drawn from.
///
/// Stratum 0 (the lowest handicaps) is labelled `A`, stratum 1 `B`, and so on.
/// Serialized as the single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u8);

impl Slot {
    /// Number of distinct labels (`A` through `Z`).
    pub const LEN: usize = 26;

    /// Returns the slot for the given stratum index, if it has a label.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|&i| usize::from(i) < Self::LEN)
            .map(Self)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn letter(self) -> char {
        (b'A' + self.0) as char
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl Serialize for Slot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ 'A'..='Z'), None) => Ok(Self(c as u8 - b'A')),
            _ => Err(serde::de::Error::custom(format!(
                "invalid slot: expected a letter A-Z, got {s:?}"
            ))),
        }
    }
}

/// A player placed on a team, tagged with the stratum they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub player: Player,
    pub slot: Slot,
}

/// One group of players, ordered by slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team {
    members: Vec<TeamMember>,
}

impl Team {
    #[must_use]
    pub fn new(members: Vec<TeamMember>) -> Self {
        Self { members }
    }

    #[must_use]
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.members.iter().map(|m| m.player.id)
    }

    /// Returns every unordered pair of distinct members, in member order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Player, &Player)> + '_ {
        unordered_pairs(&self.members).map(|(a, b)| (&a.player, &b.player))
    }

    #[must_use]
    pub fn total_handicap(&self) -> f64 {
        self.members.iter().map(|m| m.player.handicap).sum()
    }

    /// Sum of the historical pairing counts over all pairs on this team.
    #[must_use]
    pub fn pairing_score<L>(&self, ledger: &L) -> u64
    where
        L: PairingScore + ?Sized,
    {
        let players = self.members.iter().map(|m| &m.player).collect::<Vec<_>>();
        ledger.group_score(&players)
    }
}

/// Iterates over every pair `(items[i], items[j])` with `i < j`.
pub fn unordered_pairs<T>(items: &[T]) -> impl Iterator<Item = (&T, &T)> + '_ {
    items
        .iter()
        .enumerate()
        .flat_map(|(i, a)| items[i + 1..].iter().map(move |b| (a, b)))
}

/// The teams produced by one compose call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    teams: Vec<Team>,
}

impl Assignment {
    #[must_use]
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    #[must_use]
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.teams
            .iter()
            .flat_map(|t| t.members.iter().map(|m| &m.player))
    }

    /// Sum of [`Team::pairing_score`] over all teams. Lower means fewer repeat pairings.
    #[must_use]
    pub fn pairing_score<L>(&self, ledger: &L) -> u64
    where
        L: PairingScore + ?Sized,
    {
        self.teams.iter().map(|t| t.pairing_score(ledger)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PairingLedger;

    fn team_of(ids: &[u64]) -> Team {
        Team::new(
            ids.iter()
                .enumerate()
                .map(|(i, &id)| TeamMember {
                    player: Player::new(PlayerId(id), format!("P{id}"), id as f64),
                    slot: Slot::from_index(i).unwrap(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_slot_labels() {
        assert_eq!(Slot::from_index(0).unwrap().to_string(), "A");
        assert_eq!(Slot::from_index(3).unwrap().to_string(), "D");
        assert_eq!(Slot::from_index(25).unwrap().letter(), 'Z');
        assert_eq!(Slot::from_index(26), None);
    }

    #[test]
    fn test_slot_serialization() {
        let slot = Slot::from_index(2).unwrap();
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"C\"");
        assert_eq!(serde_json::from_str::<Slot>("\"C\"").unwrap(), slot);
        assert!(serde_json::from_str::<Slot>("\"c\"").is_err());
        assert!(serde_json::from_str::<Slot>("\"AB\"").is_err());
        assert!(serde_json::from_str::<Slot>("\"\"").is_err());
    }

    #[test]
    fn test_team_pairs_covers_each_pair_once() {
        let team = team_of(&[1, 2, 3, 4]);
        let pairs = team
            .pairs()
            .map(|(a, b)| (a.id.0, b.id.0))
            .collect::<Vec<_>>();
        assert_eq!(pairs, vec![(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]);
    }

    #[test]
    fn test_unordered_pairs_edge_sizes() {
        assert_eq!(unordered_pairs::<u8>(&[]).count(), 0);
        assert_eq!(unordered_pairs(&[1]).count(), 0);
        assert_eq!(
            unordered_pairs(&['a', 'b', 'c']).collect::<Vec<_>>(),
            vec![(&'a', &'b'), (&'a', &'c'), (&'b', &'c')]
        );
    }

    #[test]
    fn test_assignment_pairing_score() {
        let mut ledger = PairingLedger::new();
        let assignment = Assignment::new(vec![team_of(&[1, 2, 3, 4]), team_of(&[5, 6, 7, 8])]);
        assert_eq!(assignment.pairing_score(&ledger), 0);

        ledger.record(&assignment);
        ledger.record(&Assignment::new(vec![team_of(&[1, 5])]));

        // every pair once, plus the extra 1-5 pairing which is not co-teamed here
        assert_eq!(assignment.pairing_score(&ledger), 12);
        assert_eq!(assignment.teams()[0].pairing_score(&ledger), 6);
    }

    #[test]
    fn test_team_total_handicap() {
        let team = team_of(&[1, 2, 3, 4]);
        assert!((team.total_handicap() - 10.0).abs() < f64::EPSILON);
    }
}
