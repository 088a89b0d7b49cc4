//! Pairing history: how often each pair of players has shared a team.
//!
//! The ledger maps an unordered pair of [`PlayerId`]s to the number of
//! committed sessions in which both players were on the same team. Pairs are
//! canonicalized by [`PairKey`] (smaller id first), so `(a, b)` and `(b, a)`
//! address the same counter. Pairs that never met have no entry and score 0.
//!
//! In JSON the ledger is an object keyed by `"<low>-<high>"`:
//!
//! ```json
//! { "1-4": 2, "3-7": 1 }
//! ```

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
};

use crate::{Assignment, Player, PlayerId, unordered_pairs};

/// Read access to pairing history.
///
/// The team composer depends only on this trait, so it can score candidates
/// against a [`PairingLedger`] snapshot or any other source of counts.
pub trait PairingScore {
    /// Returns how many times `a` and `b` have been on the same team.
    ///
    /// Argument order does not matter.
    fn score(&self, a: PlayerId, b: PlayerId) -> u32;

    /// Sums [`score`](Self::score) over every unordered pair in `players`.
    fn group_score(&self, players: &[&Player]) -> u64 {
        unordered_pairs(players)
            .map(|(a, b)| u64::from(self.score(a.id, b.id)))
            .sum()
    }
}

impl<T> PairingScore for &T
where
    T: PairingScore + ?Sized,
{
    fn score(&self, a: PlayerId, b: PlayerId) -> u32 {
        (**self).score(a, b)
    }
}

/// Canonical key of an unordered player pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    low: PlayerId,
    high: PlayerId,
}

impl PairKey {
    #[must_use]
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    #[must_use]
    pub const fn low(self) -> PlayerId {
        self.low
    }

    #[must_use]
    pub const fn high(self) -> PlayerId {
        self.high
    }

    /// Returns the other member of the pair, if `id` is one of them.
    #[must_use]
    pub fn partner_of(self, id: PlayerId) -> Option<PlayerId> {
        if self.low == id {
            Some(self.high)
        } else if self.high == id {
            Some(self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid pair key {input:?}: expected \"<id>-<id>\"")]
pub struct ParsePairKeyError {
    input: String,
}

impl FromStr for PairKey {
    type Err = ParsePairKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePairKeyError {
            input: s.to_owned(),
        };
        let (a, b) = s.split_once('-').ok_or_else(err)?;
        let a = a.parse().map_err(|_| err())?;
        let b = b.parse().map_err(|_| err())?;
        Ok(Self::new(a, b))
    }
}

impl Serialize for PairKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PairKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Accumulated pairing counts across all committed sessions.
///
/// Counts only grow through [`record`](Self::record); the only way to lower
/// them is a full [`reset`](Self::reset). The ledger is not synchronized: a
/// multi-threaded caller must serialize `record` against other access, and
/// hand the composer a snapshot (e.g. a clone) rather than a live reference
/// that may be mutated mid-search.
///
/// # Example
///
/// ```
/// use foursome_core::{Assignment, PairingLedger, PairingScore as _, Player, PlayerId, Slot, Team, TeamMember};
///
/// let member = |id, slot| TeamMember {
///     player: Player::new(PlayerId(id), format!("P{id}"), 0.0),
///     slot: Slot::from_index(slot).unwrap(),
/// };
/// let assignment = Assignment::new(vec![Team::new(vec![member(1, 0), member(2, 1)])]);
///
/// let mut ledger = PairingLedger::new();
/// ledger.record(&assignment);
/// assert_eq!(ledger.score(PlayerId(2), PlayerId(1)), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PairingLedger {
    counts: BTreeMap<PairKey, u32>,
}

impl PairingLedger {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Number of distinct pairs that have played together at least once.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over all recorded pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (PairKey, u32)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }

    /// Increments the count of every pair of distinct players that share a
    /// team in `assignment`.
    pub fn record(&mut self, assignment: &Assignment) {
        let mut touched = 0;
        for team in assignment.teams() {
            for (a, b) in team.pairs() {
                if a.id == b.id {
                    continue;
                }
                *self.counts.entry(PairKey::new(a.id, b.id)).or_insert(0) += 1;
                touched += 1;
            }
        }
        tracing::debug!(teams = assignment.len(), pairs = touched, "recorded pairings");
    }

    /// Forgets all pairing history.
    pub fn reset(&mut self) {
        self.counts.clear();
    }

    /// Returns everyone `id` has played with and how often, most frequent first.
    ///
    /// Partners with equal counts are ordered by id.
    #[must_use]
    pub fn partners_of(&self, id: PlayerId) -> Vec<(PlayerId, u32)> {
        let mut partners = self
            .counts
            .iter()
            .filter_map(|(key, &count)| key.partner_of(id).map(|p| (p, count)))
            .collect::<Vec<_>>();
        partners.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        partners
    }
}

impl PairingScore for PairingLedger {
    fn score(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.counts.get(&PairKey::new(a, b)).copied().unwrap_or(0)
    }
}

impl FromIterator<(PairKey, u32)> for PairingLedger {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (PairKey, u32)>,
    {
        let mut ledger = Self::new();
        for (key, count) in iter {
            if count > 0 {
                let total = ledger.counts.entry(key).or_insert(0);
                *total = total.saturating_add(count);
            }
        }
        ledger
    }
}

/// Keys naming the same pair (`"1-2"` and `"2-1"`) are summed, and zero
/// counts are dropped, exactly as [`FromIterator`] does.
impl<'de> Deserialize<'de> for PairingLedger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LedgerVisitor;

        impl<'de> Visitor<'de> for LedgerVisitor {
            type Value = PairingLedger;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of \"<id>-<id>\" keys to pairing counts")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<PairKey, u32>()? {
                    entries.push(entry);
                }
                Ok(entries.into_iter().collect())
            }
        }

        deserializer.deserialize_map(LedgerVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Slot, Team, TeamMember};

    fn team_of(ids: &[u64]) -> Team {
        Team::new(
            ids.iter()
                .enumerate()
                .map(|(i, &id)| TeamMember {
                    player: Player::new(PlayerId(id), format!("P{id}"), 0.0),
                    slot: Slot::from_index(i).unwrap(),
                })
                .collect(),
        )
    }

    fn id(n: u64) -> PlayerId {
        PlayerId(n)
    }

    #[test]
    fn test_pair_key_is_canonical() {
        assert_eq!(PairKey::new(id(9), id(2)), PairKey::new(id(2), id(9)));
        assert_eq!(PairKey::new(id(9), id(2)).low(), id(2));
        assert_eq!(PairKey::new(id(9), id(2)).to_string(), "2-9");
    }

    #[test]
    fn test_pair_key_parse() {
        assert_eq!("7-3".parse::<PairKey>().unwrap(), PairKey::new(id(3), id(7)));
        assert!("7".parse::<PairKey>().is_err());
        assert!("a-b".parse::<PairKey>().is_err());
        assert!("1-2-3".parse::<PairKey>().is_err());
    }

    #[test]
    fn test_score_is_symmetric() {
        let mut ledger = PairingLedger::new();
        ledger.record(&Assignment::new(vec![team_of(&[5, 1, 3])]));

        for (a, b) in [(1, 3), (1, 5), (3, 5)] {
            assert_eq!(ledger.score(id(a), id(b)), 1);
            assert_eq!(ledger.score(id(a), id(b)), ledger.score(id(b), id(a)));
        }
        assert_eq!(ledger.score(id(1), id(2)), 0);
    }

    #[test]
    fn test_record_increments_only_co_teamed_pairs() {
        let mut ledger = PairingLedger::new();
        let first = Assignment::new(vec![team_of(&[1, 2, 3, 4]), team_of(&[5, 6, 7, 8])]);
        ledger.record(&first);
        let before = ledger.clone();

        ledger.record(&Assignment::new(vec![
            team_of(&[1, 2, 3, 4]),
            team_of(&[5, 6, 7, 9]),
        ]));

        for (a, b) in [(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)] {
            assert_eq!(ledger.score(id(a), id(b)), before.score(id(a), id(b)) + 1);
        }
        // 8 did not play the second session
        assert_eq!(ledger.score(id(5), id(8)), 1);
        assert_eq!(ledger.score(id(5), id(9)), 1);
        // never co-teamed
        assert_eq!(ledger.score(id(1), id(5)), 0);
        assert_eq!(ledger.len(), 15);
    }

    #[test]
    fn test_reset_clears_all_pairs() {
        let mut ledger = PairingLedger::new();
        ledger.record(&Assignment::new(vec![team_of(&[1, 2, 3, 4])]));
        assert!(!ledger.is_empty());

        ledger.reset();

        assert!(ledger.is_empty());
        for (a, b) in [(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)] {
            assert_eq!(ledger.score(id(a), id(b)), 0);
        }
    }

    #[test]
    fn test_partners_of_sorted_by_count() {
        let mut ledger = PairingLedger::new();
        ledger.record(&Assignment::new(vec![team_of(&[1, 2, 3])]));
        ledger.record(&Assignment::new(vec![team_of(&[1, 3])]));
        ledger.record(&Assignment::new(vec![team_of(&[4, 1])]));

        assert_eq!(
            ledger.partners_of(id(1)),
            vec![(id(3), 2), (id(2), 1), (id(4), 1)]
        );
        assert!(ledger.partners_of(id(99)).is_empty());
    }

    #[test]
    fn test_ledger_json_format() {
        let mut ledger = PairingLedger::new();
        ledger.record(&Assignment::new(vec![team_of(&[10, 2])]));
        ledger.record(&Assignment::new(vec![team_of(&[2, 10])]));

        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"{"2-10":2}"#);

        let parsed: PairingLedger = serde_json::from_str(r#"{"10-2":2,"3-1":1}"#).unwrap();
        assert_eq!(parsed.score(id(2), id(10)), 2);
        assert_eq!(parsed.score(id(1), id(3)), 1);
    }

    #[test]
    fn test_ledger_json_merges_keys_of_the_same_pair() {
        let parsed: PairingLedger = serde_json::from_str(r#"{"1-2":2,"2-1":3}"#).unwrap();
        assert_eq!(parsed.score(id(1), id(2)), 5);
        assert_eq!(parsed.len(), 1);

        let merged = [
            (PairKey::new(id(1), id(2)), 2),
            (PairKey::new(id(2), id(1)), 3),
        ]
        .into_iter()
        .collect::<PairingLedger>();
        assert_eq!(parsed, merged);
    }

    #[test]
    fn test_ledger_json_drops_zero_counts() {
        let parsed: PairingLedger = serde_json::from_str(r#"{"1-2":0,"3-4":1}"#).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.score(id(1), id(2)), 0);
        assert_eq!(parsed.partners_of(id(1)), vec![]);

        let empty: PairingLedger = serde_json::from_str(r#"{"1-2":0}"#).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_ledger_rejects_malformed_keys() {
        assert!(serde_json::from_str::<PairingLedger>(r#"{"12":1}"#).is_err());
    }

    #[test]
    fn test_from_iter_merges_duplicate_keys() {
        let ledger = [
            (PairKey::new(id(1), id(2)), 2),
            (PairKey::new(id(2), id(1)), 3),
            (PairKey::new(id(3), id(4)), 0),
        ]
        .into_iter()
        .collect::<PairingLedger>();
        assert_eq!(ledger.score(id(1), id(2)), 5);
        assert_eq!(ledger.len(), 1);
    }
}
