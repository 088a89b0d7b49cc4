use serde::{Deserialize, Serialize};

/// Stable identifier of a league player.
///
/// Identifiers are allocated by [`Roster`](crate::Roster) and are never reused,
/// so pairing history keyed by them stays valid across sessions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

/// A league member.
///
/// Lower handicap means a stronger player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub handicap: f64,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, handicap: f64) -> Self {
        Self {
            id,
            name: name.into(),
            handicap,
        }
    }
}
