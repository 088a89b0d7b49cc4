use chrono::{DateTime, Utc};
use foursome_core::{PairingLedger, Roster};
use serde::{Deserialize, Serialize};

use crate::Archive;

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
pub struct SeasonId(pub u64);

/// A named snapshot of the roster and its whole history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub roster: Roster,
    pub archive: Archive,
    pub ledger: PairingLedger,
}
