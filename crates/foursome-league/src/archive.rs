use chrono::{DateTime, Utc};
use foursome_composer::ComposeSeed;
use foursome_core::Assignment;
use serde::{Deserialize, Serialize};

/// A committed session: the teams that actually played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// When the session was committed
    pub recorded_at: DateTime<Utc>,
    /// Seed the teams were composed with
    pub seed: ComposeSeed,
    /// Total pairing score of the teams at compose time
    pub score: u64,
    pub assignment: Assignment,
}

/// Append-only list of committed sessions, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Archive {
    sessions: Vec<SessionRecord>,
}

impl Archive {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sessions: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Iterates from the newest session to the oldest.
    pub fn iter(&self) -> impl Iterator<Item = &SessionRecord> + '_ {
        self.sessions.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&SessionRecord> {
        self.sessions.first()
    }

    pub(crate) fn push(&mut self, record: SessionRecord) -> &SessionRecord {
        self.sessions.insert(0, record);
        &self.sessions[0]
    }

    pub(crate) fn clear(&mut self) {
        self.sessions.clear();
    }
}
