use chrono::{DateTime, Utc};
use foursome_composer::{ComposeError, ComposeSeed, TeamComposer};
use foursome_core::{Assignment, PairingLedger, Roster, RosterError};
use serde::{Deserialize, Serialize};

use crate::{
    Archive, Season, SeasonId, SessionRecord,
    roster_csv::{RosterEntry, RosterImport},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LeagueError {
    #[display("there are no pending teams to commit; compose teams first")]
    NoPendingTeams,
    #[display("season name must not be empty")]
    EmptySeasonName,
    #[display("no saved season with id {id}")]
    UnknownSeason { id: SeasonId },
}

/// Teams that have been composed but not yet committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingTeams {
    pub composed_at: DateTime<Utc>,
    pub seed: ComposeSeed,
    pub score: u64,
    pub assignment: Assignment,
}

/// The whole persisted state of a league.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct League {
    roster: Roster,
    ledger: PairingLedger,
    archive: Archive,
    pending: Option<PendingTeams>,
    seasons: Vec<Season>,
    current_season: Option<String>,
}

/// Full-data export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueExport {
    pub exported_at: DateTime<Utc>,
    pub league: League,
}

impl League {
    #[must_use]
    pub fn new() -> Self {
        Self {
            roster: Roster::new(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    #[must_use]
    pub fn ledger(&self) -> &PairingLedger {
        &self.ledger
    }

    #[must_use]
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingTeams> {
        self.pending.as_ref()
    }

    /// Saved seasons, most recently saved first.
    #[must_use]
    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    /// Name of the last season loaded, if any.
    #[must_use]
    pub fn current_season(&self) -> Option<&str> {
        self.current_season.as_deref()
    }

    /// Replaces the roster with imported CSV rows.
    pub fn import_roster(&mut self, import: &RosterImport) -> Result<usize, RosterError> {
        let count = self.roster.replace(
            import
                .entries
                .iter()
                .map(|RosterEntry { name, handicap }| (name, *handicap)),
        )?;
        tracing::info!(count, skipped = import.skipped, "replaced roster from CSV");
        Ok(count)
    }

    /// Removes all players and any pending teams. History is kept.
    pub fn clear_players(&mut self) {
        self.roster.clear();
        self.pending = None;
        tracing::info!("cleared roster");
    }

    /// Composes teams for the current roster and keeps them as pending,
    /// replacing any earlier pending teams.
    pub fn compose(
        &mut self,
        composer: &TeamComposer,
        seed: ComposeSeed,
        now: DateTime<Utc>,
    ) -> Result<&PendingTeams, ComposeError> {
        let composition = composer.compose_with_seed(self.roster.players(), &self.ledger, seed)?;
        Ok(self.pending.insert(PendingTeams {
            composed_at: now,
            seed,
            score: composition.score,
            assignment: composition.assignment,
        }))
    }

    /// Archives the pending teams and adds their pairings to the ledger.
    pub fn commit(&mut self, now: DateTime<Utc>) -> Result<&SessionRecord, LeagueError> {
        let pending = self.pending.take().ok_or(LeagueError::NoPendingTeams)?;
        self.ledger.record(&pending.assignment);
        tracing::info!(
            teams = pending.assignment.len(),
            sessions = self.archive.len() + 1,
            "committed session"
        );
        Ok(self.archive.push(SessionRecord {
            recorded_at: now,
            seed: pending.seed,
            score: pending.score,
            assignment: pending.assignment,
        }))
    }

    /// Forgets all committed sessions and pairing counts.
    pub fn reset_history(&mut self) {
        self.archive.clear();
        self.ledger.reset();
        self.pending = None;
        tracing::info!("reset pairing history");
    }

    /// Saves a snapshot of the roster and history under `name`.
    pub fn save_season(&mut self, name: &str, now: DateTime<Utc>) -> Result<SeasonId, LeagueError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeagueError::EmptySeasonName);
        }
        let id = SeasonId(self.seasons.iter().map(|s| s.id.0).max().unwrap_or(0) + 1);
        self.seasons.insert(
            0,
            Season {
                id,
                name: name.to_owned(),
                saved_at: now,
                roster: self.roster.clone(),
                archive: self.archive.clone(),
                ledger: self.ledger.clone(),
            },
        );
        tracing::info!(%id, name, "saved season");
        Ok(id)
    }

    /// Replaces the roster and history with a saved season.
    pub fn load_season(&mut self, id: SeasonId) -> Result<&Season, LeagueError> {
        let season = self
            .seasons
            .iter()
            .find(|s| s.id == id)
            .ok_or(LeagueError::UnknownSeason { id })?;
        self.roster = season.roster.clone();
        self.archive = season.archive.clone();
        self.ledger = season.ledger.clone();
        self.current_season = Some(season.name.clone());
        self.pending = None;
        tracing::info!(%id, name = %season.name, "loaded season");
        Ok(season)
    }

    pub fn delete_season(&mut self, id: SeasonId) -> Result<Season, LeagueError> {
        let index = self
            .seasons
            .iter()
            .position(|s| s.id == id)
            .ok_or(LeagueError::UnknownSeason { id })?;
        let season = self.seasons.remove(index);
        tracing::info!(%id, name = %season.name, "deleted season");
        Ok(season)
    }

    #[must_use]
    pub fn export(&self, now: DateTime<Utc>) -> LeagueExport {
        LeagueExport {
            exported_at: now,
            league: self.clone(),
        }
    }

    /// Replaces the whole league with an exported one. Pending teams are dropped.
    pub fn import(&mut self, export: LeagueExport) {
        *self = export.league;
        self.pending = None;
        tracing::info!(exported_at = %export.exported_at, "imported league data");
    }
}
