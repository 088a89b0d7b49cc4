use serde::{Deserialize, Serialize};

use crate::{Player, PlayerId};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum RosterError {
    #[display("player name must not be empty")]
    EmptyName,
    #[display("handicap for {name} must be a finite number, got {handicap}")]
    NonFiniteHandicap { name: String, handicap: f64 },
    #[display("no player with id {id} on the roster")]
    UnknownPlayer { id: PlayerId },
}

/// Outcome of [`Roster::add_or_update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RosterChange {
    /// A new player was appended.
    Added(PlayerId),
    /// A player with the same name (ignoring case) already existed and its
    /// handicap was overwritten.
    Updated { id: PlayerId, previous: f64 },
}

/// Ordered collection of players for the current session.
///
/// Player names are matched case-insensitively: re-adding a known name updates
/// the handicap instead of creating a second record. Identifiers are drawn
/// from a counter that only moves forward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roster {
    players: Vec<Player>,
    next_id: u64,
}

impl Roster {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            players: Vec::new(),
            next_id: 1,
        }
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Finds a player by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        let name = name.trim();
        self.players
            .iter()
            .find(|p| p.name.to_lowercase() == name.to_lowercase())
    }

    /// Returns the players sorted by handicap, strongest first.
    ///
    /// Players with equal handicaps keep their roster order.
    #[must_use]
    pub fn sorted_by_handicap(&self) -> Vec<&Player> {
        let mut players = self.players.iter().collect::<Vec<_>>();
        players.sort_by(|a, b| a.handicap.total_cmp(&b.handicap));
        players
    }

    /// Adds a player, or overwrites the handicap of an existing player with the
    /// same name.
    pub fn add_or_update(&mut self, name: &str, handicap: f64) -> Result<RosterChange, RosterError> {
        let name = validate_entry(name, handicap)?;
        if let Some(player) = self
            .players
            .iter_mut()
            .find(|p| p.name.to_lowercase() == name.to_lowercase())
        {
            let previous = player.handicap;
            player.handicap = handicap;
            tracing::debug!(id = %player.id, previous, handicap, "updated player handicap");
            return Ok(RosterChange::Updated {
                id: player.id,
                previous,
            });
        }

        let id = self.allocate_id();
        self.players.push(Player::new(id, name, handicap));
        tracing::debug!(%id, name, handicap, "added player");
        Ok(RosterChange::Added(id))
    }

    /// Removes the player with the given id and returns it.
    pub fn remove(&mut self, id: PlayerId) -> Result<Player, RosterError> {
        let index = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(RosterError::UnknownPlayer { id })?;
        Ok(self.players.remove(index))
    }

    /// Replaces the whole roster with the given `(name, handicap)` entries.
    ///
    /// An entry whose name matches a player of the previous roster keeps that
    /// player's id, so pairing history carries over. Every previous id is
    /// reused at most once. The roster is left untouched if any entry is
    /// invalid.
    pub fn replace<I, S>(&mut self, entries: I) -> Result<usize, RosterError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(name, handicap)| {
                validate_entry(name.as_ref(), handicap).map(|name| (name.to_owned(), handicap))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.next_id = self.next_id.max(self.id_floor());
        let mut previous = std::mem::take(&mut self.players);
        for (name, handicap) in entries {
            let reused = previous
                .iter()
                .position(|p| p.name.to_lowercase() == name.to_lowercase())
                .map(|index| previous.swap_remove(index).id);
            let id = reused.unwrap_or_else(|| self.allocate_id());
            self.players.push(Player::new(id, name, handicap));
        }
        Ok(self.players.len())
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    fn allocate_id(&mut self) -> PlayerId {
        let id = self.next_id.max(self.id_floor());
        self.next_id = id + 1;
        PlayerId(id)
    }

    // A roster deserialized from an older document may carry ids past the counter.
    fn id_floor(&self) -> u64 {
        self.players.iter().map(|p| p.id.0 + 1).max().unwrap_or(1)
    }
}

fn validate_entry(name: &str, handicap: f64) -> Result<&str, RosterError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RosterError::EmptyName);
    }
    if !handicap.is_finite() {
        return Err(RosterError::NonFiniteHandicap {
            name: name.to_owned(),
            handicap,
        });
    }
    Ok(name)
}
