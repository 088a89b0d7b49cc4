//! Core data model for the league team generator.
//!
//! This crate defines the values that flow between the roster, the team
//! composer, and the pairing history:
//!
//! - [`Player`] / [`PlayerId`] - A league member and its stable identifier
//! - [`Roster`] - The ordered set of players available for the current session
//! - [`Slot`] - The skill stratum label (A, B, C, ...) a team member was drawn from
//! - [`Team`] / [`Assignment`] - The output of one compose call
//! - [`PairingLedger`] - How many past sessions each pair of players shared a team
//!
//! The composer itself lives in `foursome-composer`; it only needs read access to
//! the ledger, expressed by the [`PairingScore`] trait.
//!
//! # Example
//!
//! ```
//! use foursome_core::{PairingLedger, PairingScore as _, Roster};
//!
//! let mut roster = Roster::new();
//! roster.add_or_update("Ann", 4.2).unwrap();
//! roster.add_or_update("Bob", 12.0).unwrap();
//!
//! let ids: Vec<_> = roster.players().iter().map(|p| p.id).collect();
//! let ledger = PairingLedger::new();
//! assert_eq!(ledger.score(ids[0], ids[1]), 0);
//! ```

pub use self::{ledger::*, player::*, roster::*, team::*};

mod ledger;
mod player;
mod roster;
mod team;
