//! League state: everything the team generator remembers between sessions.
//!
//! [`League`] is the application context. It owns the roster, the pairing
//! ledger, the archive of committed sessions, the not-yet-committed teams and
//! any saved seasons, and it is passed explicitly to whatever drives it (the
//! CLI loads it from and saves it to a JSON file).
//!
//! # Session Flow
//!
//! 1. Maintain the roster ([`League::roster_mut`], [`roster_csv`] import)
//! 2. [`League::compose`] draws teams and keeps them as pending
//! 3. [`League::commit`] archives the pending teams and folds their pairings
//!    into the ledger, so the next compose avoids them
//!
//! Until a commit, composing again simply replaces the pending teams.

pub use self::{archive::*, league::*, season::*};

mod archive;
mod league;
pub mod roster_csv;
mod season;
