//! Team composition for the league team generator.
//!
//! Given the session roster and a read-only view of the pairing history, this
//! crate produces one team assignment that
//!
//! - puts exactly one player from each handicap stratum on every team, and
//! - keeps repeat pairings low by sampling a fixed number of random
//!   arrangements and keeping the one with the smallest pairing score.
//!
//! # Architecture
//!
//! ```text
//! Roster (players)
//!     ↓ sorted by handicap, cut into strata
//! Strata
//!     ↓ shuffled per stratum, dealt by position (one trial)
//! Candidate
//!     ↓ scored against
//! PairingScore (ledger snapshot)
//!     ↓ minimum over all trials
//! Composition (assignment + score)
//! ```
//!
//! # Key Components
//!
//! - [`TeamComposer`] - Runs the search; configured with group size and trial count
//! - [`Strata`] - Validated, handicap-sorted split of the roster
//! - [`Candidate`] - One trial's arrangement, borrowing the roster
//! - [`ComposeSeed`] - Seed for reproducible composition
//!
//! # Why Random Search
//!
//! Minimizing total repeat pairings exactly is a multi-dimensional matching
//! problem. The composer keeps the stratification constraint exact and only
//! approximates the pairing objective, which is cheap and always terminates
//! after `trials` draws.
//!
//! # Current Limitations
//!
//! - **No optimality guarantee**: a lucky draw is the only way to reach the best arrangement
//! - **Sequential trials**: trials are independent and could be evaluated in
//!   parallel, but a single thread is fast enough for league-sized rosters
//! - **Fixed team size**: the roster must divide evenly; nobody is benched automatically

pub use self::{composer::*, seed::*, strata::*};

mod composer;
mod seed;
mod strata;
