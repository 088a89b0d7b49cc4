use chrono::Utc;
use foursome_composer::{
    ComposeError, ComposeSeed, DEFAULT_GROUP_SIZE, DEFAULT_TRIAL_COUNT, TeamComposer,
};
use rand::Rng as _;

use crate::{store::StateFile, view};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ComposeArg {
    /// Players per team
    #[arg(long, default_value_t = DEFAULT_GROUP_SIZE)]
    group_size: usize,
    /// Number of random draws to compare
    #[arg(long, default_value_t = DEFAULT_TRIAL_COUNT)]
    trials: usize,
    /// Seed for a reproducible draw (32 hex characters); random if omitted
    #[arg(long)]
    seed: Option<ComposeSeed>,
}

pub(crate) fn run_compose(arg: &ComposeArg, state: &StateFile) -> anyhow::Result<()> {
    let ComposeArg {
        group_size,
        trials,
        seed,
    } = arg;

    let composer = TeamComposer::new()
        .with_group_size(*group_size)
        .with_trials(*trials);
    let seed = seed.unwrap_or_else(|| rand::rng().random());

    let mut league = state.load()?;
    let pending = match league.compose(&composer, seed, Utc::now()) {
        Ok(pending) => pending.clone(),
        Err(err) => return Err(explain(err)),
    };
    state.save(&league)?;

    print!("{}", view::pending(&pending));
    println!("Run `commit` to record these teams.");
    Ok(())
}

pub(crate) fn run_show(state: &StateFile) -> anyhow::Result<()> {
    let league = state.load()?;
    match league.pending() {
        Some(pending) => print!("{}", view::pending(pending)),
        None => println!("No pending teams. Run `compose` first."),
    }
    Ok(())
}

pub(crate) fn run_commit(state: &StateFile) -> anyhow::Result<()> {
    let mut league = state.load()?;
    let teams = league.commit(Utc::now())?.assignment.len();
    let sessions = league.archive().len();
    state.save(&league)?;
    println!("Committed {teams} team(s) as session {sessions}.");
    Ok(())
}

fn explain(err: ComposeError) -> anyhow::Error {
    match (err.players_to_add(), err.players_to_remove()) {
        (Some(add), Some(remove)) => {
            anyhow::anyhow!("{err}; add {add} or remove {remove} player(s)")
        }
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uneven_roster_suggests_fix() {
        let err = explain(ComposeError::UnevenRoster {
            players: 10,
            group_size: 4,
        });
        assert!(err.to_string().ends_with("add 2 or remove 2 player(s)"));
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = explain(ComposeError::InsufficientPlayers {
            players: 3,
            group_size: 4,
        });
        assert_eq!(
            err.to_string(),
            "need at least 4 players to form a team, got 3"
        );
    }
}
