use super::ConfirmArg;
use crate::{store::StateFile, view};

pub(crate) fn run_history(state: &StateFile) -> anyhow::Result<()> {
    let league = state.load()?;
    print!("{}", view::history(league.archive()));
    Ok(())
}

pub(crate) fn run_stats(state: &StateFile) -> anyhow::Result<()> {
    let league = state.load()?;
    print!("{}", view::partner_stats(league.roster(), league.ledger()));
    Ok(())
}

pub(crate) fn run_reset(arg: &ConfirmArg, state: &StateFile) -> anyhow::Result<()> {
    arg.require("delete every committed session and all pairing counts")?;
    let mut league = state.load()?;
    let sessions = league.archive().len();
    league.reset_history();
    state.save(&league)?;
    println!("Deleted {sessions} session(s). The roster was kept.");
    Ok(())
}
