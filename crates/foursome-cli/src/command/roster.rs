use std::{fs::File, io, path::PathBuf};

use anyhow::Context;
use foursome_core::{PlayerId, RosterChange};
use foursome_league::roster_csv;

use super::{ConfirmArg, OutputArg};
use crate::{store::StateFile, view};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AddArg {
    /// Player name
    name: String,
    /// Player handicap
    #[arg(allow_negative_numbers = true)]
    handicap: f64,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RemoveArg {
    /// Id of the player to remove
    id: PlayerId,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ImportCsvArg {
    /// CSV file with name and handicap columns
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    path: Option<PathBuf>,
    /// CSV given inline instead of as a file
    #[arg(long)]
    text: Option<String>,
}

pub(crate) fn run_list(state: &StateFile) -> anyhow::Result<()> {
    let league = state.load()?;
    print!("{}", view::roster_table(league.roster()));
    Ok(())
}

pub(crate) fn run_add(arg: &AddArg, state: &StateFile) -> anyhow::Result<()> {
    let AddArg { name, handicap } = arg;

    let mut league = state.load()?;
    let change = league.roster_mut().add_or_update(name, *handicap)?;
    state.save(&league)?;

    match change {
        RosterChange::Added(id) => println!("Added {} as player {id}.", name.trim()),
        RosterChange::Updated { id, previous } => {
            println!(
                "Updated player {id} ({}): handicap {previous:.1} -> {handicap:.1}.",
                name.trim()
            );
        }
    }
    Ok(())
}

pub(crate) fn run_remove(arg: &RemoveArg, state: &StateFile) -> anyhow::Result<()> {
    let mut league = state.load()?;
    let player = league.roster_mut().remove(arg.id)?;
    state.save(&league)?;
    println!("Removed {} (player {}).", player.name, player.id);
    Ok(())
}

pub(crate) fn run_clear(arg: &ConfirmArg, state: &StateFile) -> anyhow::Result<()> {
    arg.require("remove every player from the roster")?;
    let mut league = state.load()?;
    let count = league.roster().len();
    league.clear_players();
    state.save(&league)?;
    println!("Removed {count} player(s). History was kept.");
    Ok(())
}

pub(crate) fn run_import_csv(arg: &ImportCsvArg, state: &StateFile) -> anyhow::Result<()> {
    let import = match (&arg.path, &arg.text) {
        (Some(path), _) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
            roster_csv::parse(io::BufReader::new(file))
                .with_context(|| format!("Failed to import {}", path.display()))?
        }
        (None, Some(text)) => roster_csv::parse(text.as_bytes())?,
        (None, None) => anyhow::bail!("either a CSV path or --text is required"),
    };

    let mut league = state.load()?;
    let count = league.import_roster(&import)?;
    state.save(&league)?;

    println!("Imported {count} player(s).");
    if import.skipped > 0 {
        println!("Skipped {} row(s) without a usable name and handicap.", import.skipped);
    }
    Ok(())
}

pub(crate) fn run_export_csv(arg: &OutputArg, state: &StateFile) -> anyhow::Result<()> {
    let league = state.load()?;
    roster_csv::write(league.roster().players(), arg.open()?)
        .with_context(|| format!("Failed to write CSV to {}", arg.target()))?;
    if let Some(path) = &arg.output {
        eprintln!("Wrote {} player(s) to {}", league.roster().len(), path.display());
    }
    Ok(())
}
