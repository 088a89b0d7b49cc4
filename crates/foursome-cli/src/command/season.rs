use chrono::Utc;
use clap::Subcommand;
use foursome_league::SeasonId;

use super::ConfirmArg;
use crate::{store::StateFile, view};

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum SeasonCommand {
    /// List saved seasons
    List,
    /// Save the current roster and history as a season
    Save {
        /// Season name
        name: String,
    },
    /// Replace the current roster and history with a saved season
    Load {
        /// Season id
        id: SeasonId,
        #[clap(flatten)]
        confirm: ConfirmArg,
    },
    /// Delete a saved season
    Delete {
        /// Season id
        id: SeasonId,
    },
}

pub(crate) fn run(command: &SeasonCommand, state: &StateFile) -> anyhow::Result<()> {
    let mut league = state.load()?;
    match command {
        SeasonCommand::List => {
            print!(
                "{}",
                view::seasons(league.seasons(), league.current_season())
            );
            return Ok(());
        }
        SeasonCommand::Save { name } => {
            let id = league.save_season(name, Utc::now())?;
            println!("Saved season {id}.");
        }
        SeasonCommand::Load { id, confirm } => {
            confirm.require("replace the current roster and history")?;
            let season = league.load_season(*id)?;
            println!(
                "Loaded season {} ({} players, {} sessions).",
                season.name,
                season.roster.len(),
                season.archive.len()
            );
        }
        SeasonCommand::Delete { id } => {
            let season = league.delete_season(*id)?;
            println!("Deleted season {}.", season.name);
        }
    }
    state.save(&league)?;
    Ok(())
}
