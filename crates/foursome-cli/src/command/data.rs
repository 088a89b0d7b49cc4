use std::path::PathBuf;

use chrono::Utc;
use foursome_league::{League, LeagueExport};

use super::{ConfirmArg, OutputArg};
use crate::{store::StateFile, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ImportArg {
    /// JSON file written by `export`
    path: PathBuf,
    #[clap(flatten)]
    confirm: ConfirmArg,
}

pub(crate) fn run_export(arg: &OutputArg, state: &StateFile) -> anyhow::Result<()> {
    let league = state.load()?;
    util::write_json(arg.open()?, &league.export(Utc::now()), &arg.target())?;
    if let Some(path) = &arg.output {
        eprintln!("Exported league data to {}", path.display());
    }
    Ok(())
}

pub(crate) fn run_import(arg: &ImportArg, state: &StateFile) -> anyhow::Result<()> {
    arg.confirm.require("replace all league data")?;
    let export = util::read_json_file::<LeagueExport>("league export", &arg.path)?;

    let mut league = League::new();
    league.import(export);
    state.save(&league)?;

    println!(
        "Imported {} player(s), {} session(s) and {} season(s) into {}.",
        league.roster().len(),
        league.archive().len(),
        league.seasons().len(),
        state.path().display()
    );
    Ok(())
}
