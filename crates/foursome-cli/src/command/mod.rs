use std::{io, path::PathBuf};

use clap::{Parser, Subcommand};

use crate::{store::StateFile, util};

use self::{
    compose::ComposeArg,
    data::ImportArg,
    roster::{AddArg, ImportCsvArg, RemoveArg},
    season::SeasonCommand,
};

mod compose;
mod data;
mod history;
mod roster;
mod season;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// League state file
    #[arg(
        long,
        global = true,
        env = "FOURSOME_STATE",
        default_value = "foursome.json"
    )]
    state: PathBuf,
    /// Log more (-v: info, -vv: debug); otherwise RUST_LOG applies
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// What to do
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List the roster
    Players,
    /// Add a player, or update the handicap of a player with the same name
    Add(#[clap(flatten)] AddArg),
    /// Remove a player by id
    Remove(#[clap(flatten)] RemoveArg),
    /// Remove every player from the roster
    ClearPlayers(#[clap(flatten)] ConfirmArg),
    /// Replace the roster with players read from CSV
    ImportCsv(#[clap(flatten)] ImportCsvArg),
    /// Write the roster as CSV
    ExportCsv(#[clap(flatten)] OutputArg),
    /// Compose teams for the current roster
    Compose(#[clap(flatten)] ComposeArg),
    /// Show the composed teams waiting to be committed
    Teams,
    /// Commit the composed teams to history
    Commit,
    /// Show committed sessions, newest first
    History,
    /// Show who each player has played with most
    Stats,
    /// Delete all committed sessions and pairing counts
    ResetHistory(#[clap(flatten)] ConfirmArg),
    /// Manage saved seasons
    #[command(subcommand)]
    Season(SeasonCommand),
    /// Export all league data as JSON
    Export(#[clap(flatten)] OutputArg),
    /// Replace all league data with an exported JSON file
    Import(#[clap(flatten)] ImportArg),
}

/// Confirmation flag for commands that discard data.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfirmArg {
    /// Confirm that data will be discarded
    #[arg(long)]
    yes: bool,
}

impl ConfirmArg {
    fn require(&self, what: &str) -> anyhow::Result<()> {
        if !self.yes {
            anyhow::bail!("this will {what}; re-run with --yes to confirm");
        }
        Ok(())
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct OutputArg {
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl OutputArg {
    fn open(&self) -> anyhow::Result<Box<dyn io::Write>> {
        util::create_output(self.output.as_deref())
    }

    fn target(&self) -> String {
        self.output
            .as_ref()
            .map_or_else(|| "stdout".to_owned(), |path| path.display().to_string())
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_tracing(args.verbose);

    let state = StateFile::new(args.state);
    match args.mode.unwrap_or(Mode::Players) {
        Mode::Players => roster::run_list(&state)?,
        Mode::Add(arg) => roster::run_add(&arg, &state)?,
        Mode::Remove(arg) => roster::run_remove(&arg, &state)?,
        Mode::ClearPlayers(arg) => roster::run_clear(&arg, &state)?,
        Mode::ImportCsv(arg) => roster::run_import_csv(&arg, &state)?,
        Mode::ExportCsv(arg) => roster::run_export_csv(&arg, &state)?,
        Mode::Compose(arg) => compose::run_compose(&arg, &state)?,
        Mode::Teams => compose::run_show(&state)?,
        Mode::Commit => compose::run_commit(&state)?,
        Mode::History => history::run_history(&state)?,
        Mode::Stats => history::run_stats(&state)?,
        Mode::ResetHistory(arg) => history::run_reset(&arg, &state)?,
        Mode::Season(command) => season::run(&command, &state)?,
        Mode::Export(arg) => data::run_export(&arg, &state)?,
        Mode::Import(arg) => data::run_import(&arg, &state)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_compose_options() {
        let args = CommandArgs::try_parse_from([
            "foursome",
            "--state",
            "league.json",
            "compose",
            "--group-size",
            "3",
            "--trials",
            "200",
            "--seed",
            "0123456789abcdeffedcba9876543210",
        ])
        .unwrap();
        assert_eq!(args.state, PathBuf::from("league.json"));
        assert!(matches!(args.mode, Some(Mode::Compose(_))));
    }

    #[test]
    fn test_parse_rejects_bad_seed() {
        let result = CommandArgs::try_parse_from(["foursome", "compose", "--seed", "xyz"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_confirm_required() {
        let arg = ConfirmArg::default();
        let err = arg.require("delete everything").unwrap_err();
        assert!(err.to_string().contains("--yes"));
        assert!(ConfirmArg { yes: true }.require("delete everything").is_ok());
    }
}
