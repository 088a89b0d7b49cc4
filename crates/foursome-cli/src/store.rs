use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context;
use foursome_league::League;

use crate::util;

/// The JSON file holding the league between invocations.
#[derive(Debug, Clone)]
pub(crate) struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the league, or starts an empty one if the file does not exist yet.
    pub(crate) fn load(&self) -> anyhow::Result<League> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no state file yet, starting empty league");
            return Ok(League::new());
        }
        util::read_json_file("league state", &self.path)
    }

    /// Writes the league to a temporary sibling file and renames it into place.
    pub(crate) fn save(&self, league: &League) -> anyhow::Result<()> {
        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        let file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create file: {}", tmp_path.display()))?;
        util::write_json(
            BufWriter::new(file),
            league,
            &tmp_path.display().to_string(),
        )?;

        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to move {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;
        tracing::debug!(path = %self.path.display(), "saved league state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_loads_empty_league() {
        let dir = TempDir::new().unwrap();
        let state = StateFile::new(dir.path().join("league.json"));
        let league = state.load().unwrap();
        assert_eq!(league, League::new());
        assert!(!state.path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let state = StateFile::new(dir.path().join("league.json"));

        let mut league = League::new();
        league.roster_mut().add_or_update("Ann", 4.5).unwrap();
        league.roster_mut().add_or_update("Bob", 12.0).unwrap();
        state.save(&league).unwrap();

        assert!(!dir.path().join("league.json.tmp").exists());
        assert_eq!(state.load().unwrap(), league);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("league.json");
        fs::write(&path, "{ not json").unwrap();
        let err = StateFile::new(path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse league state JSON file"));
    }
}
