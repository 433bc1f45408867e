use anyhow::{anyhow, Context, Result};
use atomic_write_file::AtomicWriteFile;
use fd_lock::RwLock;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use super::types::{Team, TeamsFile, TEAMS_FILE_VERSION};
use crate::season::Season;

/// Teams file name inside each season directory
pub const TEAMS_FILE: &str = "teams.json";

/// Lock file guarding writes to a season's teams file
pub const TEAMS_LOCK_FILE: &str = "teams.lock";

/// Persistence for submitted teams.
///
/// `insert_unique` must run its existence check and insert as one step so
/// that two submissions with the same name cannot both succeed.
pub trait TeamStore {
    fn list(&self, season: Season) -> Result<Vec<Team>>;

    fn exists_by_name(&self, season: Season, name: &str) -> Result<bool> {
        Ok(self.list(season)?.iter().any(|t| t.has_name(name)))
    }

    /// Insert `team` unless its name is taken. Returns false for a duplicate.
    fn insert_unique(&self, season: Season, team: Team) -> Result<bool>;

    /// Overwrite a season's teams
    fn replace_all(&self, season: Season, teams: &[Team]) -> Result<()>;
}

/// Get the teams file path for a season (<data_root>/<season>/teams.json)
pub fn get_teams_path(data_root: &Path, season: Season) -> PathBuf {
    season.data_dir(data_root).join(TEAMS_FILE)
}

/// Load a teams file
///
/// If the file doesn't exist, returns an empty document.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_teams_file(path: &Path) -> Result<TeamsFile> {
    if !path.exists() {
        return Ok(TeamsFile::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open teams file at {}", path.display()))?;

    let doc: TeamsFile = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load teams from {}", path.display()))?;

    if doc.version != TEAMS_FILE_VERSION {
        anyhow::bail!("Unsupported teams file version: {}", doc.version);
    }

    Ok(doc)
}

/// Save a teams file atomically
///
/// Uses atomic-write-file so a crash never leaves a half-written file.
/// Creates the season directory if it doesn't exist.
pub fn save_teams_file(path: &Path, doc: &TeamsFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, doc).context("Failed to serialize teams")?;

    file.commit().context("Failed to save teams")?;

    Ok(())
}

/// JSON file per season under the data directory.
///
/// Every write holds an exclusive OS lock on `<season>/teams.lock` across
/// load, check and save, so separate processes (and separate store values)
/// sharing a data directory serialise their writes.
#[derive(Debug, Clone)]
pub struct JsonTeamStore {
    data_root: PathBuf,
}

impl JsonTeamStore {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    /// Run `f` on the season's teams path while holding the season's write lock.
    fn with_write_lock<T>(&self, season: Season, f: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
        let dir = season.data_dir(&self.data_root);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory at {}", dir.display()))?;

        let lock_path = dir.join(TEAMS_LOCK_FILE);
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file at {}", lock_path.display()))?;

        let mut lock = RwLock::new(lock_file);
        let _guard = lock
            .write()
            .with_context(|| format!("Failed to lock {}", lock_path.display()))?;

        f(&dir.join(TEAMS_FILE))
    }
}

impl TeamStore for JsonTeamStore {
    fn list(&self, season: Season) -> Result<Vec<Team>> {
        Ok(load_teams_file(&get_teams_path(&self.data_root, season))?.teams)
    }

    fn insert_unique(&self, season: Season, team: Team) -> Result<bool> {
        self.with_write_lock(season, |path| {
            let mut doc = load_teams_file(path)?;
            if doc.teams.iter().any(|t| t.has_name(&team.name)) {
                debug!(season = %season, team = %team.name, "duplicate team name");
                return Ok(false);
            }

            doc.teams.push(team);
            save_teams_file(path, &doc)?;
            Ok(true)
        })
    }

    fn replace_all(&self, season: Season, teams: &[Team]) -> Result<()> {
        self.with_write_lock(season, |path| {
            let doc = TeamsFile {
                version: TEAMS_FILE_VERSION,
                teams: teams.to_vec(),
            };
            save_teams_file(path, &doc)
        })
    }
}

/// In-memory store, used by tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryTeamStore {
    seasons: Mutex<HashMap<Season, Vec<Team>>>,
}

impl MemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn seasons(&self) -> Result<MutexGuard<'_, HashMap<Season, Vec<Team>>>> {
        self.seasons.lock().map_err(|_| anyhow!("Team store lock poisoned"))
    }
}

impl TeamStore for MemoryTeamStore {
    fn list(&self, season: Season) -> Result<Vec<Team>> {
        Ok(self.seasons()?.get(&season).cloned().unwrap_or_default())
    }

    fn insert_unique(&self, season: Season, team: Team) -> Result<bool> {
        let mut seasons = self.seasons()?;
        let teams = seasons.entry(season).or_default();
        if teams.iter().any(|t| t.has_name(&team.name)) {
            return Ok(false);
        }
        teams.push(team);
        Ok(true)
    }

    fn replace_all(&self, season: Season, teams: &[Team]) -> Result<()> {
        self.seasons()?.insert(season, teams.to_vec());
        Ok(())
    }
}
