pub mod cost;
pub mod types;

pub use cost::{contestant_cost, MAX_COST, MIN_COST};
pub use types::{ContestantListing, Roster};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::season::Season;

/// Roster file name inside each season directory
pub const ROSTER_FILE: &str = "eventContestants.json";

/// Get the roster path for a season (<data_root>/<season>/eventContestants.json)
pub fn get_roster_path(data_root: &Path, season: Season) -> PathBuf {
    season.data_dir(data_root).join(ROSTER_FILE)
}

/// Load a season's roster.
///
/// A missing file yields an empty roster (the season has not been published);
/// a file that exists but cannot be parsed is an error.
pub fn load_roster(data_root: &Path, season: Season) -> Result<Roster> {
    let path = get_roster_path(data_root, season);

    if !path.exists() {
        warn!(path = %path.display(), "roster file missing, using empty roster");
        return Ok(Roster::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read roster file at {}", path.display()))?;

    let roster = Roster::from_json(&content)
        .with_context(|| format!("Failed to parse roster: invalid JSON in {}", path.display()))?;

    debug!(season = %season, events = roster.events().len(), "loaded roster");
    Ok(roster)
}
