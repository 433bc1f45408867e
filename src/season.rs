use anyhow::{bail, Context, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::roster::ROSTER_FILE;

/// Season used when the data directory holds no published season at all.
pub const FALLBACK_SEASON: Season = Season(2024);

/// One year's contest instance, identified by its 4-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Season(u16);

impl Season {
    pub fn year(&self) -> u16 {
        self.0
    }

    /// Directory holding this season's roster and team files
    pub fn data_dir(&self, data_root: &Path) -> PathBuf {
        data_root.join(self.to_string())
    }

    /// Directory holding this season's scraped result CSVs
    pub fn results_dir(&self, results_root: &Path) -> PathBuf {
        results_root.join(self.to_string())
    }
}

impl FromStr for Season {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != 4 || !s.chars().all(|c| c.is_ascii_digit()) {
            bail!("Season must be a 4-digit year: '{}'", s);
        }
        Ok(Season(s.parse()?))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl Serialize for Season {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Find every season under `data_root` that has a published roster.
///
/// A season is a directory named with a 4-digit year containing
/// `eventContestants.json`. Returned oldest first.
pub fn discover_seasons(data_root: &Path) -> Result<Vec<Season>> {
    let root = glob::Pattern::escape(&data_root.to_string_lossy());
    let pattern = format!("{}/*/{}", root, ROSTER_FILE);

    let entries = glob::glob(&pattern)
        .with_context(|| format!("Invalid data directory pattern: {}", pattern))?;

    let mut seasons: Vec<Season> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|path| {
            let dir = path.parent()?.file_name()?.to_str()?;
            dir.parse().ok()
        })
        .collect();

    seasons.sort();
    seasons.dedup();
    debug!(root = %data_root.display(), count = seasons.len(), "discovered seasons");
    Ok(seasons)
}

/// Pick the active season.
///
/// No request selects the newest available season. An unknown request is an
/// error when `strict`, otherwise it falls back to the default season.
pub fn select_season(requested: Option<&str>, available: &[Season], strict: bool) -> Result<Season> {
    let default = available.last().copied().unwrap_or(FALLBACK_SEASON);

    let Some(raw) = requested else {
        return Ok(default);
    };

    match raw.parse::<Season>() {
        Ok(season) if available.contains(&season) => Ok(season),
        Ok(_) | Err(_) if strict => bail!("Season not found: {}", raw.trim()),
        _ => {
            warn!(requested = raw, fallback = %default, "unknown season, using default");
            Ok(default)
        }
    }
}
