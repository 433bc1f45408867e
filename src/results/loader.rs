use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::parser::parse_results;
use super::types::ResultsByEvent;
use crate::roster::Roster;
use crate::season::Season;

/// Event to scraped results file. Both team-roping events read the same file.
pub const EVENT_RESULT_FILES: &[(&str, &str)] = &[
    ("Bareback Riding", "BB_results.csv"),
    ("Steer Wrestling", "SW_results.csv"),
    ("Saddle Bronc Riding", "SB_results.csv"),
    ("Bull Riding", "BR_results.csv"),
    ("Team Roping Header", "TR_results.csv"),
    ("Team Roping Heeler", "TR_results.csv"),
    ("Tie-Down Roping", "TD_results.csv"),
    ("Barrel Racing", "GB_results.csv"),
];

/// Supplies raw results text per season and file.
pub trait ResultSource {
    /// Contents of a results file, or `None` when it has not been scraped yet
    fn read(&self, season: Season, file_name: &str) -> Result<Option<String>>;
}

/// Results laid out as `<root>/<season>/<file>` on disk
#[derive(Debug, Clone)]
pub struct DirResultSource {
    root: PathBuf,
}

impl DirResultSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResultSource for DirResultSource {
    fn read(&self, season: Season, file_name: &str) -> Result<Option<String>> {
        let path = season.results_dir(&self.root).join(file_name);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read results file at {}", path.display()))?;
        Ok(Some(text))
    }
}

/// Load and parse every event's results for a season.
///
/// Events whose file is missing (or unreadable) are left out of the map;
/// callers treat an absent event as "no results yet".
pub fn load_all_event_results<S: ResultSource + ?Sized>(
    source: &S,
    season: Season,
    roster: Option<&Roster>,
) -> ResultsByEvent {
    let mut results = ResultsByEvent::new();

    for (event, file_name) in EVENT_RESULT_FILES {
        match source.read(season, file_name) {
            Ok(Some(text)) => {
                debug!(event, file_name, "found results file");
                results.insert(event.to_string(), parse_results(&text, event, roster));
            }
            Ok(None) => debug!(event, file_name, "no results file yet"),
            Err(e) => warn!(event, error = %format!("{:#}", e), "skipping unreadable results"),
        }
    }

    info!(season = %season, events = results.len(), "loaded event results");
    results
}
