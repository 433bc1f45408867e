use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::teams::DEFAULT_BUDGET;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Contest configuration.
///
/// Example YAML:
/// ```yaml
/// data_dir: /srv/rodeo/data
/// results_dir: /srv/rodeo/scraper/results
/// budget: 550000
/// season: "2024"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root holding `<season>/eventContestants.json` and `<season>/teams.json`
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Root holding scraped `<season>/<EVENT>_results.csv` files
    #[serde(default)]
    pub results_dir: Option<PathBuf>,

    /// Salary cap per team (default: 550000)
    #[serde(default)]
    pub budget: Option<u64>,

    /// Season to use when none is given on the command line
    #[serde(default)]
    pub season: Option<String>,
}

impl Config {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    pub fn results_dir(&self) -> PathBuf {
        self.results_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR))
    }

    pub fn budget(&self) -> u64 {
        self.budget.unwrap_or(DEFAULT_BUDGET)
    }
}
