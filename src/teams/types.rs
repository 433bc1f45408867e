use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current on-disk teams document version
pub const TEAMS_FILE_VERSION: u32 = 1;

/// A submitted fantasy team. Never mutated after submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub name: String,
    /// 1-based roster rank per event, in event catalog order
    pub selections: Vec<usize>,
    pub total_cost: u64,
    pub submitted_at: DateTime<Utc>,
}

impl Team {
    /// Team names are unique per season, compared trimmed and case-insensitively
    pub fn has_name(&self, name: &str) -> bool {
        same_team_name(&self.name, name)
    }
}

pub fn same_team_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// One season's teams as persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamsFile {
    pub version: u32,
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl Default for TeamsFile {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamsFile {
    pub fn new() -> Self {
        Self {
            version: TEAMS_FILE_VERSION,
            teams: Vec::new(),
        }
    }
}
