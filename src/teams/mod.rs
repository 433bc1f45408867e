pub mod storage;
pub mod submit;
pub mod types;

pub use storage::{get_teams_path, load_teams_file, save_teams_file, JsonTeamStore, MemoryTeamStore, TeamStore, TEAMS_FILE};
pub use submit::{selection_cost, submit_team, SubmissionError, TeamSubmission, DEFAULT_BUDGET};
pub use types::{same_team_name, Team, TeamsFile, TEAMS_FILE_VERSION};
