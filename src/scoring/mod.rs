pub mod engine;
pub mod standings;
pub mod types;

pub use engine::{points_for_place, score_teams, MAX_SCORING_PLACE};
pub use standings::{active_rounds, rankings, round_totals, round_winners, Ranking, RoundWinners, Standings};
pub use types::{ResolvedContestant, RoundPoints, ScoredEvent, ScoredTeam};
