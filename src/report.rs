use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::results::{load_all_event_results, ResultSource, ResultsByEvent};
use crate::roster::Roster;
use crate::scoring::{score_teams, ScoredTeam, Standings};
use crate::season::Season;
use crate::teams::TeamStore;

/// Everything the results view shows for one season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoreboard {
    pub season: Season,
    pub teams: Vec<ScoredTeam>,
    pub standings: Standings,
}

/// Aggregate a season's results, narrowing team-roping pairs with the roster.
pub fn load_event_results<R: ResultSource + ?Sized>(
    source: &R,
    season: Season,
    roster: &Roster,
) -> ResultsByEvent {
    let roster = (!roster.is_empty()).then_some(roster);
    load_all_event_results(source, season, roster)
}

/// Load a season's teams and results, then score every team.
///
/// Results are loaded once for the whole scoreboard, so every team is scored
/// against the same snapshot.
pub fn build_scoreboard<S, R>(store: &S, source: &R, season: Season, roster: &Roster) -> Result<Scoreboard>
where
    S: TeamStore + ?Sized,
    R: ResultSource + ?Sized,
{
    let teams = store
        .list(season)
        .with_context(|| format!("Failed to load teams for season {}", season))?;

    let results = load_event_results(source, season, roster);
    let scored = score_teams(&teams, &roster.events(), roster, &results);
    let standings = Standings::compute(&scored);

    info!(season = %season, teams = scored.len(), active_rounds = standings.active_rounds.len(), "built scoreboard");

    Ok(Scoreboard {
        season,
        teams: scored,
        standings,
    })
}
