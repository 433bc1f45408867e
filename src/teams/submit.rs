use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use super::storage::TeamStore;
use super::types::Team;
use crate::roster::{contestant_cost, Roster};
use crate::season::Season;

/// Default salary cap for a team
pub const DEFAULT_BUDGET: u64 = 550_000;

/// A team as entered, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSubmission {
    pub name: String,
    pub selections: Vec<usize>,
}

/// Why a submission was rejected
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Team name must not be empty.")]
    EmptyName,
    #[error("Select one person for each of {expected} events (got {got}).")]
    WrongSelectionCount { expected: usize, got: usize },
    #[error("Invalid selection for event: {event} (#{id})")]
    InvalidSelection { event: String, id: usize },
    #[error("Selection costs ${total}, which exceeds budget of ${budget}.")]
    OverBudget { budget: u64, total: u64 },
    #[error("A team with this name already exists for this season.")]
    DuplicateName,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Total salary of a selection list, validated against the roster
pub fn selection_cost(roster: &Roster, selections: &[usize]) -> Result<u64, SubmissionError> {
    let events = roster.events();
    if selections.len() != events.len() {
        return Err(SubmissionError::WrongSelectionCount {
            expected: events.len(),
            got: selections.len(),
        });
    }

    events
        .iter()
        .zip(selections)
        .map(|(event, &id)| {
            let size = roster.contestants(event).map_or(0, <[String]>::len);
            contestant_cost(id, size).ok_or_else(|| SubmissionError::InvalidSelection {
                event: event.clone(),
                id,
            })
        })
        .sum()
}

/// Validate a submission and persist it as a new team.
///
/// A name already used this season (trimmed, case-insensitive) is rejected
/// by the store's atomic insert, so concurrent duplicates cannot both land.
pub fn submit_team<S: TeamStore + ?Sized>(
    store: &S,
    season: Season,
    roster: &Roster,
    submission: TeamSubmission,
    budget: u64,
    submitted_at: DateTime<Utc>,
) -> Result<Team, SubmissionError> {
    let name = submission.name.trim();
    if name.is_empty() {
        return Err(SubmissionError::EmptyName);
    }

    let total_cost = selection_cost(roster, &submission.selections)?;
    if total_cost > budget {
        return Err(SubmissionError::OverBudget {
            budget,
            total: total_cost,
        });
    }

    let team = Team {
        name: name.to_string(),
        selections: submission.selections,
        total_cost,
        submitted_at,
    };

    if !store.insert_unique(season, team.clone())? {
        return Err(SubmissionError::DuplicateName);
    }

    info!(season = %season, team = %team.name, total_cost, "team submitted");
    Ok(team)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::MemoryTeamStore;

    fn roster() -> Roster {
        let people = |prefix: &str| -> Vec<String> { (1..=15).map(|i| format!("{} {}", prefix, i)).collect() };
        Roster::new(vec![
            ("Bull Riding".to_string(), people("Rider")),
            ("Barrel Racing".to_string(), people("Racer")),
        ])
    }

    fn season() -> Season {
        "2024".parse().unwrap()
    }

    fn submission(name: &str, selections: Vec<usize>) -> TeamSubmission {
        TeamSubmission {
            name: name.to_string(),
            selections,
        }
    }

    #[test]
    fn test_selection_cost() {
        assert_eq!(selection_cost(&roster(), &[1, 10]).unwrap(), 210_000);
    }

    #[test]
    fn test_submit_valid_team() {
        let store = MemoryTeamStore::new();
        let team = submit_team(
            &store,
            season(),
            &roster(),
            submission("  Rank Bulls ", vec![10, 10]),
            DEFAULT_BUDGET,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(team.name, "Rank Bulls");
        assert_eq!(team.total_cost, 120_000);
        assert_eq!(store.list(season()).unwrap().len(), 1);
    }

    #[test]
    fn test_single_event_cost_scenario() {
        let roster = Roster::new(vec![(
            "Bull Riding".to_string(),
            vec!["Sage Kimzey".to_string(), "Stetson Wright".to_string()],
        )]);
        let store = MemoryTeamStore::new();
        let team = submit_team(
            &store,
            season(),
            &roster,
            submission("Second Pick", vec![2]),
            DEFAULT_BUDGET,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(team.total_cost, 140_000);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let store = MemoryTeamStore::new();
        submit_team(&store, season(), &roster(), submission("Rank Bulls", vec![10, 10]), DEFAULT_BUDGET, Utc::now())
            .unwrap();

        let err = submit_team(
            &store,
            season(),
            &roster(),
            submission("rank bulls", vec![12, 12]),
            DEFAULT_BUDGET,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, SubmissionError::DuplicateName));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let store = MemoryTeamStore::new();
        let err = submit_team(&store, season(), &roster(), submission("   ", vec![10, 10]), DEFAULT_BUDGET, Utc::now())
            .unwrap_err();
        assert!(matches!(err, SubmissionError::EmptyName));
    }

    #[test]
    fn test_wrong_selection_count() {
        let store = MemoryTeamStore::new();
        let err = submit_team(&store, season(), &roster(), submission("Short", vec![]), DEFAULT_BUDGET, Utc::now())
            .unwrap_err();
        assert!(matches!(err, SubmissionError::WrongSelectionCount { expected: 2, got: 0 }));
    }

    #[test]
    fn test_out_of_range_selection() {
        let store = MemoryTeamStore::new();
        let err = submit_team(&store, season(), &roster(), submission("Wide", vec![99, 10]), DEFAULT_BUDGET, Utc::now())
            .unwrap_err();
        assert!(err.to_string().contains("Invalid selection for event: Bull Riding"));
        assert!(store.list(season()).unwrap().is_empty());
    }

    #[test]
    fn test_over_budget() {
        let store = MemoryTeamStore::new();
        let err = submit_team(&store, season(), &roster(), submission("Big Spenders", vec![1, 1]), 200_000, Utc::now())
            .unwrap_err();
        assert!(matches!(err, SubmissionError::OverBudget { budget: 200_000, total: 300_000 }));
        assert!(err.to_string().contains("exceeds budget"));
    }
}
