use tracing::debug;

use super::types::{ResolvedContestant, RoundPoints, ScoredEvent, ScoredTeam};
use crate::results::{match_contestant, Place, ResultsByEvent, RoundKey};
use crate::roster::Roster;
use crate::teams::Team;

/// Worst place that still earns points
pub const MAX_SCORING_PLACE: i64 = 15;

/// Points for a finishing place: 16 − place for places 1-15, otherwise 0.
pub fn points_for_place(place: Option<Place>) -> u32 {
    match place {
        Some(Place::Ranked(p)) if (1..=MAX_SCORING_PLACE).contains(&p) => (16 - p) as u32,
        _ => 0,
    }
}

/// Score every team against the aggregated results.
///
/// `events` gives the positional meaning of each team's selections. Unknown
/// ranks, events without results, and contestants missing from a round all
/// score zero. Pure: the same inputs always give the same output.
pub fn score_teams(
    teams: &[Team],
    events: &[String],
    roster: &Roster,
    results: &ResultsByEvent,
) -> Vec<ScoredTeam> {
    teams
        .iter()
        .map(|team| score_team(team, events, roster, results))
        .collect()
}

fn score_team(team: &Team, events: &[String], roster: &Roster, results: &ResultsByEvent) -> ScoredTeam {
    if team.selections.len() != events.len() {
        debug!(
            team = %team.name,
            selections = team.selections.len(),
            events = events.len(),
            "selection count differs from event catalog"
        );
    }

    let mut total_per_round = RoundPoints::default();

    let scored_events: Vec<ScoredEvent> = team
        .selections
        .iter()
        .zip(events)
        .map(|(&id, event)| {
            let contestant = match roster.name_at(event, id) {
                Some(name) if !name.trim().is_empty() => ResolvedContestant::Named(name.to_string()),
                _ => ResolvedContestant::Unresolved(id),
            };
            let rounds = score_selection(&contestant, event, results);
            total_per_round.accumulate(&rounds);

            debug!(team = %team.name, event = %event, contestant = %contestant, points = rounds.total(), "scored selection");
            ScoredEvent {
                event: event.clone(),
                contestant,
                rounds,
            }
        })
        .collect();

    ScoredTeam {
        team: team.name.clone(),
        events: scored_events,
        total: total_per_round.total(),
        total_per_round,
    }
}

fn score_selection(contestant: &ResolvedContestant, event: &str, results: &ResultsByEvent) -> RoundPoints {
    let mut rounds = RoundPoints::default();
    let (Some(name), Some(table)) = (contestant.name(), results.get(event)) else {
        return rounds;
    };

    for round in RoundKey::all() {
        let place = table
            .round(round)
            .and_then(|placements| match_contestant(name, placements, event));
        rounds.add(round, points_for_place(place));
    }
    rounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::parse_results;
    use crate::scoring::round_totals;
    use chrono::Utc;

    fn team(name: &str, selections: Vec<usize>) -> Team {
        Team {
            name: name.to_string(),
            selections,
            total_cost: 0,
            submitted_at: Utc::now(),
        }
    }

    fn bull_riding_roster() -> Roster {
        Roster::new(vec![(
            "Bull Riding".to_string(),
            vec!["Sage Kimzey".to_string(), "Stetson Wright".to_string()],
        )])
    }

    fn results_for(event: &str, csv: &str, roster: Option<&Roster>) -> ResultsByEvent {
        ResultsByEvent::from([(event.to_string(), parse_results(csv, event, roster))])
    }

    #[test]
    fn test_points_for_place() {
        assert_eq!(points_for_place(Some(Place::Ranked(1))), 15);
        assert_eq!(points_for_place(Some(Place::Ranked(15))), 1);
        assert_eq!(points_for_place(Some(Place::Ranked(8))), 8);
        assert_eq!(points_for_place(Some(Place::Ranked(16))), 0);
        assert_eq!(points_for_place(Some(Place::Ranked(0))), 0);
        assert_eq!(points_for_place(Some(Place::Ranked(-2))), 0);
        assert_eq!(points_for_place(Some(Place::Invalid)), 0);
        assert_eq!(points_for_place(None), 0);
    }

    #[test]
    fn test_end_to_end_single_event() {
        let roster = bull_riding_roster();
        let events = roster.events();
        let results = results_for(
            "Bull Riding",
            "Round,Contestant,Time/Score,Place\n1,Stetson Wright,91,1\n1,Sage Kimzey,88,2\n",
            None,
        );

        let scored = score_teams(&[team("Gold Buckles", vec![2])], &events, &roster, &results);

        let ev = &scored[0].events[0];
        assert_eq!(ev.contestant, ResolvedContestant::Named("Stetson Wright".to_string()));
        assert_eq!(ev.rounds.get(RoundKey::Numbered(1)), 15);
        assert_eq!(scored[0].total_per_round.get(RoundKey::Numbered(1)), 15);
        assert_eq!(scored[0].total, 15);
    }

    #[test]
    fn test_average_round_scored() {
        let roster = bull_riding_roster();
        let results = results_for(
            "Bull Riding",
            "Round,Contestant,Time/Score,Place\nAVG,Sage Kimzey,700,3\n",
            None,
        );

        let scored = score_teams(&[team("T", vec![1])], &roster.events(), &roster, &results);
        assert_eq!(scored[0].events[0].rounds.get(RoundKey::Average), 13);
        assert_eq!(scored[0].total, 13);
    }

    #[test]
    fn test_missing_event_results_score_zero() {
        let roster = bull_riding_roster();
        let results = ResultsByEvent::new();

        let scored = score_teams(&[team("T", vec![1])], &roster.events(), &roster, &results);
        assert_eq!(scored[0].events[0].rounds, RoundPoints::default());
        assert_eq!(scored[0].total, 0);
    }

    #[test]
    fn test_out_of_range_rank_is_unresolved() {
        let roster = bull_riding_roster();
        let results = results_for(
            "Bull Riding",
            "Round,Contestant,Time/Score,Place\n1,Sage Kimzey,88,1\n",
            None,
        );

        let scored = score_teams(&[team("T", vec![7])], &roster.events(), &roster, &results);
        let ev = &scored[0].events[0];
        assert_eq!(ev.contestant, ResolvedContestant::Unresolved(7));
        assert_eq!(ev.contestant.to_string(), "#7");
        assert_eq!(scored[0].total, 0);
    }

    #[test]
    fn test_blank_roster_name_is_unresolved() {
        let roster = Roster::new(vec![(
            "Bull Riding".to_string(),
            vec!["Sage Kimzey".to_string(), "  ".to_string()],
        )]);
        let results = results_for(
            "Bull Riding",
            "Round,Contestant,Time/Score,Place\n1,,0,1\n",
            None,
        );

        let scored = score_teams(&[team("T", vec![2])], &roster.events(), &roster, &results);
        let ev = &scored[0].events[0];
        assert_eq!(ev.contestant, ResolvedContestant::Unresolved(2));
        assert_eq!(ev.contestant.to_string(), "#2");
        assert_eq!(scored[0].total, 0);
    }

    #[test]
    fn test_unplaced_scores_zero() {
        let roster = bull_riding_roster();
        let results = results_for(
            "Bull Riding",
            "Round,Contestant,Time/Score,Place\n1,Sage Kimzey,0,16\n2,Sage Kimzey,NS,\n",
            None,
        );

        let scored = score_teams(&[team("T", vec![1])], &roster.events(), &roster, &results);
        assert_eq!(scored[0].total, 0);
    }

    #[test]
    fn test_team_roping_heeler_pair() {
        let roster = Roster::new(vec![
            ("Team Roping Header".to_string(), vec!["Smith".to_string()]),
            ("Team Roping Heeler".to_string(), vec!["Jones".to_string()]),
        ]);
        let csv = "Round,Contestant,Time/Score,Place\n2,Smith/Jones,4.4,3\n";
        let results = ResultsByEvent::from([
            (
                "Team Roping Header".to_string(),
                parse_results(csv, "Team Roping Header", Some(&roster)),
            ),
            (
                "Team Roping Heeler".to_string(),
                parse_results(csv, "Team Roping Heeler", Some(&roster)),
            ),
        ]);

        let scored = score_teams(&[team("Ropers", vec![1, 1])], &roster.events(), &roster, &results);
        assert_eq!(scored[0].events[0].rounds.get(RoundKey::Numbered(2)), 13);
        assert_eq!(scored[0].events[1].rounds.get(RoundKey::Numbered(2)), 13);
        assert_eq!(scored[0].total, 26);
    }

    #[test]
    fn test_sum_invariant_and_idempotence() {
        let roster = Roster::new(vec![
            (
                "Bull Riding".to_string(),
                vec!["Sage Kimzey".to_string(), "Stetson Wright".to_string()],
            ),
            (
                "Barrel Racing".to_string(),
                vec!["Hailey Kinsel".to_string(), "Jordon Briggs".to_string()],
            ),
        ]);
        let results = ResultsByEvent::from([
            (
                "Bull Riding".to_string(),
                parse_results(
                    "Round,Contestant,Time/Score,Place\n1,Sage Kimzey,90,1\n1,Stetson Wright,89,2\n3,Stetson Wright,88,5\n",
                    "Bull Riding",
                    None,
                ),
            ),
            (
                "Barrel Racing".to_string(),
                parse_results(
                    "Round,Contestant,Time/Score,Place\n1,Jordon Briggs,13.5,4\nAvg,Hailey Kinsel,137,1\n",
                    "Barrel Racing",
                    None,
                ),
            ),
        ]);
        let teams = vec![team("A", vec![1, 2]), team("B", vec![2, 1]), team("C", vec![9, 1])];
        let events = roster.events();

        let first = score_teams(&teams, &events, &roster, &results);
        let second = score_teams(&teams, &events, &roster, &results);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );

        let totals = round_totals(&first);
        for round in RoundKey::all() {
            let sum: u32 = first.iter().map(|t| t.total_per_round.get(round)).sum();
            assert_eq!(totals.get(round), sum);
        }
        for scored in &first {
            let per_event: u32 = scored.events.iter().map(|e| e.rounds.total()).sum();
            assert_eq!(scored.total, per_event);
            assert_eq!(scored.total, scored.total_per_round.total());
        }
        assert_eq!(first[0].total, 15 + 12);
        assert_eq!(first[1].total, 14 + 11 + 15);
    }
}
