use serde::Serialize;

use super::types::{RoundPoints, ScoredTeam};
use crate::results::RoundKey;

/// Teams tied for the most points in one round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundWinners {
    pub round: RoundKey,
    pub teams: Vec<String>,
    pub points: u32,
}

/// A team's position in a ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub rank: usize,
    pub team: String,
    pub points: u32,
}

/// Cross-team summary of a scored season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standings {
    pub total_per_round: RoundPoints,
    pub active_rounds: Vec<RoundKey>,
    pub round_winners: Vec<RoundWinners>,
    pub rankings: Vec<Ranking>,
}

impl Standings {
    pub fn compute(scored: &[ScoredTeam]) -> Self {
        let active = active_rounds(scored);
        let round_winners = active
            .iter()
            .filter_map(|&round| round_winners(scored, round))
            .collect();

        Self {
            total_per_round: round_totals(scored),
            round_winners,
            rankings: rankings(scored, None),
            active_rounds: active,
        }
    }
}

/// Slot-wise sum of every team's per-round totals
pub fn round_totals(scored: &[ScoredTeam]) -> RoundPoints {
    let mut totals = RoundPoints::default();
    for team in scored {
        totals.accumulate(&team.total_per_round);
    }
    totals
}

/// Rounds in which at least one team scored, in slot order
pub fn active_rounds(scored: &[ScoredTeam]) -> Vec<RoundKey> {
    let totals = round_totals(scored);
    RoundKey::all().filter(|&round| totals.get(round) > 0).collect()
}

/// Every team tied at the top score for `round`, in team order
pub fn round_winners(scored: &[ScoredTeam], round: RoundKey) -> Option<RoundWinners> {
    let points = scored.iter().map(|t| t.total_per_round.get(round)).max()?;
    let teams = scored
        .iter()
        .filter(|t| t.total_per_round.get(round) == points)
        .map(|t| t.team.clone())
        .collect();

    Some(RoundWinners { round, teams, points })
}

/// Teams ordered by points, highest first; ties keep team order.
///
/// `round` of `None` ranks by grand total.
pub fn rankings(scored: &[ScoredTeam], round: Option<RoundKey>) -> Vec<Ranking> {
    let points_of = |team: &ScoredTeam| match round {
        Some(r) => team.total_per_round.get(r),
        None => team.total,
    };

    let mut ordered: Vec<&ScoredTeam> = scored.iter().collect();
    ordered.sort_by(|a, b| points_of(b).cmp(&points_of(a)));

    ordered
        .into_iter()
        .enumerate()
        .map(|(idx, team)| Ranking {
            rank: idx + 1,
            team: team.team.clone(),
            points: points_of(team),
        })
        .collect()
}
