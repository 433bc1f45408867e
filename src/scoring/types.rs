use serde::Serialize;
use std::fmt;

use crate::results::{RoundKey, ROUND_SLOTS};

/// Points per scoring slot: rounds 1-10 at 0-9, the average at 10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoundPoints([u32; ROUND_SLOTS]);

impl RoundPoints {
    pub fn get(&self, round: RoundKey) -> u32 {
        self.0[round.slot()]
    }

    pub fn add(&mut self, round: RoundKey, points: u32) {
        self.0[round.slot()] += points;
    }

    /// Slot-wise sum with another vector
    pub fn accumulate(&mut self, other: &RoundPoints) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0.iter()) {
            *mine += theirs;
        }
    }

    /// Sum over every slot, average included
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// Contestant a selection resolved to.
///
/// `Unresolved` keeps the raw selection id when the rank is not on the
/// roster, so the discrepancy stays visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedContestant {
    Named(String),
    Unresolved(usize),
}

impl ResolvedContestant {
    pub fn name(&self) -> Option<&str> {
        match self {
            ResolvedContestant::Named(name) => Some(name),
            ResolvedContestant::Unresolved(_) => None,
        }
    }
}

impl fmt::Display for ResolvedContestant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedContestant::Named(name) => write!(f, "{}", name),
            ResolvedContestant::Unresolved(id) => write!(f, "#{}", id),
        }
    }
}

/// One team's pick for one event with its points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEvent {
    pub event: String,
    pub contestant: ResolvedContestant,
    pub rounds: RoundPoints,
}

/// Derived, non-persisted view of a team's points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTeam {
    pub team: String,
    pub events: Vec<ScoredEvent>,
    pub total_per_round: RoundPoints,
    pub total: u32,
}
