use anyhow::{Context, Result};
use serde::Serialize;

use super::cost::contestant_cost;

/// Per-season event catalog with each event's rank-ordered contestants.
///
/// Event order is the catalog order: a team's selection list is positional
/// against it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    events: Vec<(String, Vec<String>)>,
}

/// One row of an event's contestant listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContestantListing {
    pub id: usize,
    pub name: String,
    pub rank: usize,
    pub cost: u64,
}

impl Roster {
    pub fn new(events: Vec<(String, Vec<String>)>) -> Self {
        Self { events }
    }

    /// Parse `eventContestants.json`: an object of event name to name array.
    /// Key order in the document is kept.
    pub fn from_json(content: &str) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;

        let mut events = Vec::with_capacity(map.len());
        for (event, value) in map {
            let names: Vec<String> = serde_json::from_value(value)
                .with_context(|| format!("Event '{}' must list contestant names", event))?;
            events.push((event, names));
        }
        Ok(Self { events })
    }

    /// Event names in catalog order
    pub fn events(&self) -> Vec<String> {
        self.events.iter().map(|(event, _)| event.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Rank-ordered contestant names for an event
    pub fn contestants(&self, event: &str) -> Option<&[String]> {
        self.events
            .iter()
            .find(|(name, _)| name == event)
            .map(|(_, people)| people.as_slice())
    }

    /// Contestant at 1-based `rank` for an event
    pub fn name_at(&self, event: &str, rank: usize) -> Option<&str> {
        let people = self.contestants(event)?;
        rank.checked_sub(1)
            .and_then(|idx| people.get(idx))
            .map(String::as_str)
    }

    /// Contestant listing with salaries, or `None` for an unknown event
    pub fn listing(&self, event: &str) -> Option<Vec<ContestantListing>> {
        let people = self.contestants(event)?;
        Some(
            people
                .iter()
                .enumerate()
                .filter_map(|(idx, name)| {
                    let rank = idx + 1;
                    contestant_cost(rank, people.len()).map(|cost| ContestantListing {
                        id: rank,
                        name: name.clone(),
                        rank,
                        cost,
                    })
                })
                .collect(),
        )
    }
}
