use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Numbered go-rounds at the finals
pub const NUM_ROUNDS: u8 = 10;

/// Scoring slots per contestant: ten rounds plus the average
pub const ROUND_SLOTS: usize = NUM_ROUNDS as usize + 1;

/// Round labels that name the average (aggregate) round, compared case-insensitively
pub const AVERAGE_ROUND_LABELS: &[&str] = &["avg", "average"];

/// Identifies a scoring round: a numbered go-round (1..=10) or the average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoundKey {
    Numbered(u8),
    Average,
}

impl RoundKey {
    /// Numbered round, if `n` is within 1..=10
    pub fn numbered(n: u8) -> Option<Self> {
        (1..=NUM_ROUNDS).contains(&n).then_some(RoundKey::Numbered(n))
    }

    /// Parse a round cell from a results file.
    ///
    /// A leading integer ("3", "3.0", "1st") selects a numbered round;
    /// otherwise the cell must be an average label. Anything else (footers,
    /// blanks, out-of-range rounds) is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(n) = leading_integer(raw) {
            return u8::try_from(n).ok().and_then(RoundKey::numbered);
        }
        AVERAGE_ROUND_LABELS
            .iter()
            .any(|label| raw.eq_ignore_ascii_case(label))
            .then_some(RoundKey::Average)
    }

    /// Position in an 11-slot points vector (0-9 rounds, 10 average)
    pub fn slot(self) -> usize {
        match self {
            RoundKey::Numbered(n) => n as usize - 1,
            RoundKey::Average => ROUND_SLOTS - 1,
        }
    }

    pub fn from_slot(slot: usize) -> Option<Self> {
        if slot == ROUND_SLOTS - 1 {
            Some(RoundKey::Average)
        } else {
            u8::try_from(slot + 1).ok().and_then(RoundKey::numbered)
        }
    }

    /// All rounds in slot order, average last
    pub fn all() -> impl Iterator<Item = RoundKey> {
        (1..=NUM_ROUNDS)
            .map(RoundKey::Numbered)
            .chain(std::iter::once(RoundKey::Average))
    }
}

impl fmt::Display for RoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundKey::Numbered(n) => write!(f, "{}", n),
            RoundKey::Average => write!(f, "AVG"),
        }
    }
}

impl Serialize for RoundKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Finishing place from a results row.
///
/// Serialises as the number, or `null` when the cell was not numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Place {
    Ranked(i64),
    Invalid,
}

impl Place {
    /// Parse the leading integer of a place cell ("3", " 12 ", "3rd")
    pub fn parse(raw: &str) -> Self {
        leading_integer(raw).map_or(Place::Invalid, Place::Ranked)
    }
}

/// Signed integer prefix of a cell, ignoring whatever follows it
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let end = raw
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}

/// One scraped result entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub round: RoundKey,
    pub contestant: String,
    pub score: String,
    pub place: Place,
}

/// One event's results: round to placements in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultsTable {
    rounds: BTreeMap<RoundKey, Vec<Placement>>,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a placement to its round, keeping first-appearance order
    pub fn push(&mut self, placement: Placement) {
        self.rounds.entry(placement.round).or_default().push(placement);
    }

    /// Placements for a round, if the round has any
    pub fn round(&self, key: RoundKey) -> Option<&[Placement]> {
        self.rounds.get(&key).map(Vec::as_slice)
    }

    /// Rounds present, in slot order
    pub fn rounds(&self) -> impl Iterator<Item = RoundKey> + '_ {
        self.rounds.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Total placement rows across rounds
    pub fn len(&self) -> usize {
        self.rounds.values().map(Vec::len).sum()
    }
}

/// Aggregated results keyed by event name. Events without a results file
/// are absent.
pub type ResultsByEvent = BTreeMap<String, ResultsTable>;
