use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use super::matcher::split_pair;
use super::types::{Place, Placement, ResultsTable, RoundKey};
use crate::roster::Roster;

/// Roster event listing team-roping headers
pub const HEADER_EVENT: &str = "Team Roping Header";
/// Roster event listing team-roping heelers
pub const HEELER_EVENT: &str = "Team Roping Heeler";

/// Column positions located from a results file header row
#[derive(Debug, Clone, PartialEq)]
struct ResultColumns {
    round: usize,
    contestant: usize,
    score: Option<usize>,
    place: Option<usize>,
}

impl ResultColumns {
    /// Find columns by (case-insensitive) header name. Round and contestant are required.
    fn locate(headers: &StringRecord) -> Option<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };

        Some(Self {
            round: find(&["Round"])?,
            contestant: find(&["Contestant"])?,
            score: find(&["Time/Score", "Time", "Score"]),
            place: find(&["Place"]),
        })
    }
}

/// Which side of a roping pair an event scores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairRole {
    Header,
    Heeler,
}

impl PairRole {
    fn for_event(event: &str) -> Option<Self> {
        let event = event.to_lowercase();
        if event.contains("header") {
            Some(PairRole::Header)
        } else if event.contains("heeler") {
            Some(PairRole::Heeler)
        } else {
            None
        }
    }

    fn roster_event(self) -> &'static str {
        match self {
            PairRole::Header => HEADER_EVENT,
            PairRole::Heeler => HEELER_EVENT,
        }
    }
}

/// Parse one event's results file into a round-keyed table.
///
/// Columns are located by header name. Rows whose round is neither a
/// round number nor an average label are skipped. For team-roping header or
/// heeler events with a roster, "name1/name2" pair entries are narrowed to
/// the partner listed on that role's roster; when neither partner is listed
/// the whole pair string is kept.
pub fn parse_results(csv_text: &str, event: &str, roster: Option<&Roster>) -> ResultsTable {
    let mut table = ResultsTable::new();
    if csv_text.trim().is_empty() {
        return table;
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(csv_text.as_bytes());

    let columns = match reader.headers() {
        Ok(headers) => ResultColumns::locate(headers),
        Err(e) => {
            warn!(event, error = %e, "unreadable results header");
            return table;
        }
    };
    let Some(columns) = columns else {
        warn!(event, "results header lacks Round/Contestant columns");
        return table;
    };

    let role_names: Option<Vec<String>> = PairRole::for_event(event).zip(roster).map(|(role, roster)| {
        roster
            .contestants(role.roster_event())
            .unwrap_or_default()
            .iter()
            .map(|n| n.trim().to_lowercase())
            .collect()
    });

    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                debug!(event, line, error = %e, "skipping malformed row");
                continue;
            }
        };

        let Some(round) = record.get(columns.round).and_then(RoundKey::parse) else {
            continue;
        };
        let Some(raw_name) = record.get(columns.contestant) else {
            continue;
        };

        let name = raw_name.replace('"', "").trim().to_string();
        let score = columns
            .score
            .and_then(|i| record.get(i))
            .unwrap_or_default()
            .to_string();
        let place = columns
            .place
            .and_then(|i| record.get(i))
            .map(Place::parse)
            .unwrap_or(Place::Invalid);

        let contestant = match &role_names {
            Some(names) => pick_roster_partner(&name, names).unwrap_or(name),
            None => name,
        };

        table.push(Placement {
            round,
            contestant,
            score,
            place,
        });
    }

    debug!(event, rows = table.len(), "parsed results");
    table
}

/// The partner of a "name1/name2" entry who appears in `role_names`.
/// The second partner wins when both are listed.
fn pick_roster_partner(entry: &str, role_names: &[String]) -> Option<String> {
    let (first, second) = split_pair(entry)?;
    let listed = |n: &str| role_names.iter().any(|r| *r == n.to_lowercase());

    if listed(second) {
        Some(second.to_string())
    } else if listed(first) {
        Some(first.to_string())
    } else {
        None
    }
}
