use super::types::{Place, Placement};

/// Split a "name1/name2" roping pair into its two trimmed partners.
/// Parts beyond the second are ignored.
pub fn split_pair(entry: &str) -> Option<(&str, &str)> {
    let mut parts = entry.split('/');
    let first = parts.next()?.trim();
    let second = parts.next()?.trim();
    Some((first, second))
}

/// Lowercase and drop everything but ASCII letters and digits
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

fn is_team_roping(event: &str) -> bool {
    event.to_lowercase().contains("team roping")
}

/// Find a contestant's place in one round's placements.
///
/// Every row is tried for an exact (trimmed, case-insensitive) match before
/// any row is tried with punctuation and spacing ignored. For team-roping
/// events each side of a "name1/name2" entry is compared on its own before
/// the whole entry. Returns the first matching row's place.
pub fn match_contestant(name: &str, placements: &[Placement], event: &str) -> Option<Place> {
    let team_roping = is_team_roping(event);

    let exact = name.trim().to_lowercase();
    let exact_eq = |candidate: &str| candidate.trim().to_lowercase() == exact;
    if let Some(place) = find_place(placements, team_roping, exact_eq) {
        return Some(place);
    }

    let normalized = normalize_name(name);
    if normalized.is_empty() {
        return None;
    }
    let loose_eq = |candidate: &str| normalize_name(candidate) == normalized;
    find_place(placements, team_roping, loose_eq)
}

fn find_place<F>(placements: &[Placement], team_roping: bool, matches: F) -> Option<Place>
where
    F: Fn(&str) -> bool,
{
    placements
        .iter()
        .filter(|row| !row.contestant.trim().is_empty())
        .find(|row| {
            let field = row.contestant.trim();
            let side_match = team_roping
                && split_pair(field).is_some_and(|(first, second)| matches(first) || matches(second));
            side_match || matches(field)
        })
        .map(|row| row.place)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::types::RoundKey;

    fn row(contestant: &str, place: i64) -> Placement {
        Placement {
            round: RoundKey::Numbered(1),
            contestant: contestant.to_string(),
            score: String::new(),
            place: Place::Ranked(place),
        }
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let rows = vec![row("Sage Kimzey", 4)];
        assert_eq!(match_contestant("  sage KIMZEY ", &rows, "Bull Riding"), Some(Place::Ranked(4)));
    }

    #[test]
    fn test_not_found() {
        let rows = vec![row("Sage Kimzey", 4)];
        assert_eq!(match_contestant("Stetson Wright", &rows, "Bull Riding"), None);
        assert_eq!(match_contestant("Sage Kimzey", &[], "Bull Riding"), None);
    }

    #[test]
    fn test_punctuation_insensitive() {
        let rows = vec![row("OBrien", 7)];
        assert_eq!(match_contestant("O'Brien", &rows, "Bull Riding"), Some(Place::Ranked(7)));

        let rows = vec![row("J.R. Vezain", 2)];
        assert_eq!(match_contestant("JR Vezain", &rows, "Bareback Riding"), Some(Place::Ranked(2)));
    }

    #[test]
    fn test_exact_pass_completes_before_loose_pass() {
        // Loose match appears first in row order, exact match later
        let rows = vec![row("Ty-Harris", 9), row("Ty Harris", 3)];
        assert_eq!(match_contestant("Ty Harris", &rows, "Bull Riding"), Some(Place::Ranked(3)));
    }

    #[test]
    fn test_first_matching_row_wins() {
        let rows = vec![row("Ty Harris", 3), row("Ty Harris", 5)];
        assert_eq!(match_contestant("Ty Harris", &rows, "Bull Riding"), Some(Place::Ranked(3)));
    }

    #[test]
    fn test_team_roping_either_side() {
        let rows = vec![row("Smith/Jones", 3)];
        assert_eq!(match_contestant("Jones", &rows, "Team Roping Heeler"), Some(Place::Ranked(3)));
        assert_eq!(match_contestant("smith", &rows, "Team Roping Header"), Some(Place::Ranked(3)));
    }

    #[test]
    fn test_team_roping_sides_loose() {
        let rows = vec![row("Clay Smith / Jade  Corkill", 1)];
        assert_eq!(
            match_contestant("Jade Corkill", &rows, "team roping heeler"),
            Some(Place::Ranked(1))
        );
    }

    #[test]
    fn test_team_roping_whole_entry_still_matches() {
        let rows = vec![row("Smith/Jones", 3)];
        assert_eq!(
            match_contestant("Smith/Jones", &rows, "Team Roping Header"),
            Some(Place::Ranked(3))
        );
    }

    #[test]
    fn test_pair_not_split_outside_team_roping() {
        let rows = vec![row("Smith/Jones", 3)];
        assert_eq!(match_contestant("Jones", &rows, "Bull Riding"), None);
    }

    #[test]
    fn test_blank_rows_never_match() {
        let rows = vec![row("", 1), row("  ", 2)];
        assert_eq!(match_contestant("", &rows, "Bull Riding"), None);
        assert_eq!(match_contestant("---", &rows, "Bull Riding"), None);
    }

    #[test]
    fn test_invalid_place_is_returned() {
        let mut unplaced = row("Sage Kimzey", 0);
        unplaced.place = Place::Invalid;
        assert_eq!(
            match_contestant("Sage Kimzey", &[unplaced], "Bull Riding"),
            Some(Place::Invalid)
        );
    }

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("A / B"), Some(("A", "B")));
        assert_eq!(split_pair("A/B/C"), Some(("A", "B")));
        assert_eq!(split_pair("A"), None);
    }
}
