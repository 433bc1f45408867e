use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::report::Scoreboard;
use crate::results::{RoundKey, HEADER_EVENT, HEELER_EVENT};
use crate::roster::ContestantListing;
use crate::scoring::{ScoredTeam, Standings};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Short label for an event column ("TR Header" instead of "Team Roping Header")
pub fn short_event_label(event: &str) -> &str {
    match event {
        HEADER_EVENT => "TR Header",
        HEELER_EVENT => "TR Heeler",
        other => other,
    }
}

/// Format a salary with thousands separators ($150,000)
pub fn format_cost(cost: u64) -> String {
    let digits = cost.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${}", grouped)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format an event's contestants with rank and cost
/// Format: " 1. {name}  {cost}"
pub fn format_contestants(listing: &[ContestantListing], use_colors: bool) -> String {
    if listing.is_empty() {
        return "No contestants found.".to_string();
    }

    let name_width = listing.iter().map(|c| c.name.chars().count()).max().unwrap_or(0);

    listing
        .iter()
        .map(|c| {
            let index_str = format!("{:>2}.", c.rank);
            let name = format!("{:<width$}", c.name, width = name_width);
            let cost = format!("{:>9}", format_cost(c.cost));
            if use_colors {
                format!("{} {}  {}", index_str.dimmed(), name.bold(), cost.green())
            } else {
                format!("{} {}  {}", index_str, name, cost)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format overall rankings, one team per line
/// Index column is 3 chars, points right-aligned in 5 chars
pub fn format_rankings(standings: &Standings, use_colors: bool) -> String {
    if standings.rankings.is_empty() {
        return "No teams submitted.".to_string();
    }

    let term_width = get_terminal_width();
    let fixed_width = 3 + 1 + 5 + 2;

    standings
        .rankings
        .iter()
        .map(|r| {
            let index_str = format!("{:>2}.", r.rank);
            let points = format!("{:>5}", r.points);
            let team = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_name(&r.team, width - fixed_width),
                Some(_) => truncate_name(&r.team, 20),
                None => r.team.clone(),
            };

            if use_colors {
                format!("{} {}  {}", index_str.dimmed(), points.bold(), team)
            } else {
                format!("{} {}  {}", index_str, points, team)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format each active round's winning teams
/// Format: "Round {n}: {team}, {team} ({points})"
pub fn format_round_winners(standings: &Standings, use_colors: bool) -> String {
    if standings.round_winners.is_empty() {
        return "No rounds scored yet.".to_string();
    }

    standings
        .round_winners
        .iter()
        .map(|w| {
            let label = match w.round {
                RoundKey::Average => "Average".to_string(),
                RoundKey::Numbered(n) => format!("Round {}", n),
            };
            let teams = w.teams.join(", ");
            if use_colors {
                format!("{}: {} ({})", label.cyan(), teams.bold(), w.points)
            } else {
                format!("{}: {} ({})", label, teams, w.points)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn round_cells(active_rounds: &[RoundKey], points: impl Fn(RoundKey) -> u32) -> String {
    active_rounds
        .iter()
        .map(|&round| format!("{:>4}", points(round)))
        .collect()
}

/// Format one team's per-event breakdown over the active rounds
pub fn format_team_detail(team: &ScoredTeam, active_rounds: &[RoundKey], use_colors: bool) -> String {
    let label_width = team
        .events
        .iter()
        .map(|e| short_event_label(&e.event).chars().count())
        .max()
        .unwrap_or(0);
    let name_width = team
        .events
        .iter()
        .map(|e| e.contestant.to_string().chars().count())
        .max()
        .unwrap_or(0);

    let header = format!(
        "{:<lw$}  {:<nw$}{}  {:>5}",
        "",
        "",
        active_rounds.iter().map(|r| format!("{:>4}", r.to_string())).collect::<String>(),
        "Total",
        lw = label_width,
        nw = name_width,
    );

    let mut lines = Vec::with_capacity(team.events.len() + 3);
    if use_colors {
        lines.push(format!("{}  {}", team.team.bold(), team.total.bold()));
        lines.push(header.dimmed().to_string());
    } else {
        lines.push(format!("{}  {}", team.team, team.total));
        lines.push(header);
    }

    for ev in &team.events {
        let label = format!("{:<width$}", short_event_label(&ev.event), width = label_width);
        let name = format!("{:<width$}", ev.contestant.to_string(), width = name_width);
        let cells = round_cells(active_rounds, |r| ev.rounds.get(r));
        let total = format!("{:>5}", ev.rounds.total());
        if use_colors {
            lines.push(format!("{}  {}{}  {}", label.cyan(), name, cells, total.bold()));
        } else {
            lines.push(format!("{}  {}{}  {}", label, name, cells, total));
        }
    }

    lines.push(format!(
        "{:<lw$}  {:<nw$}{}  {:>5}",
        "",
        "",
        round_cells(active_rounds, |r| team.total_per_round.get(r)),
        team.total,
        lw = label_width,
        nw = name_width,
    ));

    lines.join("\n")
}

/// Format the full scoreboard: rankings, round winners, then each team
pub fn format_scoreboard(board: &Scoreboard, use_colors: bool) -> String {
    let title = format!("Season {}", board.season);
    let mut sections = vec![
        if use_colors { title.bold().to_string() } else { title },
        format_rankings(&board.standings, use_colors),
    ];

    if !board.teams.is_empty() {
        sections.push(format_round_winners(&board.standings, use_colors));
        for team in &board.teams {
            sections.push(format_team_detail(team, &board.standings.active_rounds, use_colors));
        }
    }

    sections.join("\n\n")
}

/// Format scored teams as tab-separated values for scripting
/// Columns: team, event, contestant, rounds 1-10, average, total (no headers, no colors)
pub fn format_tsv(board: &Scoreboard) -> String {
    board
        .teams
        .iter()
        .flat_map(|team| {
            team.events.iter().map(move |ev| {
                let rounds = ev
                    .rounds
                    .as_slice()
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join("\t");
                format!("{}\t{}\t{}\t{}\t{}", team.team, ev.event, ev.contestant, rounds, ev.rounds.total())
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}
