pub mod formatter;

pub use formatter::{
    format_contestants, format_cost, format_rankings, format_round_winners, format_scoreboard,
    format_team_detail, format_tsv, short_event_label, should_use_colors,
};
