use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rodeo_fantasy::config::{load_config, validate_config};
use rodeo_fantasy::output;
use rodeo_fantasy::report::{build_scoreboard, load_event_results};
use rodeo_fantasy::results::{DirResultSource, EVENT_RESULT_FILES};
use rodeo_fantasy::roster::load_roster;
use rodeo_fantasy::season::{discover_seasons, select_season, Season};
use rodeo_fantasy::teams::{submit_team, JsonTeamStore, SubmissionError, TeamStore, TeamSubmission};

const EXIT_SUCCESS: i32 = 0;
const EXIT_REJECTED: i32 = 1;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List seasons with a published roster (newest first)
    Seasons,
    /// List the season's events in selection order
    Events,
    /// List an event's contestants with rank and cost
    Contestants {
        /// Event name, e.g. "Bull Riding"
        event: String,
    },
    /// Validate and save a team
    Submit {
        /// Team name (unique per season, case-insensitive)
        #[arg(short, long)]
        name: String,
        /// One contestant rank per event, in event order (e.g. 3,10,1,...)
        #[arg(short, long, value_delimiter = ',', required = true)]
        selections: Vec<usize>,
    },
    /// Print whether a team name is already taken this season
    TeamExists {
        name: String,
    },
    /// Print every event's aggregated results as JSON
    EventResults,
    /// Score all teams and show rankings and round winners (default if no subcommand)
    Results {
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
}

#[derive(Parser, Debug)]
#[command(name = "rodeo-fantasy")]
#[command(about = "Fantasy rodeo team scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/rodeo-fantasy/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Season year (defaults to the newest published season)
    #[arg(long, global = true)]
    season: Option<String>,

    /// Directory holding season rosters and team files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory holding scraped results CSVs
    #[arg(long, global = true)]
    results_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Logs go to stderr so stdout stays clean for piping.
/// `--verbose` forces debug, otherwise RUST_LOG or warn.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with(code: i32, message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with(EXIT_DATA, format!("Failed to serialize output: {}", e)),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Results { format: Format::Table });

    // Load config
    let config = match load_config(cli.config) {
        Ok(c) => c,
        Err(e) => exit_with(EXIT_CONFIG, format!("Config error: {:#}", e)),
    };

    // Validate config at startup
    if let Err(errors) = validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir());
    let results_dir = cli.results_dir.unwrap_or_else(|| config.results_dir());
    debug!(data_dir = %data_dir.display(), results_dir = %results_dir.display(), "resolved paths");

    let available = match discover_seasons(&data_dir) {
        Ok(s) => s,
        Err(e) => exit_with(EXIT_DATA, format!("Failed to list seasons: {:#}", e)),
    };

    // Listing and submitting contestants needs the exact season asked for
    let strict = matches!(command, Commands::Contestants { .. } | Commands::Submit { .. });
    let requested = cli.season.or_else(|| config.season.clone());
    let season: Season = match select_season(requested.as_deref(), &available, strict) {
        Ok(s) => s,
        Err(e) => exit_with(EXIT_REJECTED, e),
    };

    let roster = || match load_roster(&data_dir, season) {
        Ok(r) => r,
        Err(e) => exit_with(EXIT_DATA, format!("Roster error: {:#}", e)),
    };
    let store = JsonTeamStore::new(&data_dir);
    let source = DirResultSource::new(&results_dir);
    let use_colors = output::should_use_colors();

    match command {
        Commands::Seasons => {
            for s in available.iter().rev() {
                println!("{}", s);
            }
        }
        Commands::Events => {
            let roster = roster();
            let events = if roster.is_empty() {
                EVENT_RESULT_FILES.iter().map(|(event, _)| event.to_string()).collect()
            } else {
                roster.events()
            };
            for event in events {
                println!("{}", event);
            }
        }
        Commands::Contestants { event } => match roster().listing(&event) {
            Some(listing) => println!("{}", output::format_contestants(&listing, use_colors)),
            None => exit_with(EXIT_REJECTED, format!("Event not found: {}", event)),
        },
        Commands::Submit { name, selections } => {
            let roster = roster();
            let submission = TeamSubmission { name, selections };
            match submit_team(&store, season, &roster, submission, config.budget(), Utc::now()) {
                Ok(team) => println!(
                    "Saved team '{}' for {} ({})",
                    team.name,
                    season,
                    output::format_cost(team.total_cost)
                ),
                Err(SubmissionError::Store(e)) => exit_with(EXIT_DATA, format!("Team store error: {:#}", e)),
                Err(e) => exit_with(EXIT_REJECTED, e),
            }
        }
        Commands::TeamExists { name } => match store.exists_by_name(season, &name) {
            Ok(exists) => println!("{}", exists),
            Err(e) => exit_with(EXIT_DATA, format!("Team store error: {:#}", e)),
        },
        Commands::EventResults => {
            let results = load_event_results(&source, season, &roster());
            print_json(&results);
        }
        Commands::Results { format } => {
            let board = match build_scoreboard(&store, &source, season, &roster()) {
                Ok(b) => b,
                Err(e) => exit_with(EXIT_DATA, format!("{:#}", e)),
            };
            match format {
                Format::Table => println!("{}", output::format_scoreboard(&board, use_colors)),
                Format::Tsv => {
                    let tsv = output::format_tsv(&board);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
                Format::Json => print_json(&board),
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
