pub mod loader;
pub mod matcher;
pub mod parser;
pub mod types;

pub use loader::{load_all_event_results, DirResultSource, ResultSource, EVENT_RESULT_FILES};
pub use matcher::{match_contestant, normalize_name, split_pair};
pub use parser::{parse_results, HEADER_EVENT, HEELER_EVENT};
pub use types::{
    Place, Placement, ResultsByEvent, ResultsTable, RoundKey, AVERAGE_ROUND_LABELS, NUM_ROUNDS,
    ROUND_SLOTS,
};
