// Spendee Cleaner - Core Library
// Merges per-period Spendee exports into one cleaned, labelled CSV

pub mod config;
pub mod deduplication;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod period;
pub mod pipeline;
pub mod rules;
pub mod transaction;
pub mod writer;

// Re-export commonly used types
pub use config::{EmptyInputPolicy, PipelineConfig, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_PATH};
pub use deduplication::{deduplicate, fingerprint, DedupOutcome};
pub use error::{CleanError, Result};
pub use loader::{concat, discover_files, load_directory, load_file, RecordBatch};
pub use normalize::{parse_date, project, project_all, remap_categories, CATEGORY_REMAP};
pub use period::YearMonth;
pub use pipeline::{clean, run, CleanOutput, PipelineReport};
pub use rules::{
    clean_note, ApplyMode, Condition, LabelEngine, LabelRule, LabelSummary, NOTE_REWRITES,
};
pub use transaction::{CleanTransaction, RowOrigin, SourceRow, SpendeeRecord, OUTPUT_COLUMNS};
pub use writer::write_transactions;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
