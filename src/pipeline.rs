// 🔄 Pipeline - load → remap → dedup → project → label → write

use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{EmptyInputPolicy, PipelineConfig};
use crate::deduplication::deduplicate;
use crate::error::{CleanError, Result};
use crate::loader::{concat, load_directory};
use crate::normalize::{project_all, remap_categories};
use crate::rules::{LabelEngine, LabelSummary};
use crate::transaction::{CleanTransaction, SourceRow};
use crate::writer::write_transactions;

// ============================================================================
// REPORT
// ============================================================================

/// What one run did
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub files_loaded: usize,
    pub rows_loaded: usize,
    pub categories_remapped: usize,
    pub duplicates_removed: usize,
    pub rows_written: usize,
    pub labels: LabelSummary,
    pub output_path: PathBuf,
}

impl PipelineReport {
    pub fn summary(&self) -> String {
        format!(
            "{} files, {} rows loaded, {} duplicates removed, {} rows written",
            self.files_loaded, self.rows_loaded, self.duplicates_removed, self.rows_written
        )
    }
}

/// Result of the in-memory stages
#[derive(Debug, Clone)]
pub struct CleanOutput {
    pub transactions: Vec<CleanTransaction>,
    pub categories_remapped: usize,
    pub duplicates_removed: usize,
    pub labels: LabelSummary,
}

// ============================================================================
// STAGES
// ============================================================================

/// Run every transformation on the unified table, without touching disk.
///
/// Order: category remap, deduplication, date parsing and projection, then
/// note cleanup and label rules.
pub fn clean(mut rows: Vec<SourceRow>) -> Result<CleanOutput> {
    let categories_remapped = remap_categories(&mut rows);

    let dedup = deduplicate(rows);
    info!(
        removed = dedup.removed,
        remaining = dedup.rows.len(),
        "deduplicated rows"
    );

    let mut transactions = project_all(dedup.rows)?;

    let labels = LabelEngine::spendee_default().apply(&mut transactions);

    Ok(CleanOutput {
        transactions,
        categories_remapped,
        duplicates_removed: dedup.removed,
        labels,
    })
}

/// Full run: read the input directory, clean, write the output file
pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    let batches = load_directory(&config.input_dir)?;
    let files_loaded = batches.len();

    if files_loaded == 0 {
        match config.empty_input {
            EmptyInputPolicy::Fail => {
                return Err(CleanError::NoInputFiles(config.input_dir.clone()));
            }
            EmptyInputPolicy::WriteHeaderOnly => {
                warn!(
                    dir = %config.input_dir.display(),
                    "no export files found, writing header-only output"
                );
            }
        }
    }

    let rows = concat(batches);
    let rows_loaded = rows.len();
    info!(files = files_loaded, rows = rows_loaded, "loaded exports");

    let output = clean(rows)?;

    write_transactions(&config.output_path, &output.transactions)?;
    info!(
        path = %config.output_path.display(),
        rows = output.transactions.len(),
        "wrote cleaned transactions"
    );

    Ok(PipelineReport {
        files_loaded,
        rows_loaded,
        categories_remapped: output.categories_remapped,
        duplicates_removed: output.duplicates_removed,
        rows_written: output.transactions.len(),
        labels: output.labels,
        output_path: config.output_path.clone(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
