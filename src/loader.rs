// 📂 Loader - Spendee export discovery and parsing
// One batch per export file, concatenated once at the end

use csv::ReaderBuilder;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CleanError, Result};
use crate::transaction::{RowOrigin, SourceRow, SpendeeRecord};

// ============================================================================
// RECORD BATCH
// ============================================================================

/// Rows read from a single export file, in file order
#[derive(Debug, Clone)]
pub struct RecordBatch {
    /// File name the rows were read from
    pub source: String,
    pub rows: Vec<SourceRow>,
}

// ============================================================================
// DISCOVERY
// ============================================================================

/// List the regular files in `dir`, sorted by file name.
///
/// Subdirectories are skipped. Symlinks are followed, so a link to a file
/// counts as a file.
pub fn discover_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CleanError::MissingInputDir(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| CleanError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CleanError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    // read_dir order is filesystem-dependent
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

// ============================================================================
// PARSING
// ============================================================================

/// Parse one Spendee CSV export.
///
/// Columns are matched by header name; see [`SpendeeRecord`] for which ones
/// are required.
pub fn load_file(path: &Path) -> Result<RecordBatch> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown.csv")
        .to_string();

    let file = File::open(path).map_err(|e| CleanError::io(path, e))?;

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let csv_error = |source: csv::Error| CleanError::Csv {
        file: filename.clone(),
        source,
    };

    let headers = reader.headers().map_err(csv_error)?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let parsed: SpendeeRecord = record.deserialize(Some(&headers)).map_err(csv_error)?;

        rows.push(SourceRow {
            record: parsed,
            origin: RowOrigin {
                file: filename.clone(),
                line,
            },
        });
    }

    debug!(file = %filename, rows = rows.len(), "parsed export file");

    Ok(RecordBatch {
        source: filename,
        rows,
    })
}

/// Discover and parse every export in `dir`, one batch per file
pub fn load_directory(dir: &Path) -> Result<Vec<RecordBatch>> {
    discover_files(dir)?
        .iter()
        .map(|path| load_file(path))
        .collect()
}

/// Flatten batches into the unified table: file order, then row order
pub fn concat(batches: Vec<RecordBatch>) -> Vec<SourceRow> {
    let total = batches.iter().map(|b| b.rows.len()).sum();
    let mut rows = Vec::with_capacity(total);
    for batch in batches {
        rows.extend(batch.rows);
    }
    rows
}

// ============================================================================
// TESTS
// ============================================================================
