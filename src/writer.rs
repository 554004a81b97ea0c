// 💾 Writer - Consolidated CSV output

use csv::WriterBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CleanError, Result};
use crate::transaction::{CleanTransaction, OUTPUT_COLUMNS};

/// Write `transactions` to `path` with the fixed output header.
///
/// The header is written even when there are no rows. Output goes to a
/// sibling temporary file first and is renamed over `path`, so an existing
/// file is always replaced and a failed run leaves no partial file behind.
pub fn write_transactions(path: &Path, transactions: &[CleanTransaction]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CleanError::io(parent, e))?;
    }

    let tmp_path = temporary_path(path);

    if let Err(err) = write_csv(&tmp_path, path, transactions) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CleanError::io(path, e)
    })?;

    debug!(path = %path.display(), rows = transactions.len(), "wrote output file");
    Ok(())
}

fn write_csv(tmp_path: &Path, path: &Path, transactions: &[CleanTransaction]) -> Result<()> {
    let write_error = |source: csv::Error| CleanError::Write {
        path: path.to_path_buf(),
        source,
    };

    // Header is written by hand so an empty table still gets one
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(tmp_path)
        .map_err(write_error)?;

    writer.write_record(OUTPUT_COLUMNS).map_err(write_error)?;

    for tx in transactions {
        writer.serialize(tx).map_err(write_error)?;
    }

    writer.flush().map_err(|e| CleanError::io(tmp_path, e))?;
    Ok(())
}

fn temporary_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("output.csv");
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample() -> CleanTransaction {
        CleanTransaction::new(
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            Some("expense".to_string()),
            Some("Eating out/take away".to_string()),
            Some(-12.5),
            Some("Pizza, large".to_string()),
            Some("monthly".to_string()),
        )
    }

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_transactions(&path, &[sample()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines[0],
            "Date,Type,Category,Amount,Note,Labels,Year,Month,YearMonth"
        );
        assert_eq!(
            lines[1],
            "2024-03-09,expense,Eating out/take away,-12.5,\"Pizza, large\",monthly,2024,3,2024-03"
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_nulls_are_empty_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let tx = CleanTransaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            Some("expense".to_string()),
            Some("Groceries".to_string()),
            Some(-20.0),
            None,
            None,
        );

        write_transactions(&path, &[tx]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert!(row.starts_with("2024-01-05,expense,Groceries,-20"));
        assert!(row.ends_with(",,,2024,1,2024-01"));
    }

    #[test]
    fn test_empty_table_writes_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_transactions(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Date,Type,Category,Amount,Note,Labels,Year,Month,YearMonth\n"
        );
    }

    #[test]
    fn test_overwrites_existing_file_and_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cleaned").join("spendee.csv");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale contents\n").unwrap();

        write_transactions(&path, &[sample()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert!(!temporary_path(&path).exists());
    }

    #[test]
    fn test_unwritable_output_fails() {
        let dir = tempdir().unwrap();
        // A regular file where a directory is expected
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("out.csv");

        let result = write_transactions(&path, &[sample()]);
        assert!(matches!(result, Err(CleanError::Io { .. })));
    }
}
