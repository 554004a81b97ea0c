// 🧹 Normalizer - Category remap, date parsing, rename and projection

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{CleanError, Result};
use crate::transaction::{CleanTransaction, SourceRow};

/// Categories renamed in the budgeting app over time, old name first
pub const CATEGORY_REMAP: [(&str, &str); 2] = [
    ("Alcohol and cigarettes", "Tobaco"),
    ("Food & Drink", "Groceries"),
];

// ============================================================================
// CATEGORY REMAP
// ============================================================================

/// Replace a legacy category name with its current one, if it has one
pub fn remap_category(name: &str) -> Option<&'static str> {
    CATEGORY_REMAP
        .iter()
        .find(|(old, _)| *old == name)
        .map(|(_, new)| *new)
}

/// Apply [`CATEGORY_REMAP`] to every row's `Category name`
pub fn remap_categories(rows: &mut [SourceRow]) -> usize {
    let mut remapped = 0;
    for row in rows.iter_mut() {
        let replacement = row.record.category_name.as_deref().and_then(remap_category);
        if let Some(new) = replacement {
            row.record.category_name = Some(new.to_string());
            remapped += 1;
        }
    }
    remapped
}

// ============================================================================
// DATE PARSING
// ============================================================================

// %.f also accepts a timestamp with no fractional part
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a Spendee `Date` cell into a calendar date.
///
/// Timestamps with an offset keep the calendar date in that offset, so
/// `2024-01-31T23:30:00-05:00` is January 31st.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    None
}

// ============================================================================
// PROJECTION
// ============================================================================

/// Parse the date, rename `Category name` to `Category` and drop the
/// columns the output does not carry (`Wallet`, `Currency`, `Author`).
pub fn project(row: SourceRow) -> Result<CleanTransaction> {
    let SourceRow { record, origin } = row;

    let date = parse_date(&record.date).ok_or_else(|| CleanError::InvalidDate {
        file: origin.file.clone(),
        line: origin.line,
        value: record.date.clone(),
    })?;

    Ok(CleanTransaction::new(
        date,
        record.transaction_type,
        record.category_name,
        record.amount,
        record.note,
        record.labels,
    ))
}

/// Project every row, stopping at the first unparseable date
pub fn project_all(rows: Vec<SourceRow>) -> Result<Vec<CleanTransaction>> {
    rows.into_iter().map(project).collect()
}

// ============================================================================
// TESTS
// ============================================================================
