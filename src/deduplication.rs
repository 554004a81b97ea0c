// 🔍 Deduplication - Drop exact repeats of earlier rows
// Overlapping exports list the same transaction more than once

use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::transaction::{SourceRow, SpendeeRecord};

// ============================================================================
// FINGERPRINT
// ============================================================================

/// Compute the identity of a record across all nine source columns.
///
/// Each text field is length-prefixed with a null marker so that `None` and
/// `Some("")`, or adjacent fields, can never run together. Amounts compare
/// numerically: `-20` and `-20.0` hash the same, as do `0` and `-0`. A null
/// amount uses the same null marker as text.
pub fn fingerprint(record: &SpendeeRecord) -> String {
    let mut hasher = Sha256::new();

    hash_text(&mut hasher, Some(record.date.as_str()));
    hash_text(&mut hasher, record.wallet.as_deref());
    hash_text(&mut hasher, record.transaction_type.as_deref());
    hash_text(&mut hasher, record.category_name.as_deref());

    match record.amount {
        None => hasher.update([0u8]),
        Some(amount) => {
            let amount = if amount == 0.0 { 0.0 } else { amount };
            hasher.update([1u8]);
            hasher.update(amount.to_bits().to_le_bytes());
        }
    }

    hash_text(&mut hasher, record.currency.as_deref());
    hash_text(&mut hasher, record.note.as_deref());
    hash_text(&mut hasher, record.labels.as_deref());
    hash_text(&mut hasher, record.author.as_deref());

    format!("{:x}", hasher.finalize())
}

fn hash_text(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        None => hasher.update([0u8]),
        Some(text) => {
            hasher.update([1u8]);
            hasher.update((text.len() as u64).to_le_bytes());
            hasher.update(text.as_bytes());
        }
    }
}

// ============================================================================
// DEDUPLICATION
// ============================================================================

/// Rows that survived deduplication, plus how many were dropped
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    pub rows: Vec<SourceRow>,
    pub removed: usize,
}

/// Keep the first occurrence of every distinct record, preserving order.
///
/// Provenance is not part of a row's identity: the same transaction read
/// from two files is a duplicate.
pub fn deduplicate(rows: Vec<SourceRow>) -> DedupOutcome {
    let before = rows.len();
    let mut seen = HashSet::with_capacity(before);

    let rows: Vec<SourceRow> = rows
        .into_iter()
        .filter(|row| seen.insert(fingerprint(&row.record)))
        .collect();

    DedupOutcome {
        removed: before - rows.len(),
        rows,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::RowOrigin;

    fn create_test_row(date: &str, amount: f64, category: &str, note: Option<&str>) -> SourceRow {
        SourceRow {
            record: SpendeeRecord {
                date: date.to_string(),
                wallet: Some("Main".to_string()),
                transaction_type: Some("expense".to_string()),
                category_name: Some(category.to_string()),
                amount: Some(amount),
                currency: Some("GBP".to_string()),
                note: note.map(str::to_string),
                labels: None,
                author: None,
            },
            origin: RowOrigin {
                file: "test.csv".to_string(),
                line: 2,
            },
        }
    }

    #[test]
    fn test_exact_duplicate_removed() {
        let rows = vec![
            create_test_row("2024-01-05", -20.0, "Groceries", None),
            create_test_row("2024-01-05", -20.0, "Groceries", None),
        ];

        let outcome = deduplicate(rows);
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.removed, 1);
    }

    #[test]
    fn test_first_occurrence_kept_in_order() {
        let mut first = create_test_row("2024-01-05", -20.0, "Groceries", None);
        first.origin.file = "a.csv".to_string();
        let mut repeat = first.clone();
        repeat.origin.file = "b.csv".to_string();

        let rows = vec![
            first,
            create_test_row("2024-01-06", -5.0, "Transport", None),
            repeat,
            create_test_row("2024-01-07", -7.0, "Transport", None),
        ];

        let outcome = deduplicate(rows);
        let dates: Vec<_> = outcome.rows.iter().map(|r| r.record.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-05", "2024-01-06", "2024-01-07"]);
        assert_eq!(outcome.rows[0].origin.file, "a.csv");
    }

    #[test]
    fn test_single_column_difference_is_not_duplicate() {
        let a = create_test_row("2024-01-05", -20.0, "Groceries", None);
        let mut b = a.clone();
        b.record.author = Some("Alex".to_string());

        let outcome = deduplicate(vec![a, b]);
        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.removed, 0);
    }

    #[test]
    fn test_null_differs_from_empty_string() {
        let a = create_test_row("2024-01-05", -20.0, "Groceries", None);
        let b = create_test_row("2024-01-05", -20.0, "Groceries", Some(""));

        assert_ne!(fingerprint(&a.record), fingerprint(&b.record));
    }

    #[test]
    fn test_fields_do_not_run_together() {
        let mut a = create_test_row("2024-01-05", -20.0, "Groceries", Some("ab"));
        a.record.labels = Some("c".to_string());
        let mut b = create_test_row("2024-01-05", -20.0, "Groceries", Some("a"));
        b.record.labels = Some("bc".to_string());

        assert_ne!(fingerprint(&a.record), fingerprint(&b.record));
    }

    #[test]
    fn test_zero_amounts_match_regardless_of_sign() {
        let a = create_test_row("2024-01-05", 0.0, "Groceries", None);
        let b = create_test_row("2024-01-05", -0.0, "Groceries", None);

        assert_eq!(fingerprint(&a.record), fingerprint(&b.record));
    }

    #[test]
    fn test_null_amounts_deduplicate() {
        let mut a = create_test_row("2024-01-05", 0.0, "Rent", None);
        a.record.amount = None;
        let b = a.clone();
        let zero = create_test_row("2024-01-05", 0.0, "Rent", None);

        assert_ne!(fingerprint(&a.record), fingerprint(&zero.record));

        let outcome = deduplicate(vec![a, b, zero]);
        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[0].record.amount, None);
        assert_eq!(outcome.rows[1].record.amount, Some(0.0));
    }

    #[test]
    fn test_deduplicate_is_idempotent() {
        let rows = vec![
            create_test_row("2024-01-05", -20.0, "Groceries", None),
            create_test_row("2024-01-05", -20.0, "Groceries", None),
            create_test_row("2024-01-06", -3.5, "Transport", Some("bus")),
            create_test_row("2024-01-06", -3.5, "Transport", Some("bus")),
            create_test_row("2024-01-06", -3.5, "Transport", Some("train")),
        ];

        let once = deduplicate(rows);
        let twice = deduplicate(once.rows.clone());

        assert_eq!(once.rows, twice.rows);
        assert_eq!(twice.removed, 0);
    }
}
