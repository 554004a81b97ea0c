use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::period::YearMonth;

/// Column order of the consolidated output file
pub const OUTPUT_COLUMNS: [&str; 9] = [
    "Date", "Type", "Category", "Amount", "Note", "Labels", "Year", "Month", "YearMonth",
];

/// One row of a Spendee export, matched to columns by header name.
///
/// Only the `Date` column is required. Every other column is nullable: an
/// empty cell or a column missing from the file both read as `None`. A
/// non-empty `Amount` that is not a number is a parse error. Columns not
/// listed here are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpendeeRecord {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Wallet", default)]
    pub wallet: Option<String>,

    #[serde(rename = "Type", default)]
    pub transaction_type: Option<String>,

    #[serde(rename = "Category name", default)]
    pub category_name: Option<String>,

    #[serde(rename = "Amount", default)]
    pub amount: Option<f64>,

    #[serde(rename = "Currency", default)]
    pub currency: Option<String>,

    #[serde(rename = "Note", default)]
    pub note: Option<String>,

    #[serde(rename = "Labels", default)]
    pub labels: Option<String>,

    #[serde(rename = "Author", default)]
    pub author: Option<String>,
}

/// Where a row came from. Used for error messages only, never for identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOrigin {
    pub file: String,
    /// 1-based line in the source file (the header is line 1)
    pub line: u64,
}

/// A source record plus its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub record: SpendeeRecord,
    pub origin: RowOrigin,
}

/// Normalized transaction as written to the output file.
///
/// `Year`, `Month` and `YearMonth` are derived from `Date` on construction
/// and have no setters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanTransaction {
    #[serde(rename = "Date")]
    date: NaiveDate,

    #[serde(rename = "Type")]
    pub transaction_type: Option<String>,

    #[serde(rename = "Category")]
    pub category: Option<String>,

    #[serde(rename = "Amount")]
    pub amount: Option<f64>,

    #[serde(rename = "Note")]
    pub note: Option<String>,

    #[serde(rename = "Labels")]
    pub labels: Option<String>,

    #[serde(rename = "Year")]
    year: i32,

    #[serde(rename = "Month")]
    month: u32,

    #[serde(rename = "YearMonth")]
    year_month: YearMonth,
}

impl CleanTransaction {
    pub fn new(
        date: NaiveDate,
        transaction_type: Option<String>,
        category: Option<String>,
        amount: Option<f64>,
        note: Option<String>,
        labels: Option<String>,
    ) -> Self {
        let year_month = YearMonth::from_date(date);
        CleanTransaction {
            date,
            transaction_type,
            category,
            amount,
            note,
            labels,
            year: year_month.year(),
            month: year_month.month(),
            year_month,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year_month(&self) -> YearMonth {
        self.year_month
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_period() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let tx = CleanTransaction::new(date, None, None, Some(-20.0), None, None);

        assert_eq!(tx.year(), 2024);
        assert_eq!(tx.month(), 1);
        assert_eq!(tx.year_month().to_string(), "2024-01");
    }

    #[test]
    fn test_missing_amount_stays_null() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 30).unwrap();
        let tx = CleanTransaction::new(date, Some("expense".to_string()), None, None, None, None);

        assert_eq!(tx.amount, None);
        assert_eq!(tx.year_month().to_string(), "2023-11");
    }

    #[test]
    fn test_output_columns_order() {
        assert_eq!(OUTPUT_COLUMNS[0], "Date");
        assert_eq!(OUTPUT_COLUMNS[2], "Category");
        assert_eq!(OUTPUT_COLUMNS[8], "YearMonth");
    }
}
