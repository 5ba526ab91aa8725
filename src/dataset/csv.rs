//! Crunchbase-style CSV exports
//!
//! Only the columns the network needs are declared; any other columns in
//! the files are ignored.

use super::DatasetResult;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// One row of `investments.csv`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvestmentRow {
    #[serde(default)]
    pub funding_round_id: Option<String>,
    pub funded_object_id: String,
    pub investor_object_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One row of `funding_rounds.csv`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FundingRoundRow {
    pub funding_round_id: String,
    #[serde(default)]
    pub funding_round_type: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub raised_amount_usd: Option<f64>,
    #[serde(default)]
    pub funded_at: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub pre_money_valuation_usd: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub post_money_valuation_usd: Option<f64>,
}

/// One row of `objects.csv`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectRow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category_code: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Canonical form of an identifier read from CSV.
///
/// Numeric ids exported through a float column come back as `1234.0`;
/// those are reduced to `1234`.
pub fn normalize_id(raw: &str) -> String {
    let raw = raw.trim();
    match raw.strip_suffix(".0") {
        Some(int) if !int.is_empty() && int.bytes().all(|b| b.is_ascii_digit()) => int.to_string(),
        _ => raw.to_string(),
    }
}

/// Deserialize all rows from a reader. Malformed rows are skipped.
pub fn read_rows_from<R: Read, T: DeserializeOwned>(reader: R) -> DatasetResult<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    // Fail early when the header row itself is unreadable
    csv_reader.headers()?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (line, result) in csv_reader.deserialize().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                debug!(line = line + 2, error = %e, "Skipping malformed CSV row");
            }
        }
    }
    if skipped > 0 {
        warn!(skipped, kept = rows.len(), "Skipped malformed CSV rows");
    }
    Ok(rows)
}

/// Deserialize all rows from a CSV file
pub fn read_rows<T: DeserializeOwned>(path: impl AsRef<Path>) -> DatasetResult<Vec<T>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_rows_from(std::io::BufReader::new(file))
}
