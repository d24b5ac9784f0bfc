//! CSV loading and parsing for the restaurant listings export.

use crate::config::REQUIRED_COLUMNS;
use crate::utils::normalize_headers;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("CSV is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// One row of the export, keyed by normalized column names.
///
/// `locality_verbose` and `switch_to_order_menu` are never read.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RawRecord {
    pub restaurant_id: i64,

    pub restaurant_name: String,

    /// Numeric country code, resolved through the country table
    pub country_code: i64,

    pub city: String,

    pub address: Option<String>,

    pub locality: Option<String>,

    pub longitude: f64,

    pub latitude: f64,

    /// Comma-separated cuisine list; empty means null
    pub cuisines: Option<String>,

    pub average_cost_for_two: f64,

    pub currency: String,

    #[serde(deserialize_with = "deserialize_flag")]
    pub has_table_booking: bool,

    #[serde(deserialize_with = "deserialize_flag")]
    pub has_online_delivery: bool,

    #[serde(deserialize_with = "deserialize_flag")]
    pub is_delivering_now: bool,

    pub price_range: i64,

    pub aggregate_rating: f64,

    /// Uppercase hex RGB, no leading `#`
    pub rating_color: String,

    pub rating_text: Option<String>,

    pub votes: i64,
}

/// Accept `1/0`, `Yes/No` and `true/false` service flags.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" => Ok(true),
        "0" | "no" | "false" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid service flag {:?}",
            other
        ))),
    }
}

/// Load and parse the listings CSV.
///
/// Headers are normalized before any row is read. A missing file, an
/// unreadable header row or a missing required column is fatal; rows that
/// fail to parse are skipped with a warning.
pub fn load_raw_records(csv_path: &Path) -> Result<Vec<RawRecord>> {
    info!("Loading CSV: {:?}", csv_path);

    let file = File::open(csv_path).with_context(|| format!("Failed to open {:?}", csv_path))?;
    read_raw_records(file)
}

/// Parse listings from any reader.
pub fn read_raw_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true) // Short rows surface as per-row errors
        .from_reader(reader);

    let raw_headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(str::to_string)
        .collect();
    let normalized = normalize_headers(&raw_headers);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !normalized.iter().any(|h| h.as_str() == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing).into());
    }

    let headers = csv::StringRecord::from(normalized);
    let mut records = Vec::new();
    let mut skipped = 0;

    for result in rdr.records() {
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping unreadable row: {}", e);
                skipped += 1;
                continue;
            }
        };

        match row.deserialize::<RawRecord>(Some(&headers)) {
            Ok(record) => records.push(record),
            Err(e) => {
                // Skip malformed rows with a warning
                warn!("Skipping malformed row: {}", e);
                skipped += 1;
            }
        }
    }

    info!("Loaded {} records ({} skipped)", records.len(), skipped);
    Ok(records)
}
