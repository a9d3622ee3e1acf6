use serde::Serialize;
use tracing::{debug, info};

use crate::constants::UNKNOWN_SENTINEL;
use crate::types::{CsvDocument, Row};

/// Field roles for one cleaning pass.
#[derive(Debug, Clone, Copy)]
pub struct CleanFields<'a> {
    /// Rows whose value here is absent or blank are dropped.
    pub required: &'a str,
    /// Must be a non-negative integer, otherwise replaced by the sentinel.
    pub numeric: &'a str,
    /// Trimmed and lowercased when present.
    pub normalize: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub retained: usize,
    pub dropped: usize,
}

/// Repair rows in place and drop those missing the required field.
pub fn clean(document: CsvDocument, fields: CleanFields<'_>) -> CleanResult {
    let (columns, rows) = document.into_parts();
    let input_rows = rows.len();

    let mut retained_rows = Vec::with_capacity(input_rows);
    for (index, mut row) in rows.into_iter().enumerate() {
        if row.get(fields.required).map_or(true, |v| v.trim().is_empty()) {
            debug!(row = index + 1, field = fields.required, "dropping row without required field");
            continue;
        }

        let numeric = clean_numeric(row.get(fields.numeric).unwrap_or(""));
        row.set(fields.numeric, numeric);

        if let Some(value) = row.get(fields.normalize).filter(|v| !v.is_empty()) {
            let normalized = value.trim().to_lowercase();
            row.set(fields.normalize, normalized);
        }

        retained_rows.push(row);
    }

    let retained = retained_rows.len();
    let dropped = input_rows - retained;
    info!("Cleaned {} rows, dropped {}", retained, dropped);

    CleanResult {
        columns,
        rows: retained_rows,
        retained,
        dropped,
    }
}

/// Canonical decimal form of a non-negative integer, or the sentinel.
///
/// Accepts an optional sign and ASCII digits of any length after trimming, so
/// values beyond the machine integer range keep their digits. Leading zeros
/// are stripped and `-0` is zero.
pub fn clean_numeric(raw: &str) -> String {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return UNKNOWN_SENTINEL.to_string();
    }

    let canonical = digits.trim_start_matches('0');
    if canonical.is_empty() {
        return "0".to_string();
    }
    if negative {
        return UNKNOWN_SENTINEL.to_string();
    }
    canonical.to_string()
}
