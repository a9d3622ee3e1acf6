use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::{debug, info};

use crate::types::CsvDocument;

/// Insertion-ordered counters keyed by field name.
///
/// Serializes as a JSON object in insertion order. Only positive counts are
/// ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap {
    entries: Vec<(String, usize)>,
}

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 += 1,
            None => self.entries.push((key.to_string(), 1)),
        }
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), *n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CountMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, n) in &self.entries {
            map.serialize_entry(k, n)?;
        }
        map.end()
    }
}

/// Per-column data-quality statistics for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub row_count: usize,
    pub columns: Vec<String>,
    /// Columns with at least one absent or empty value, in column order.
    pub missing_values: CountMap,
    /// Numeric fields with at least one non-positive value.
    pub invalid_values: CountMap,
}

/// Count missing values per column and non-positive values per numeric field.
///
/// A value is missing when it is absent or exactly `""`; whitespace and `"0"`
/// are present values. A numeric field whose value does not parse as a number
/// is skipped, not counted as invalid.
pub fn audit<S: AsRef<str>>(document: &CsvDocument, numeric_fields: &[S]) -> QualityReport {
    let columns = document.columns().to_vec();
    let mut missing = vec![0usize; columns.len()];
    let mut invalid_values = CountMap::new();

    let mut fields: Vec<&str> = Vec::with_capacity(numeric_fields.len());
    for field in numeric_fields {
        if !fields.contains(&field.as_ref()) {
            fields.push(field.as_ref());
        }
    }

    for row in document.rows() {
        for (i, column) in columns.iter().enumerate() {
            if row.get(column).map_or(true, str::is_empty) {
                missing[i] += 1;
            }
        }

        for &field in &fields {
            let Some(raw) = row.get(field) else {
                continue;
            };
            match raw.trim().parse::<f64>() {
                Ok(value) if value <= 0.0 => invalid_values.increment(field),
                Ok(_) => {}
                // Unparseable text is tolerated here; only parsed values are judged.
                Err(_) => debug!(field, value = raw, "ignoring non-numeric value"),
            }
        }
    }

    let mut missing_values = CountMap::new();
    for (column, count) in columns.iter().zip(missing) {
        if count > 0 {
            missing_values.entries.push((column.clone(), count));
        }
    }

    let report = QualityReport {
        row_count: document.row_count(),
        columns,
        missing_values,
        invalid_values,
    };
    info!(
        rows = report.row_count,
        columns_with_missing = report.missing_values.len(),
        fields_with_invalid = report.invalid_values.len(),
        "Quality audit complete"
    );
    report
}
