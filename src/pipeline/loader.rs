//! Fault-tolerant CSV loading.
//!
//! Cheap file-system checks run before any parsing, and every failure is
//! mapped onto a [`FaultKind`] with the most specific class tried first.

use csv::{ReaderBuilder, StringRecord};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::error::LoadError;
use crate::types::{CsvDocument, Row};

/// Outcome of [`load`]: either the parsed document or a classified fault.
pub type LoadResult = std::result::Result<CsvDocument, LoadError>;

/// Load a comma-separated file whose first line is the header.
///
/// Never panics and never returns an error other than [`LoadError`]. A status
/// line is logged for every attempt.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load(path: impl AsRef<Path>) -> LoadResult {
    let path = path.as_ref();
    let result = read_document(path);

    match &result {
        Ok(document) => info!(
            "Successfully read {} rows from {}",
            document.row_count(),
            path.display()
        ),
        Err(e) => warn!(fault = ?e.kind(), "{}", e),
    }

    result
}

fn read_document(path: &Path) -> LoadResult {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let metadata = fs::metadata(path).map_err(|e| classify_io(path, &e))?;
    if metadata.len() == 0 {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    // Single blocking read; the handle is closed before parsing starts.
    let bytes = fs::read(path).map_err(|e| classify_io(path, &e))?;
    let text = std::str::from_utf8(&bytes).map_err(|e| {
        debug!("invalid UTF-8 at byte {}", e.valid_up_to());
        LoadError::Encoding(path.to_path_buf())
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    parse_document(path, text)
}

fn parse_document(path: &Path, text: &str) -> LoadResult {
    // `flexible` keeps short and long lines instead of failing the whole file.
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|e| classify_csv(path, &e))?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(LoadError::NoHeaders(path.to_path_buf()));
    }

    let mut columns: Vec<String> = Vec::with_capacity(headers.len());
    for name in headers.iter() {
        if !columns.iter().any(|c| c == name) {
            columns.push(name.to_string());
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| classify_csv(path, &e))?;
        rows.push(to_row(&headers, &record));
    }

    if rows.is_empty() {
        return Err(LoadError::NoData(path.to_path_buf()));
    }

    Ok(CsvDocument::new(columns, rows))
}

/// Pairs a record with the header. Extra trailing fields are dropped; columns
/// past the end of a short record stay absent. A repeated header name keeps
/// its first position and takes the later value.
fn to_row(headers: &StringRecord, record: &StringRecord) -> Row {
    let mut row = Row::new();
    for (name, value) in headers.iter().zip(record.iter()) {
        row.set(name, value);
    }
    row
}

fn classify_io(path: &Path, err: &io::Error) -> LoadError {
    match err.kind() {
        io::ErrorKind::PermissionDenied => LoadError::PermissionDenied(path.to_path_buf()),
        io::ErrorKind::InvalidData => LoadError::Encoding(path.to_path_buf()),
        _ => {
            debug!("unclassified I/O fault: {}", err);
            LoadError::Unknown(path.to_path_buf())
        }
    }
}

fn classify_csv(path: &Path, err: &csv::Error) -> LoadError {
    match err.kind() {
        csv::ErrorKind::Io(io_err) => classify_io(path, io_err),
        csv::ErrorKind::Utf8 { .. } => LoadError::Encoding(path.to_path_buf()),
        _ => {
            debug!("unclassified parse fault: {}", err);
            LoadError::Unknown(path.to_path_buf())
        }
    }
}
