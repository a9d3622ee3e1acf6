use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Closed set of file-level failures the loader can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    NotFound,
    Empty,
    PermissionDenied,
    EncodingError,
    NoHeaders,
    NoData,
    Unknown,
}

/// A file-level fault raised while loading a CSV file.
///
/// The `Display` text is the status message shown to the operator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("File is empty {}", .0.display())]
    Empty(PathBuf),

    #[error("Permission denied to read file: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("File encoding error: {}", .0.display())]
    Encoding(PathBuf),

    #[error("csv file has no headers: {}", .0.display())]
    NoHeaders(PathBuf),

    #[error("csv file has only headers and no data: {}", .0.display())]
    NoData(PathBuf),

    #[error("Failed to read file: {}", .0.display())]
    Unknown(PathBuf),
}

impl LoadError {
    pub fn kind(&self) -> FaultKind {
        match self {
            LoadError::NotFound(_) => FaultKind::NotFound,
            LoadError::Empty(_) => FaultKind::Empty,
            LoadError::PermissionDenied(_) => FaultKind::PermissionDenied,
            LoadError::Encoding(_) => FaultKind::EncodingError,
            LoadError::NoHeaders(_) => FaultKind::NoHeaders,
            LoadError::NoData(_) => FaultKind::NoData,
            LoadError::Unknown(_) => FaultKind::Unknown,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound(p)
            | LoadError::Empty(p)
            | LoadError::PermissionDenied(p)
            | LoadError::Encoding(p)
            | LoadError::NoHeaders(p)
            | LoadError::NoData(p)
            | LoadError::Unknown(p) => p,
        }
    }
}

#[derive(Error, Debug)]
pub enum CsvQualityError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CsvQualityError>;
