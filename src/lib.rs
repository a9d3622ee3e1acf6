pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod types;

pub use error::{CsvQualityError, FaultKind, LoadError, Result};
pub use pipeline::{audit, clean, load, CleanFields, CleanResult, LoadResult, Pipeline, QualityReport};
pub use types::{CsvDocument, Row};
