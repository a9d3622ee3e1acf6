//! Field and path defaults shared by the CLI, configuration and pipeline.

// Auditor
pub const DEFAULT_NUMERIC_FIELD: &str = "amount";

// Cleaner
pub const DEFAULT_REQUIRED_FIELD: &str = "name";
pub const DEFAULT_CLEAN_NUMERIC_FIELD: &str = "age";
pub const DEFAULT_NORMALIZE_FIELD: &str = "email";

/// Replacement for a numeric field that is not a non-negative integer.
pub const UNKNOWN_SENTINEL: &str = "UNKNOWN";

// Output artifacts
pub const DEFAULT_REPORT_PATH: &str = "output/csv_quality_report.json";
pub const DEFAULT_CLEAN_PATH: &str = "output/clean_users.csv";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const LOG_FILE_NAME: &str = "csv_quality.log";
