use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_CLEAN_NUMERIC_FIELD, DEFAULT_CLEAN_PATH, DEFAULT_LOG_DIR, DEFAULT_NORMALIZE_FIELD,
    DEFAULT_NUMERIC_FIELD, DEFAULT_REPORT_PATH, DEFAULT_REQUIRED_FIELD,
};
use crate::error::{CsvQualityError, Result};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub audit: AuditConfig,
    pub clean: CleanConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Fields whose values must parse as a positive number.
    pub numeric_fields: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            numeric_fields: vec![DEFAULT_NUMERIC_FIELD.to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CleanConfig {
    pub required_field: String,
    pub numeric_field: String,
    pub normalize_field: String,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            required_field: DEFAULT_REQUIRED_FIELD.to_string(),
            numeric_field: DEFAULT_CLEAN_NUMERIC_FIELD.to_string(),
            normalize_field: DEFAULT_NORMALIZE_FIELD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub report_path: PathBuf,
    pub clean_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            clean_path: PathBuf::from(DEFAULT_CLEAN_PATH),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            CsvQualityError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        let clean_fields = [
            ("required_field", &self.clean.required_field),
            ("numeric_field", &self.clean.numeric_field),
            ("normalize_field", &self.clean.normalize_field),
        ];
        for (key, value) in clean_fields {
            if value.trim().is_empty() {
                return Err(CsvQualityError::Config(format!("clean.{} must not be empty", key)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_hardcoded_fields() {
        let config = Config::default();
        assert_eq!(config.audit.numeric_fields, vec!["amount".to_string()]);
        assert_eq!(config.clean.required_field, "name");
        assert_eq!(config.clean.numeric_field, "age");
        assert_eq!(config.clean.normalize_field, "email");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[audit]\nnumeric_fields = [\"amount\", \"fee\"]\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.audit.numeric_fields, vec!["amount", "fee"]);
        assert_eq!(config.clean, CleanConfig::default());
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[clean]\nrequried_field = \"name\"").unwrap();
        assert!(matches!(Config::load(file.path()), Err(CsvQualityError::Toml(_))));
    }

    #[test]
    fn test_empty_clean_field_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[clean]\nrequired_field = \"  \"").unwrap();
        assert!(matches!(Config::load(file.path()), Err(CsvQualityError::Config(_))));
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, CsvQualityError::Config(_)));
    }
}
