//! Configuration for an export run.
//!
//! All file locations and registry settings are explicit parameters here
//! rather than values hard-coded in the pipeline, so tests and callers can
//! redirect every path.

use crate::constants::{
    DEFAULT_CSV_FILE, DEFAULT_INPUT_FILE, DEFAULT_TIMEOUT_SECS, DEFAULT_XLSX_FILE,
    REGISTRY_BASE_URL, SHEET_NAME,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for one export run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input text file, one identifier per line
    pub input_path: PathBuf,

    /// Intermediate delimited file, deleted after successful conversion
    pub csv_path: PathBuf,

    /// Final workbook path, overwritten if it exists
    pub output_path: PathBuf,

    /// Registry lookup endpoint; the identifier is appended as a path segment
    pub base_url: String,

    /// Worksheet name in the output workbook
    pub sheet_name: String,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// Keep the intermediate delimited file after conversion
    pub keep_csv: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            csv_path: PathBuf::from(DEFAULT_CSV_FILE),
            output_path: PathBuf::from(DEFAULT_XLSX_FILE),
            base_url: REGISTRY_BASE_URL.to_string(),
            sheet_name: SHEET_NAME.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            keep_csv: false,
        }
    }
}

impl Config {
    /// Create a configuration with explicit input and output paths
    pub fn new(input_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            input_path,
            output_path,
            ..Default::default()
        }
    }

    /// Set the intermediate delimited file path
    pub fn with_csv_path(mut self, csv_path: PathBuf) -> Self {
        self.csv_path = csv_path;
        self
    }

    /// Set the registry endpoint base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the worksheet name
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Keep the intermediate delimited file after conversion
    pub fn with_keep_csv(mut self) -> Self {
        self.keep_csv = true;
        self
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::configuration("Registry base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::configuration(format!(
                "Registry base URL must be an http(s) URL: {}",
                self.base_url
            )));
        }

        if self.sheet_name.is_empty() {
            return Err(Error::configuration("Worksheet name cannot be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(Error::configuration(
                "Request timeout must be greater than 0 seconds",
            ));
        }

        if self.csv_path == self.output_path {
            return Err(Error::configuration(format!(
                "Intermediate and output paths must differ: {}",
                self.csv_path.display()
            )));
        }

        Ok(())
    }

    /// Registry URL for one identifier
    pub fn lookup_url(&self, cnpj: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), cnpj)
    }

    /// Create the parent directories of both output files if missing
    pub fn ensure_output_directories(&self) -> Result<()> {
        for path in [&self.csv_path, &self.output_path] {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        Error::io(
                            format!("Failed to create output directory '{}'", parent.display()),
                            e,
                        )
                    })?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_base_url() {
        let config = Config::default().with_base_url("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let config = Config::default().with_base_url("ftp://example.com/cnpj");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = Config::default().with_timeout_secs(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_colliding_paths() {
        let config = Config::default().with_csv_path(PathBuf::from(
            crate::constants::DEFAULT_XLSX_FILE,
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lookup_url_appends_identifier() {
        let config = Config::default().with_base_url("https://registry.test/api/cnpj/v1");
        assert_eq!(
            config.lookup_url("11222333000181"),
            "https://registry.test/api/cnpj/v1/11222333000181"
        );

        // Trailing slash on the base URL must not double up
        let config = Config::default().with_base_url("https://registry.test/api/cnpj/v1/");
        assert_eq!(
            config.lookup_url("11222333000181"),
            "https://registry.test/api/cnpj/v1/11222333000181"
        );
    }

    #[test]
    fn test_ensure_output_directories() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("exports");

        let config = Config::new(base.join("cnpjs.txt"), base.join("cnpjs.xlsx"))
            .with_csv_path(base.join("cnpjs.csv"));

        config.ensure_output_directories().unwrap();
        assert!(base.exists());
    }
}
