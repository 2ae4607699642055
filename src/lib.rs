//! CNPJ Exporter Library
//!
//! A Rust library for bulk lookups of Brazilian company identifiers (CNPJ)
//! against the BrasilAPI public registry, with validated results exported
//! as an XLSX workbook.
//!
//! This library provides tools for:
//! - Normalizing raw identifier lists (formatting stripped, blanks dropped)
//! - Fetching registry records one identifier at a time over HTTP
//! - Structural validation of responses with per-field violation reporting
//! - Projecting full registry records down to a flat export row
//! - Writing the batch as CSV and converting it to a spreadsheet workbook

#![recursion_limit = "256"]

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod pipeline;
    pub mod services {
        pub mod exporter;
        pub mod normalizer;
        pub mod projector;
        pub mod registry_client;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ExportRecord, RegistryRecord};
pub use config::Config;

use app::services::registry_client::schema::Violation;

/// Result type alias for the CNPJ exporter
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the export pipeline
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Registry lookup failed (transport error, timeout or non-2xx status)
    #[error("Lookup failed for CNPJ {cnpj}: {message}")]
    Lookup {
        cnpj: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Registry response did not match the expected shape
    #[error("Invalid registry response for CNPJ {cnpj}: {}", format_violations(.violations))]
    SchemaValidation {
        cnpj: String,
        violations: Vec<Violation>,
    },

    /// Writing the intermediate delimited file failed
    #[error("CSV export error: {message}")]
    CsvExport {
        message: String,
        #[source]
        source: csv::Error,
    },

    /// Writing the workbook failed
    #[error("Spreadsheet error: {message}")]
    Spreadsheet {
        message: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Run interrupted
    #[error("Run interrupted: {reason}")]
    Interrupted { reason: String },
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a lookup error for a specific identifier
    pub fn lookup(
        cnpj: impl Into<String>,
        message: impl Into<String>,
        source: Option<reqwest::Error>,
    ) -> Self {
        Self::Lookup {
            cnpj: cnpj.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a schema validation error carrying every field violation
    pub fn schema_validation(cnpj: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self::SchemaValidation {
            cnpj: cnpj.into(),
            violations,
        }
    }

    /// Create a CSV export error with context
    pub fn csv_export(message: impl Into<String>, source: csv::Error) -> Self {
        Self::CsvExport {
            message: message.into(),
            source,
        }
    }

    /// Create a spreadsheet conversion error with context
    pub fn spreadsheet(message: impl Into<String>, source: rust_xlsxwriter::XlsxError) -> Self {
        Self::Spreadsheet {
            message: message.into(),
            source,
        }
    }

    /// Create an interruption error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvExport {
            message: "CSV writing failed".to_string(),
            source: error,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        Self::Spreadsheet {
            message: "workbook writing failed".to_string(),
            source: error,
        }
    }
}
