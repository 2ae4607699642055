//! Application constants for the CNPJ exporter
//!
//! Default file locations, registry endpoint and export settings used
//! throughout the application. Everything here can be overridden through
//! [`crate::config::Config`] or the CLI.

// =============================================================================
// Registry Endpoint
// =============================================================================

/// Base URL of the BrasilAPI CNPJ lookup endpoint (identifier is appended)
pub const REGISTRY_BASE_URL: &str = "https://brasilapi.com.br/api/cnpj/v1";

/// Default request timeout in seconds for registry lookups
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every registry request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// File and Directory Constants
// =============================================================================

/// Default input file holding one identifier per line
pub const DEFAULT_INPUT_FILE: &str = "exports/cnpjs.txt";

/// Default path of the intermediate delimited file (removed after conversion)
pub const DEFAULT_CSV_FILE: &str = "exports/cnpjs.csv";

/// Default path of the final workbook
pub const DEFAULT_XLSX_FILE: &str = "exports/cnpjs.xlsx";

/// Worksheet name in the output workbook
pub const SHEET_NAME: &str = "CNPJs";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_has_no_trailing_slash() {
        assert!(!REGISTRY_BASE_URL.ends_with('/'));
    }

    #[test]
    fn test_default_paths_share_directory() {
        let dir = std::path::Path::new(DEFAULT_INPUT_FILE).parent().unwrap();
        assert_eq!(std::path::Path::new(DEFAULT_CSV_FILE).parent().unwrap(), dir);
        assert_eq!(std::path::Path::new(DEFAULT_XLSX_FILE).parent().unwrap(), dir);
    }
}
