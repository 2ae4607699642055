//! Command-line argument definitions for the CNPJ exporter
//!
//! The complete CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the CNPJ exporter
///
/// Fetches BrasilAPI registry records for a list of CNPJ identifiers and
/// exports the results as an XLSX workbook.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cnpj-exporter",
    version,
    about = "Bulk CNPJ lookups against the BrasilAPI registry with XLSX export",
    long_about = "Reads a text file with one CNPJ per line (any formatting), fetches the \
                  registration record for each identifier from the BrasilAPI public registry, \
                  validates every response against the expected schema, and exports the \
                  aggregated results as a single-sheet XLSX workbook."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Fetch registry records for every identifier and export the workbook
    Export(ExportArgs),
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Input text file, one CNPJ per line
    ///
    /// Lines may carry any formatting (dots, slashes, dashes); lines with
    /// no digits are skipped. Defaults to exports/cnpjs.txt.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Input text file with one CNPJ per line"
    )]
    pub input_path: Option<PathBuf>,

    /// Output workbook path
    ///
    /// Overwritten if it already exists. Defaults to exports/cnpjs.xlsx.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output workbook path (overwritten if present)"
    )]
    pub output_path: Option<PathBuf>,

    /// Path of the intermediate delimited file
    ///
    /// Written next to the workbook by default and removed after a
    /// successful conversion.
    #[arg(
        long = "csv-path",
        value_name = "FILE",
        help = "Path of the intermediate delimited file"
    )]
    pub csv_path: Option<PathBuf>,

    /// Registry endpoint base URL
    ///
    /// The identifier is appended as a path segment. Defaults to the
    /// public BrasilAPI CNPJ v1 endpoint.
    #[arg(
        long = "base-url",
        value_name = "URL",
        help = "Registry endpoint base URL"
    )]
    pub base_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        help = "HTTP request timeout in seconds"
    )]
    pub timeout_secs: Option<u64>,

    /// Worksheet name in the output workbook
    #[arg(
        long = "sheet-name",
        value_name = "NAME",
        help = "Worksheet name in the output workbook"
    )]
    pub sheet_name: Option<String>,

    /// Keep the intermediate delimited file after conversion
    #[arg(long = "keep-csv", help = "Keep the intermediate delimited file")]
    pub keep_csv: bool,

    /// List the identifiers that would be fetched without performing
    /// lookups or writing any file
    #[arg(
        long = "dry-run",
        help = "List identifiers without fetching or writing files"
    )]
    pub dry_run: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and disables the
    /// progress bar.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the run summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the run summary"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for the run summary
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ExportArgs {
    /// Validate the export command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        // Validate input path exists (only if explicitly provided)
        if let Some(input_path) = &self.input_path {
            if !input_path.exists() {
                return Err(Error::configuration(format!(
                    "Input file does not exist: {}",
                    input_path.display()
                )));
            }

            if !input_path.is_file() {
                return Err(Error::configuration(format!(
                    "Input path is not a file: {}",
                    input_path.display()
                )));
            }
        }

        if let Some(timeout_secs) = self.timeout_secs {
            if timeout_secs == 0 {
                return Err(Error::configuration(
                    "Request timeout must be greater than 0 seconds",
                ));
            }
        }

        if let Some(sheet_name) = &self.sheet_name {
            if sheet_name.is_empty() {
                return Err(Error::configuration("Worksheet name cannot be empty"));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl Default for ExportArgs {
    fn default() -> Self {
        Self {
            input_path: None,
            output_path: None,
            csv_path: None,
            base_url: None,
            timeout_secs: None,
            sheet_name: None,
            keep_csv: false,
            dry_run: false,
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        }
    }
}
