//! Command implementations for the CNPJ exporter CLI
//!
//! This module contains the command execution logic, progress reporting,
//! and final report generation for the CLI interface.

pub mod export;
pub mod shared;

use crate::Result;
use crate::app::pipeline::RunStats;
use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Dispatches to the appropriate subcommand handler based on CLI args.
pub async fn run(args: Args) -> Result<RunStats> {
    match args.get_command() {
        Commands::Export(export_args) => export::run_export(export_args).await,
    }
}
