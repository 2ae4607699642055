//! Export command implementation
//!
//! The complete export workflow: configuration assembly, dry-run
//! preview, batch execution with progress reporting, and the final
//! summary report.

use super::shared::{build_config, create_progress_bar, setup_logging};
use crate::Result;
use crate::app::pipeline::{self, BatchRunner, RunObserver, RunStats};
use crate::app::services::registry_client::RegistryClient;
use crate::cli::args::{ExportArgs, OutputFormat};
use crate::config::Config;
use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar};
use std::cell::RefCell;
use std::path::Path;
use tracing::{debug, info};

/// Export command runner
///
/// 1. Set up logging and configuration
/// 2. Validate arguments
/// 3. Run the batch pipeline with progress reporting
/// 4. Generate the summary report
pub async fn run_export(args: ExportArgs) -> Result<RunStats> {
    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting CNPJ export");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = build_config(&args)?;
    debug!("Loaded configuration: {:?}", config);

    if args.dry_run {
        return run_dry_run(&config);
    }

    let client = RegistryClient::new(&config)?;
    let observer = ConsoleObserver::new(args.show_progress());
    let runner = BatchRunner::new(config, client);

    let stats = runner.run(&observer).await?;

    generate_final_report(&args, &stats)?;
    Ok(stats)
}

/// Perform a dry run showing what would be fetched
fn run_dry_run(config: &Config) -> Result<RunStats> {
    info!("Performing dry run - no lookups will be made and no files written");

    let identifiers = pipeline::read_identifiers(config)?;

    println!(
        "Would fetch {} identifiers from {}:",
        identifiers.len(),
        config.input_path.display()
    );
    for cnpj in &identifiers {
        println!("  {cnpj}");
    }
    println!("Would write workbook: {}", config.output_path.display());

    Ok(RunStats {
        identifiers_read: identifiers.len(),
        ..Default::default()
    })
}

/// Observer wiring run checkpoints to a progress bar and log messages
struct ConsoleObserver {
    show_progress: bool,
    bar: RefCell<Option<ProgressBar>>,
}

impl ConsoleObserver {
    fn new(show_progress: bool) -> Self {
        Self {
            show_progress,
            bar: RefCell::new(None),
        }
    }
}

impl RunObserver for ConsoleObserver {
    fn on_input_read(&self, identifier_count: usize) {
        if self.show_progress && identifier_count > 0 {
            *self.bar.borrow_mut() = Some(create_progress_bar(
                identifier_count as u64,
                "Fetching registry records...",
            ));
        }
    }

    fn on_record_fetched(&self, cnpj: &str, _index: usize, _total: usize) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.set_message(format!("Fetched {cnpj}"));
            pb.inc(1);
        }
    }

    fn on_export_written(&self, path: &Path, rows: usize) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.finish_with_message(format!("Fetched {rows} records"));
        }
        info!("Workbook written to {}", path.display());
    }
}

/// Generate the final run report
fn generate_final_report(args: &ExportArgs, stats: &RunStats) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => generate_human_report(stats),
        OutputFormat::Json => generate_json_report(stats),
        OutputFormat::Csv => generate_csv_report(stats),
    }
}

/// Generate human-readable report
fn generate_human_report(stats: &RunStats) -> Result<()> {
    let duration = HumanDuration(stats.processing_time);

    println!("\n{}", "CNPJ export complete!".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📊 Run Summary:");
    println!("   • Identifiers read: {}", stats.identifiers_read);
    println!("   • Records fetched: {}", stats.records_fetched);
    println!("   • Rows written: {}", stats.rows_written);
    println!(
        "   • Workbook size: {}",
        RunStats::format_size(stats.workbook_size)
    );
    println!("   • Processing time: {}", duration);
    println!();

    Ok(())
}

/// Generate JSON report for machine consumption
fn generate_json_report(stats: &RunStats) -> Result<()> {
    let json_stats = serde_json::json!({
        "identifiers_read": stats.identifiers_read,
        "records_fetched": stats.records_fetched,
        "rows_written": stats.rows_written,
        "workbook_size_bytes": stats.workbook_size,
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&json_stats)
            .expect("report serialization cannot fail")
    );
    Ok(())
}

/// Generate CSV report for data analysis
fn generate_csv_report(stats: &RunStats) -> Result<()> {
    println!("metric,value");
    println!("identifiers_read,{}", stats.identifiers_read);
    println!("records_fetched,{}", stats.records_fetched);
    println!("rows_written,{}", stats.rows_written);
    println!("workbook_size_bytes,{}", stats.workbook_size);
    println!(
        "processing_time_seconds,{}",
        stats.processing_time.as_secs_f64()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dry_run_lists_identifiers_without_output() {
        let temp_dir = TempDir::new().unwrap();
        let input_path = temp_dir.path().join("cnpjs.txt");
        std::fs::write(&input_path, "11.222.333/0001-81\nabc\n").unwrap();

        let config = Config::new(input_path, temp_dir.path().join("cnpjs.xlsx"))
            .with_csv_path(temp_dir.path().join("cnpjs.csv"));

        let stats = run_dry_run(&config).unwrap();
        assert_eq!(stats.identifiers_read, 1);
        assert!(!config.output_path.exists());
        assert!(!config.csv_path.exists());
    }

    #[test]
    fn test_generate_reports_do_not_panic() {
        let stats = RunStats {
            identifiers_read: 3,
            records_fetched: 3,
            rows_written: 3,
            workbook_size: 2048,
            processing_time: std::time::Duration::from_secs(4),
        };

        assert!(generate_human_report(&stats).is_ok());
        assert!(generate_json_report(&stats).is_ok());
        assert!(generate_csv_report(&stats).is_ok());
    }
}
