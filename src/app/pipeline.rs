//! Batch orchestration for one export run
//!
//! Drives the pipeline end to end: read the input file, normalize, fetch
//! one record per identifier in input order, project, export. The first
//! failure anywhere aborts the run; nothing is written in that case and
//! already-fetched results are discarded.

use crate::app::models::ExportRecord;
use crate::app::services::registry_client::RegistryLookup;
use crate::app::services::{exporter, normalizer, projector};
use crate::config::Config;
use crate::{Error, Result};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Checkpoint callbacks emitted during a run
///
/// Progress bars and console messages hang off this trait so the pipeline
/// itself stays silent and tests can observe or ignore checkpoints.
pub trait RunObserver {
    /// Input file read and normalized
    fn on_input_read(&self, _identifier_count: usize) {}

    /// One record fetched and validated (`index` is 1-based)
    fn on_record_fetched(&self, _cnpj: &str, _index: usize, _total: usize) {}

    /// Workbook written
    fn on_export_written(&self, _path: &Path, _rows: usize) {}
}

/// Observer that ignores every checkpoint
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Statistics for one completed run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Identifiers left after normalization
    pub identifiers_read: usize,
    /// Registry records fetched and validated
    pub records_fetched: usize,
    /// Data rows written to the workbook
    pub rows_written: usize,
    /// Size of the output workbook in bytes
    pub workbook_size: u64,
    /// Total wall-clock time
    pub processing_time: Duration,
}

impl RunStats {
    /// Format a byte count in human-readable form
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Read the input file and return the normalized identifier list
pub fn read_identifiers(config: &Config) -> Result<Vec<String>> {
    let input_path = &config.input_path;
    let text = std::fs::read_to_string(input_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(input_path.display().to_string())
        } else {
            Error::io(
                format!("Failed to read input file '{}'", input_path.display()),
                e,
            )
        }
    })?;

    Ok(normalizer::normalize_identifiers(&text))
}

/// End-to-end runner for one batch
pub struct BatchRunner<L> {
    config: Config,
    client: L,
}

impl<L: RegistryLookup> BatchRunner<L> {
    /// Create a runner over a configuration and a lookup implementation
    pub fn new(config: Config, client: L) -> Self {
        Self { config, client }
    }

    /// Execute the full pipeline
    pub async fn run(&self, observer: &impl RunObserver) -> Result<RunStats> {
        let start_time = Instant::now();
        self.config.validate()?;

        let identifiers = read_identifiers(&self.config)?;
        info!(
            "Read {} identifiers from {}",
            identifiers.len(),
            self.config.input_path.display()
        );
        observer.on_input_read(identifiers.len());

        // One blocking lookup per identifier, strictly in input order.
        // Any failure aborts the whole run before output is produced.
        let total = identifiers.len();
        let mut records = Vec::with_capacity(total);
        for (index, cnpj) in identifiers.iter().enumerate() {
            let record = self.client.lookup(cnpj).await?;
            debug!("Fetched record {}/{} for CNPJ {}", index + 1, total, cnpj);
            observer.on_record_fetched(cnpj, index + 1, total);
            records.push(record);
        }
        info!("Fetched {} registry records", records.len());

        let batch: Vec<ExportRecord> = records.iter().map(projector::project).collect();

        let workbook_size = exporter::export_batch(&batch, &self.config)?;
        observer.on_export_written(&self.config.output_path, batch.len());

        Ok(RunStats {
            identifiers_read: total,
            records_fetched: records.len(),
            rows_written: batch.len(),
            workbook_size,
            processing_time: start_time.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::RegistryRecord;
    use crate::app::services::projector::tests::sample_registry_record;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// In-memory lookup that can be told to fail on one identifier
    struct StubLookup {
        fail_on: Option<String>,
    }

    impl RegistryLookup for StubLookup {
        async fn lookup(&self, cnpj: &str) -> crate::Result<RegistryRecord> {
            if self.fail_on.as_deref() == Some(cnpj) {
                return Err(Error::lookup(cnpj, "registry returned HTTP 404", None));
            }
            let mut record = sample_registry_record();
            record.cnpj = cnpj.to_string();
            Ok(record)
        }
    }

    /// Observer recording every checkpoint
    #[derive(Default)]
    struct RecordingObserver {
        events: RefCell<Vec<String>>,
    }

    impl RunObserver for RecordingObserver {
        fn on_input_read(&self, identifier_count: usize) {
            self.events.borrow_mut().push(format!("read:{identifier_count}"));
        }

        fn on_record_fetched(&self, cnpj: &str, index: usize, total: usize) {
            self.events
                .borrow_mut()
                .push(format!("fetch:{cnpj}:{index}/{total}"));
        }

        fn on_export_written(&self, _path: &Path, rows: usize) {
            self.events.borrow_mut().push(format!("export:{rows}"));
        }
    }

    fn test_config(dir: &TempDir, input: &str) -> Config {
        let input_path = dir.path().join("cnpjs.txt");
        std::fs::write(&input_path, input).unwrap();
        Config::new(input_path, dir.path().join("cnpjs.xlsx"))
            .with_csv_path(dir.path().join("cnpjs.csv"))
    }

    #[tokio::test]
    async fn test_successful_run_exports_all_rows_in_input_order() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, "98.765.432/0001-10\n11.222.333/0001-81\n").with_keep_csv();
        let runner = BatchRunner::new(config.clone(), StubLookup { fail_on: None });

        let stats = runner.run(&NoopObserver).await.unwrap();

        assert_eq!(stats.identifiers_read, 2);
        assert_eq!(stats.records_fetched, 2);
        assert_eq!(stats.rows_written, 2);
        assert!(stats.workbook_size > 0);
        assert!(config.output_path.exists());

        // Batch order matches input order
        let csv = std::fs::read_to_string(&config.csv_path).unwrap();
        let first_column: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(first_column, vec!["98765432000110", "11222333000181"]);
    }

    #[tokio::test]
    async fn test_failure_aborts_run_and_produces_no_output() {
        let dir = TempDir::new().unwrap();
        let config = test_config(
            &dir,
            "11111111000111\n22222222000122\n33333333000133\n",
        );
        let runner = BatchRunner::new(
            config.clone(),
            StubLookup {
                fail_on: Some("22222222000122".to_string()),
            },
        );

        let error = runner.run(&NoopObserver).await.unwrap_err();

        assert!(error.to_string().contains("22222222000122"));
        assert!(!config.output_path.exists());
        assert!(!config.csv_path.exists());
    }

    #[tokio::test]
    async fn test_empty_input_produces_header_only_workbook() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, "\n--..\nabc\n");
        let runner = BatchRunner::new(config.clone(), StubLookup { fail_on: None });

        let stats = runner.run(&NoopObserver).await.unwrap();

        assert_eq!(stats.identifiers_read, 0);
        assert_eq!(stats.rows_written, 0);
        assert!(config.output_path.exists());
    }

    #[tokio::test]
    async fn test_missing_input_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(
            dir.path().join("does-not-exist.txt"),
            dir.path().join("cnpjs.xlsx"),
        )
        .with_csv_path(dir.path().join("cnpjs.csv"));
        let runner = BatchRunner::new(config, StubLookup { fail_on: None });

        let error = runner.run(&NoopObserver).await.unwrap_err();
        assert!(matches!(error, Error::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_observer_sees_every_checkpoint_in_order() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, "11222333000181\n");
        let runner = BatchRunner::new(config, StubLookup { fail_on: None });
        let observer = RecordingObserver::default();

        runner.run(&observer).await.unwrap();

        assert_eq!(
            *observer.events.borrow(),
            vec![
                "read:1".to_string(),
                "fetch:11222333000181:1/1".to_string(),
                "export:1".to_string(),
            ]
        );
    }

    #[test]
    fn test_format_size() {
        assert_eq!(RunStats::format_size(500), "500 B");
        assert_eq!(RunStats::format_size(1536), "1.50 KB");
        assert_eq!(RunStats::format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
