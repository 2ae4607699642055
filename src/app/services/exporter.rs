//! Tabular export of a batch
//!
//! The batch is first written as a comma-delimited file with a header row
//! (column order fixed by [`ExportRecord`] field order), then converted
//! into a single-sheet XLSX workbook at the output path, overwriting any
//! previous workbook. The intermediate file is removed only after the
//! conversion succeeded. An empty batch still produces a header-only file
//! and sheet.

use crate::app::models::ExportRecord;
use crate::config::Config;
use crate::{Error, Result};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing::{debug, info};

/// Write the batch as header + rows at the given path
pub fn write_csv(batch: &[ExportRecord], path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| Error::csv_export(format!("Failed to create '{}'", path.display()), e))?;

    // Header written explicitly so an empty batch still yields one
    writer
        .write_record(ExportRecord::HEADERS)
        .map_err(|e| Error::csv_export("Failed to write header row", e))?;

    for record in batch {
        writer
            .serialize(record)
            .map_err(|e| Error::csv_export(format!("Failed to write row for CNPJ {}", record.cnpj), e))?;
    }

    writer
        .flush()
        .map_err(|e| Error::io(format!("Failed to flush '{}'", path.display()), e))?;

    debug!("Wrote {} data rows to {}", batch.len(), path.display());
    Ok(())
}

/// Convert a delimited file into a single-sheet workbook, overwriting the target
pub fn convert_csv_to_xlsx(csv_path: &Path, xlsx_path: &Path, sheet_name: &str) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(csv_path)
        .map_err(|e| Error::csv_export(format!("Failed to open '{}'", csv_path.display()), e))?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| Error::spreadsheet(format!("Invalid worksheet name '{sheet_name}'"), e))?;

    for (row, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| Error::csv_export(format!("Failed to read back row {row}"), e))?;
        for (col, field) in record.iter().enumerate() {
            worksheet
                .write_string(row as u32, col as u16, field)
                .map_err(|e| Error::spreadsheet(format!("Failed to write cell ({row}, {col})"), e))?;
        }
    }

    workbook
        .save(xlsx_path)
        .map_err(|e| Error::spreadsheet(format!("Failed to save '{}'", xlsx_path.display()), e))?;

    Ok(())
}

/// Export a batch: delimited file, workbook conversion, intermediate cleanup
///
/// Returns the size of the written workbook in bytes.
pub fn export_batch(batch: &[ExportRecord], config: &Config) -> Result<u64> {
    config.ensure_output_directories()?;

    write_csv(batch, &config.csv_path)?;
    convert_csv_to_xlsx(&config.csv_path, &config.output_path, &config.sheet_name)?;

    // Only after a successful conversion
    if !config.keep_csv {
        std::fs::remove_file(&config.csv_path).map_err(|e| {
            Error::io(
                format!(
                    "Failed to remove intermediate file '{}'",
                    config.csv_path.display()
                ),
                e,
            )
        })?;
    }

    let workbook_size = std::fs::metadata(&config.output_path)
        .map(|metadata| metadata.len())
        .unwrap_or(0);

    info!(
        "Exported {} rows to {} ({} bytes)",
        batch.len(),
        config.output_path.display(),
        workbook_size
    );

    Ok(workbook_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::projector::tests::sample_export_record;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        Config::new(
            dir.path().join("cnpjs.txt"),
            dir.path().join("cnpjs.xlsx"),
        )
        .with_csv_path(dir.path().join("cnpjs.csv"))
    }

    #[test]
    fn test_empty_batch_writes_header_only_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        write_csv(&[], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), ExportRecord::HEADERS.join(","));
    }

    #[test]
    fn test_csv_has_one_row_per_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.csv");
        let batch = vec![sample_export_record(), sample_export_record()];

        write_csv(&batch, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.lines().nth(1).unwrap().starts_with("11222333000181,"));
    }

    #[test]
    fn test_none_fields_serialize_as_empty_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("null.csv");
        write_csv(&[sample_export_record()], &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();

        // ddd_telefone_2 is null in the sample record
        let column = ExportRecord::HEADERS
            .iter()
            .position(|h| *h == "ddd_telefone_2")
            .unwrap();
        assert_eq!(row.get(column), Some(""));
    }

    #[test]
    fn test_repeated_writes_are_byte_identical() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");
        let batch = vec![sample_export_record()];

        write_csv(&batch, &first).unwrap();
        write_csv(&batch, &second).unwrap();

        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }

    #[test]
    fn test_export_batch_produces_workbook_and_removes_csv() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let batch = vec![sample_export_record()];

        let size = export_batch(&batch, &config).unwrap();

        assert!(config.output_path.exists());
        assert!(size > 0);
        assert!(!config.csv_path.exists());
    }

    #[test]
    fn test_export_batch_handles_empty_batch() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        export_batch(&[], &config).unwrap();

        assert!(config.output_path.exists());
        assert!(!config.csv_path.exists());
    }

    #[test]
    fn test_export_batch_overwrites_existing_workbook() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        std::fs::write(&config.output_path, b"stale").unwrap();

        export_batch(&[sample_export_record()], &config).unwrap();

        let content = std::fs::read(&config.output_path).unwrap();
        assert_ne!(content, b"stale");
    }

    #[test]
    fn test_keep_csv_retains_intermediate_file() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir).with_keep_csv();

        export_batch(&[sample_export_record()], &config).unwrap();

        assert!(config.csv_path.exists());
        assert!(config.output_path.exists());
    }

    #[test]
    fn test_export_batch_creates_missing_output_directory() {
        let dir = TempDir::new().unwrap();
        let base: PathBuf = dir.path().join("exports");
        let config = Config::new(base.join("cnpjs.txt"), base.join("cnpjs.xlsx"))
            .with_csv_path(base.join("cnpjs.csv"));

        export_batch(&[], &config).unwrap();
        assert!(config.output_path.exists());
    }
}
