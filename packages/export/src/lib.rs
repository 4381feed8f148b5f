#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Export of lead rows.
//!
//! The default format is an `.xlsx` workbook with a single "Leads" sheet
//! ([`xlsx`]). CSV and JSON exports carry the same column names. Output
//! files are named with a minute-resolution timestamp, e.g.
//! `leads_20240102_1530.xlsx`.

pub mod xlsx;

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use crash_leads_lead_models::{COLUMNS, LEADS_SHEET_NAME, LeadRow};
use strum_macros::{AsRefStr, Display, EnumString};

/// Errors that can occur while exporting.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Building the workbook failed (including a rejected sheet name).
    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Writing CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serializing JSON failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    /// Office Open XML workbook.
    #[default]
    Xlsx,
    /// Comma-separated values with a header row.
    Csv,
    /// Pretty-printed JSON array of objects keyed by column name.
    Json,
}

impl ExportFormat {
    /// All formats, in menu order.
    pub const ALL: &[Self] = &[Self::Xlsx, Self::Csv, Self::Json];

    /// File extension (without the dot).
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Builds the export file name `{prefix}_{YYYYMMDD_HHMM}.{ext}`.
#[must_use]
pub fn file_name(prefix: &str, format: ExportFormat, at: NaiveDateTime) -> String {
    format!(
        "{prefix}_{}.{}",
        at.format("%Y%m%d_%H%M"),
        format.extension()
    )
}

/// Writes `rows` to `writer` in `format`.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or writing fails.
pub fn write_rows<W: Write + Seek>(
    writer: W,
    format: ExportFormat,
    rows: &[LeadRow],
) -> Result<W, ExportError> {
    match format {
        ExportFormat::Xlsx => xlsx::write_workbook(writer, LEADS_SHEET_NAME, rows),
        ExportFormat::Csv => write_csv(writer, rows),
        ExportFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, rows)?;
            writer.write_all(b"\n")?;
            Ok(writer)
        }
    }
}

/// Renders `rows` into an in-memory buffer.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization fails.
pub fn to_bytes(format: ExportFormat, rows: &[LeadRow]) -> Result<Vec<u8>, ExportError> {
    Ok(write_rows(Cursor::new(Vec::new()), format, rows)?.into_inner())
}

/// Writes `rows` to a timestamped file in `dir` and returns its path.
///
/// `dir` is created if missing.
///
/// # Errors
///
/// Returns [`ExportError`] if the directory or file cannot be created or
/// writing fails.
pub fn export_to_dir(
    dir: &Path,
    prefix: &str,
    format: ExportFormat,
    rows: &[LeadRow],
    at: NaiveDateTime,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name(prefix, format, at));

    let file = BufWriter::new(File::create(&path)?);
    let mut file = write_rows(file, format, rows)?;
    file.flush()?;

    log::info!("Exported {} row(s) to {}", rows.len(), path.display());

    Ok(path)
}

fn write_csv<W: Write>(writer: W, rows: &[LeadRow]) -> Result<W, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.write_record(row.cells())?;
    }
    wtr.into_inner()
        .map_err(|e| ExportError::Io(std::io::Error::other(e.to_string())))
}
