// src/export/mod.rs

mod excel_date;
mod fs_utils;
mod json_csv;
pub mod model;
mod xlsx;

pub use model::{ExportRow, Sheet, build_sheet, cell_text};

use crate::errors::AppResult;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Helper comune per messaggi di completamento export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension, without the dot.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write `rows` to `path` in the requested format.
///
/// An existing file is overwritten only when `force` is set; otherwise
/// `AppError::Export` is returned and the file is left untouched.
pub fn write_rows<T: ExportRow>(
    rows: &[T],
    path: &Path,
    format: ExportFormat,
    force: bool,
) -> AppResult<()> {
    fs_utils::ensure_writable(path, force)?;

    match format {
        ExportFormat::Xlsx => xlsx::export_xlsx(&build_sheet(rows)?, path),
        ExportFormat::Csv => json_csv::export_csv(&build_sheet(rows)?, path),
        ExportFormat::Json => json_csv::export_json(rows, path),
    }
}
