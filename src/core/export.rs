//! Export adapter: data-type token → façade list operation → file on disk.

use crate::backend::Backend;
use crate::core::service::{DataService, logged};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, write_rows};
use crate::models::RecordFilter;
use crate::utils::date::today;
use chrono::NaiveDate;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Closed set of exportable datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    DailyWork,
    Infrastructure,
    Chambers,
}

impl DataType {
    pub fn token(&self) -> &'static str {
        match self {
            DataType::DailyWork => "daily-work",
            DataType::Infrastructure => "infrastructure",
            DataType::Chambers => "chambers",
        }
    }

    /// Prefix of the generated file name.
    pub fn label(&self) -> &'static str {
        match self {
            DataType::DailyWork => "Daily_Work",
            DataType::Infrastructure => "Infrastructure",
            DataType::Chambers => "Chambers",
        }
    }
}

impl FromStr for DataType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily-work" => Ok(DataType::DailyWork),
            "infrastructure" => Ok(DataType::Infrastructure),
            "chambers" => Ok(DataType::Chambers),
            other => Err(AppError::InvalidDataType(other.to_string())),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// `<Label>_<YYYY-MM-DD>.<ext>`
pub fn export_file_name(data_type: DataType, date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        data_type.label(),
        date.format("%Y-%m-%d"),
        format.as_str()
    )
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub dir: PathBuf,
    pub format: ExportFormat,
    pub force: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            format: ExportFormat::Xlsx,
            force: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub file_name: String,
    pub path: PathBuf,
    pub rows: usize,
}

impl<B: Backend> DataService<B> {
    /// Resolve `token` and export. An unknown token fails before any backend call.
    pub async fn export_named(
        &self,
        token: &str,
        filter: &RecordFilter,
        options: &ExportOptions,
    ) -> AppResult<ExportReport> {
        let data_type: DataType = token.parse()?;
        self.export(data_type, filter, options).await
    }

    pub async fn export(
        &self,
        data_type: DataType,
        filter: &RecordFilter,
        options: &ExportOptions,
    ) -> AppResult<ExportReport> {
        let file_name = export_file_name(data_type, today(), options.format);
        let path = options.dir.join(&file_name);

        let result = async {
            let rows = match data_type {
                DataType::DailyWork => {
                    let rows = self.get_daily_work(filter).await?;
                    write_rows(&rows, &path, options.format, options.force)?;
                    rows.len()
                }
                DataType::Infrastructure => {
                    let rows = self.get_infrastructure(filter).await?;
                    write_rows(&rows, &path, options.format, options.force)?;
                    rows.len()
                }
                DataType::Chambers => {
                    let rows = self.get_chambers(filter).await?;
                    write_rows(&rows, &path, options.format, options.force)?;
                    rows.len()
                }
            };
            Ok::<_, AppError>(rows)
        }
        .await;

        let rows = logged("exporting data", result)?;
        tracing::info!(%data_type, rows, path = %path.display(), "export written");

        Ok(ExportReport {
            file_name,
            path,
            rows,
        })
    }
}
