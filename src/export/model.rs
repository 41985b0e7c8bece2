// src/export/model.rs

use crate::errors::{AppError, AppResult};
use crate::models::{Chamber, DailyWork, Infrastructure, InfrastructureInfo, WorkScope};
use serde::Serialize;
use serde_json::Value;

/// A record that can be flattened into one spreadsheet row.
pub trait ExportRow: Serialize {
    /// Header columns written even when there are no rows.
    const COLUMNS: &'static [&'static str];
}

impl ExportRow for WorkScope {
    const COLUMNS: &'static [&'static str] = &["id", "block", "total_scope", "updated_at"];
}

impl ExportRow for DailyWork {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "district",
        "block",
        "machine_number",
        "ring_name",
        "route_name",
        "work_date",
        "work_done",
        "description",
        "created_at",
        "updated_at",
    ];
}

impl ExportRow for Infrastructure {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "block",
        "gp_name",
        "ring_name",
        "building",
        "router_category",
        "router_status",
        "status",
        "electricity_meter",
        "live_status",
        "live_date",
        "not_live_reason",
        "notes",
        "created_at",
    ];
}

impl ExportRow for Chamber {
    const COLUMNS: &'static [&'static str] = &["id", "block", "created_at"];
}

impl ExportRow for InfrastructureInfo {
    const COLUMNS: &'static [&'static str] = &["id", "block", "created_at"];
}

/// Headers plus one vector of JSON cells per record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Flatten records: declared columns first, then any extra key in first-seen order.
pub fn build_sheet<T: ExportRow>(items: &[T]) -> AppResult<Sheet> {
    let mut headers: Vec<String> = T::COLUMNS.iter().map(|c| c.to_string()).collect();
    let mut objects = Vec::with_capacity(items.len());

    for item in items {
        match serde_json::to_value(item)? {
            Value::Object(map) => {
                for key in map.keys() {
                    if !headers.iter().any(|h| h == key) {
                        headers.push(key.clone());
                    }
                }
                objects.push(map);
            }
            other => {
                return Err(AppError::Export(format!(
                    "record is not an object: {other}"
                )));
            }
        }
    }

    let rows = objects
        .iter()
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Ok(Sheet { headers, rows })
}

/// Plain-text rendering of a cell (CSV, terminal tables).
pub fn cell_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
