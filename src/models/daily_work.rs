use crate::models::{RecordId, null_as_default};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A daily work log row as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWork {
    pub id: RecordId,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub machine_number: Option<String>,
    #[serde(default)]
    pub ring_name: Option<String>,
    #[serde(default)]
    pub route_name: Option<String>,
    #[serde(default)]
    pub work_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_done: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Fields entered by the user for a work log (create or full update).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyWorkInput {
    pub district: String,
    pub block: String,
    pub machine_number: String,
    pub ring_name: String,
    pub route_name: String,
    pub date: NaiveDate,
    pub work_done: f64,
    pub description: Option<String>,
}

impl DailyWorkInput {
    /// Column shape used by both insert and update; `date` becomes `work_date`.
    pub fn to_columns(&self) -> Map<String, Value> {
        let row = json!({
            "district": self.district,
            "block": self.block,
            "machine_number": self.machine_number,
            "ring_name": self.ring_name,
            "route_name": self.route_name,
            "work_date": self.date.format("%Y-%m-%d").to_string(),
            "work_done": self.work_done,
            "description": self.description,
        });

        match row {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}
