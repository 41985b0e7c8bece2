use crate::models::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Router / GP building record for a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infrastructure {
    pub id: RecordId,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub gp_name: Option<String>,
    #[serde(default)]
    pub ring_name: Option<String>,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub router_category: Option<String>,
    #[serde(default)]
    pub router_status: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub electricity_meter: Option<String>,
    #[serde(default)]
    pub live_status: Option<String>,
    #[serde(default)]
    pub live_date: Option<String>,
    #[serde(default)]
    pub not_live_reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Infrastructure {
    pub fn is_live(&self) -> bool {
        self.live_status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("live") || s.eq_ignore_ascii_case("yes"))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfrastructureInput {
    pub block: String,
    pub gp_name: String,
    pub ring_name: Option<String>,
    pub building: Option<String>,
    pub router_category: Option<String>,
    pub router_status: Option<String>,
    pub status: Option<String>,
    pub electricity_meter: Option<String>,
    pub live_status: Option<String>,
    pub live_date: Option<NaiveDate>,
    pub not_live_reason: Option<String>,
    pub notes: Option<String>,
}

impl InfrastructureInput {
    pub fn to_columns(&self) -> Map<String, Value> {
        let row = json!({
            "block": self.block,
            "gp_name": self.gp_name,
            "ring_name": self.ring_name,
            "building": self.building,
            "router_category": self.router_category,
            "router_status": self.router_status,
            "status": self.status,
            "electricity_meter": self.electricity_meter,
            "live_status": self.live_status,
            "live_date": self.live_date.map(|d| d.format("%Y-%m-%d").to_string()),
            "not_live_reason": self.not_live_reason,
            "notes": self.notes,
        });

        match row {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}
