//! Read-only survey tables. Only the shared columns are typed; everything else
//! the backend returns is kept in `extra`.

use crate::models::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureInfo {
    pub id: RecordId,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chamber {
    pub id: RecordId,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
