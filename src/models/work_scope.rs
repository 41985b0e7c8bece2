use crate::models::{RecordId, null_as_default};
use serde::{Deserialize, Serialize};

/// Planned scope of work for one block. One row per block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkScope {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub block: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_scope: f64,
    #[serde(default)]
    pub updated_at: Option<String>,
}
