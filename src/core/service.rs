//! Data access façade.
//!
//! One async operation per entity and action. Each builds a [`Query`] (or a
//! row payload), hands it to the injected backend, logs failures and returns
//! them to the caller as `AppError`.

use crate::backend::{Backend, Predicate, Query, Table};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Chamber, DailyWork, DailyWorkInput, Infrastructure, InfrastructureInfo, InfrastructureInput,
    RecordFilter, RecordId, WorkScope,
};
use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Conflict target for work-scope upserts.
pub const WORK_SCOPE_CONFLICT: &str = "block";

pub struct DataService<B: Backend> {
    backend: B,
}

/// Client-clock timestamp stamped on every write.
pub fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn date_param(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn decode<T: DeserializeOwned>(rows: Vec<Value>) -> AppResult<Vec<T>> {
    rows.into_iter()
        .map(|r| serde_json::from_value(r).map_err(Into::into))
        .collect()
}

/// Log a failed operation at the façade boundary and pass the result through.
pub(crate) fn logged<T>(what: &str, result: AppResult<T>) -> AppResult<T> {
    if let Err(e) = &result {
        tracing::error!(error = %e, "Error {what}");
    }
    result
}

// ---------------------------
// Query builders
// ---------------------------

pub fn work_scope_query() -> Query {
    Query::from(Table::WorkScope).order("block", true)
}

pub fn daily_work_query(filter: &RecordFilter) -> Query {
    let mut q = Query::from(Table::DailyWork).order("work_date", false);

    if let Some(block) = filter.block_selector() {
        q = q.eq("block", block);
    }

    if let Some((start, end)) = filter.date_range() {
        q = q
            .gte("work_date", date_param(start))
            .lte("work_date", date_param(end));
    }

    q
}

pub fn infrastructure_query(filter: &RecordFilter) -> Query {
    let mut q = Query::from(Table::Infrastructure).order("created_at", false);

    if let Some(block) = filter.block_selector() {
        q = q.eq("block", block);
    }

    if let Some(status) = filter.live_status_selector() {
        q = q.eq("live_status", status);
    }

    q
}

fn block_filtered(table: Table, filter: &RecordFilter) -> Query {
    let q = Query::from(table).order("created_at", false);
    match filter.block_selector() {
        Some(block) => q.eq("block", block),
        None => q,
    }
}

pub fn infrastructure_info_query(filter: &RecordFilter) -> Query {
    block_filtered(Table::InfrastructureInfo, filter)
}

pub fn chambers_query(filter: &RecordFilter) -> Query {
    block_filtered(Table::Chambers, filter)
}

pub fn system_status_query() -> Query {
    Query::from(Table::SystemStatus).limit(1)
}

impl<B: Backend> DataService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    async fn fetch<T: DeserializeOwned>(&self, query: &Query) -> AppResult<Vec<T>> {
        decode(self.backend.select(query).await?)
    }

    // ---------------------------
    // Work scope
    // ---------------------------

    pub async fn get_work_scope(&self) -> AppResult<Vec<WorkScope>> {
        logged("fetching work scope", self.fetch(&work_scope_query()).await)
    }

    /// Insert or replace the scope of a block.
    pub async fn save_work_scope(&self, block: &str, total_scope: f64) -> AppResult<Vec<WorkScope>> {
        let row = json!({
            "block": block,
            "total_scope": total_scope,
            "updated_at": now_stamp(),
        });

        let result = async {
            let rows = self
                .backend
                .upsert(Table::WorkScope, row, WORK_SCOPE_CONFLICT)
                .await?;
            decode::<WorkScope>(rows)
        }
        .await;

        if result.is_ok() {
            tracing::info!(block, total_scope, "work scope saved");
        }
        logged("saving work scope", result)
    }

    // ---------------------------
    // Daily work
    // ---------------------------

    pub async fn get_daily_work(&self, filter: &RecordFilter) -> AppResult<Vec<DailyWork>> {
        logged(
            "fetching daily work",
            self.fetch(&daily_work_query(filter)).await,
        )
    }

    pub async fn save_daily_work(&self, input: &DailyWorkInput) -> AppResult<DailyWork> {
        let mut row = input.to_columns();
        row.insert("created_at".into(), Value::String(now_stamp()));

        let result = async {
            let stored = self
                .backend
                .insert(Table::DailyWork, Value::Object(row))
                .await?;
            Ok::<_, AppError>(serde_json::from_value::<DailyWork>(stored)?)
        }
        .await;

        if let Ok(w) = &result {
            tracing::info!(id = %w.id, block = %input.block, "daily work saved");
        }
        logged("saving daily work", result)
    }

    pub async fn update_daily_work(
        &self,
        id: &RecordId,
        input: &DailyWorkInput,
    ) -> AppResult<Vec<DailyWork>> {
        let mut patch = input.to_columns();
        patch.insert("updated_at".into(), Value::String(now_stamp()));

        let result = async {
            let rows = self
                .backend
                .update(
                    Table::DailyWork,
                    Value::Object(patch),
                    &Predicate::eq("id", id),
                )
                .await?;
            decode::<DailyWork>(rows)
        }
        .await;

        if let Ok(rows) = &result {
            tracing::info!(%id, updated = rows.len(), "daily work updated");
        }
        logged("updating daily work", result)
    }

    pub async fn delete_daily_work(&self, id: &RecordId) -> AppResult<()> {
        let result = self
            .backend
            .delete(Table::DailyWork, &Predicate::eq("id", id))
            .await;

        if result.is_ok() {
            tracing::info!(%id, "daily work deleted");
        }
        logged("deleting daily work", result)
    }

    // ---------------------------
    // Infrastructure
    // ---------------------------

    pub async fn get_infrastructure(&self, filter: &RecordFilter) -> AppResult<Vec<Infrastructure>> {
        logged(
            "fetching infrastructure",
            self.fetch(&infrastructure_query(filter)).await,
        )
    }

    pub async fn save_infrastructure(&self, input: &InfrastructureInput) -> AppResult<Infrastructure> {
        let mut row = input.to_columns();
        row.insert("created_at".into(), Value::String(now_stamp()));

        let result = async {
            let stored = self
                .backend
                .insert(Table::Infrastructure, Value::Object(row))
                .await?;
            Ok::<_, AppError>(serde_json::from_value::<Infrastructure>(stored)?)
        }
        .await;

        if let Ok(i) = &result {
            tracing::info!(id = %i.id, block = %input.block, "infrastructure saved");
        }
        logged("saving infrastructure", result)
    }

    pub async fn get_infrastructure_info(
        &self,
        filter: &RecordFilter,
    ) -> AppResult<Vec<InfrastructureInfo>> {
        logged(
            "fetching infrastructure info",
            self.fetch(&infrastructure_info_query(filter)).await,
        )
    }

    // ---------------------------
    // Chambers
    // ---------------------------

    pub async fn get_chambers(&self, filter: &RecordFilter) -> AppResult<Vec<Chamber>> {
        logged("fetching chambers", self.fetch(&chambers_query(filter)).await)
    }

    // ---------------------------
    // Health check
    // ---------------------------

    /// Read one row of `system_status`; success means the backend answers.
    pub async fn check_system_status(&self) -> AppResult<Vec<Value>> {
        logged(
            "checking system status",
            self.backend.select(&system_status_query()).await,
        )
    }

    /// Tables visible on the backend. Diagnostic only.
    pub async fn list_tables(&self) -> AppResult<Vec<String>> {
        let result = self.backend.list_tables().await;
        if let Ok(tables) = &result {
            tracing::info!(backend = self.backend.name(), ?tables, "existing tables");
        }
        logged("listing tables", result)
    }
}
