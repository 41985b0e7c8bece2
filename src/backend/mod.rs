//! Backend seam: everything the façade needs from a storage service.
//!
//! Two implementations ship with the crate: [`rest::RestBackend`] talks to the
//! hosted PostgREST + storage API, [`local::LocalBackend`] keeps the same tables
//! in a SQLite file.

pub mod local;
pub mod query;
pub mod rest;
pub mod tables;

pub use local::LocalBackend;
pub use query::{Op, Order, Predicate, Query};
pub use rest::RestBackend;
pub use tables::Table;

use crate::errors::AppResult;
use serde_json::Value;

/// REST-shaped operations over named tables plus object storage.
///
/// Rows travel as JSON objects keyed by column name.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Short label used in log lines.
    fn name(&self) -> &'static str;

    async fn select(&self, query: &Query) -> AppResult<Vec<Value>>;

    /// Insert one row and return it as stored (ids and defaults filled in).
    async fn insert(&self, table: Table, row: Value) -> AppResult<Value>;

    async fn upsert(&self, table: Table, row: Value, on_conflict: &str) -> AppResult<Vec<Value>>;

    async fn update(&self, table: Table, patch: Value, filter: &Predicate)
    -> AppResult<Vec<Value>>;

    async fn delete(&self, table: Table, filter: &Predicate) -> AppResult<()>;

    async fn upload(
        &self,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<()>;

    /// Public URL of a stored object. Pure computation, no request.
    fn public_url(&self, bucket: &str, name: &str) -> String;

    async fn list_tables(&self) -> AppResult<Vec<String>>;
}

/// Backend selected at runtime from configuration.
pub enum AnyBackend {
    Remote(RestBackend),
    Local(LocalBackend),
}

impl Backend for AnyBackend {
    fn name(&self) -> &'static str {
        match self {
            AnyBackend::Remote(b) => b.name(),
            AnyBackend::Local(b) => b.name(),
        }
    }

    async fn select(&self, query: &Query) -> AppResult<Vec<Value>> {
        match self {
            AnyBackend::Remote(b) => b.select(query).await,
            AnyBackend::Local(b) => b.select(query).await,
        }
    }

    async fn insert(&self, table: Table, row: Value) -> AppResult<Value> {
        match self {
            AnyBackend::Remote(b) => b.insert(table, row).await,
            AnyBackend::Local(b) => b.insert(table, row).await,
        }
    }

    async fn upsert(&self, table: Table, row: Value, on_conflict: &str) -> AppResult<Vec<Value>> {
        match self {
            AnyBackend::Remote(b) => b.upsert(table, row, on_conflict).await,
            AnyBackend::Local(b) => b.upsert(table, row, on_conflict).await,
        }
    }

    async fn update(
        &self,
        table: Table,
        patch: Value,
        filter: &Predicate,
    ) -> AppResult<Vec<Value>> {
        match self {
            AnyBackend::Remote(b) => b.update(table, patch, filter).await,
            AnyBackend::Local(b) => b.update(table, patch, filter).await,
        }
    }

    async fn delete(&self, table: Table, filter: &Predicate) -> AppResult<()> {
        match self {
            AnyBackend::Remote(b) => b.delete(table, filter).await,
            AnyBackend::Local(b) => b.delete(table, filter).await,
        }
    }

    async fn upload(
        &self,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<()> {
        match self {
            AnyBackend::Remote(b) => b.upload(bucket, name, bytes, content_type).await,
            AnyBackend::Local(b) => b.upload(bucket, name, bytes, content_type).await,
        }
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        match self {
            AnyBackend::Remote(b) => b.public_url(bucket, name),
            AnyBackend::Local(b) => b.public_url(bucket, name),
        }
    }

    async fn list_tables(&self) -> AppResult<Vec<String>> {
        match self {
            AnyBackend::Remote(b) => b.list_tables().await,
            AnyBackend::Local(b) => b.list_tables().await,
        }
    }
}
