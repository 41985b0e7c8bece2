#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use infratrack::backend::{Backend, LocalBackend, Predicate, Query, Table};
use infratrack::core::DataService;
use infratrack::errors::{AppError, AppResult};
use infratrack::models::{DailyWorkInput, InfrastructureInput};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const PUBLIC_BASE: &str = "http://files.test/public";

/// CLI command with an isolated config home.
pub fn itk(home: &PathBuf) -> Command {
    let mut cmd = cargo_bin_cmd!("infratrack");
    cmd.env("INFRATRACK_HOME", home);
    cmd
}

/// Fresh, empty directory inside the system temp dir.
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("infratrack_{name}"));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Unique test DB path inside the system temp dir, any previous file removed.
pub fn setup_test_db(name: &str) -> String {
    let mut path = env::temp_dir();
    path.push(format!("{name}_infratrack.sqlite"));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

pub fn local_service() -> DataService<LocalBackend> {
    DataService::new(LocalBackend::in_memory(PUBLIC_BASE).expect("in-memory backend"))
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn work_input(block: &str, day: &str, done: f64) -> DailyWorkInput {
    DailyWorkInput {
        district: "Khordha".into(),
        block: block.into(),
        machine_number: "HDD-07".into(),
        ring_name: "R1".into(),
        route_name: "GP Jatni - GP Bhubaneswar".into(),
        date: date(day),
        work_done: done,
        description: Some("duct laying".into()),
    }
}

pub fn infra_input(block: &str, gp: &str, live: &str) -> InfrastructureInput {
    InfrastructureInput {
        block: block.into(),
        gp_name: gp.into(),
        ring_name: Some("R1".into()),
        building: Some("GP office".into()),
        router_category: Some("ONT".into()),
        router_status: Some("installed".into()),
        status: Some("ok".into()),
        electricity_meter: Some("yes".into()),
        live_status: Some(live.into()),
        live_date: None,
        not_live_reason: None,
        notes: None,
    }
}

/// Insert a chamber row directly: the façade has no write path for chambers.
pub async fn seed_chamber(backend: &LocalBackend, block: &str, number: &str) {
    backend
        .insert(
            Table::Chambers,
            serde_json::json!({
                "block": block,
                "chamber_number": number,
                "created_at": "2024-01-10T08:00:00.000Z",
            }),
        )
        .await
        .expect("seed chamber");
}

/// Wraps a backend, counts calls and optionally fails reads of one table.
pub struct RecordingBackend<B: Backend> {
    pub inner: B,
    pub calls: AtomicUsize,
    pub fail_table: Option<Table>,
}

impl<B: Backend> RecordingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            fail_table: None,
        }
    }

    pub fn failing_on(inner: B, table: Table) -> Self {
        Self {
            fail_table: Some(table),
            ..Self::new(inner)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl<B: Backend> Backend for RecordingBackend<B> {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn select(&self, query: &Query) -> AppResult<Vec<Value>> {
        self.hit();
        if self.fail_table == Some(query.table) {
            return Err(AppError::Backend {
                status: 503,
                code: None,
                message: format!("{} unavailable", query.table),
            });
        }
        self.inner.select(query).await
    }

    async fn insert(&self, table: Table, row: Value) -> AppResult<Value> {
        self.hit();
        self.inner.insert(table, row).await
    }

    async fn upsert(&self, table: Table, row: Value, on_conflict: &str) -> AppResult<Vec<Value>> {
        self.hit();
        self.inner.upsert(table, row, on_conflict).await
    }

    async fn update(
        &self,
        table: Table,
        patch: Value,
        filter: &Predicate,
    ) -> AppResult<Vec<Value>> {
        self.hit();
        self.inner.update(table, patch, filter).await
    }

    async fn delete(&self, table: Table, filter: &Predicate) -> AppResult<()> {
        self.hit();
        self.inner.delete(table, filter).await
    }

    async fn upload(
        &self,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<()> {
        self.hit();
        self.inner.upload(bucket, name, bytes, content_type).await
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        self.inner.public_url(bucket, name)
    }

    async fn list_tables(&self) -> AppResult<Vec<String>> {
        self.hit();
        self.inner.list_tables().await
    }
}

/// Answers every read with fixed rows, as a remote service with its own schema would.
/// Writes record the filter they were given.
pub struct CannedBackend {
    pub rows: Vec<Value>,
    pub filters: Mutex<Vec<Predicate>>,
}

impl CannedBackend {
    pub fn new(rows: Vec<Value>) -> Self {
        Self {
            rows,
            filters: Mutex::new(Vec::new()),
        }
    }

    pub fn filters(&self) -> Vec<Predicate> {
        self.filters.lock().unwrap().clone()
    }

    fn record(&self, filter: &Predicate) {
        self.filters.lock().unwrap().push(filter.clone());
    }
}

impl Backend for CannedBackend {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn select(&self, _query: &Query) -> AppResult<Vec<Value>> {
        Ok(self.rows.clone())
    }

    async fn insert(&self, _table: Table, row: Value) -> AppResult<Value> {
        Ok(row)
    }

    async fn upsert(&self, _table: Table, row: Value, _on_conflict: &str) -> AppResult<Vec<Value>> {
        Ok(vec![row])
    }

    async fn update(
        &self,
        _table: Table,
        _patch: Value,
        filter: &Predicate,
    ) -> AppResult<Vec<Value>> {
        self.record(filter);
        Ok(self.rows.clone())
    }

    async fn delete(&self, _table: Table, filter: &Predicate) -> AppResult<()> {
        self.record(filter);
        Ok(())
    }

    async fn upload(
        &self,
        _bucket: &str,
        _name: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> AppResult<()> {
        Ok(())
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        format!("{PUBLIC_BASE}/{bucket}/{name}")
    }

    async fn list_tables(&self) -> AppResult<Vec<String>> {
        Ok(Vec::new())
    }
}
