//! SQLite-backed implementation of the backend seam.
//!
//! Used for offline work (`backend: local` in the config file, or `--db`) and
//! as the substitute service in tests.

use crate::backend::query::{Predicate, Query};
use crate::backend::tables::Table;
use crate::backend::Backend;
use crate::db::migrate::{table_columns, table_names};
use crate::db::pool::DbPool;
use crate::db::sql::{
    build_delete, build_insert, build_select, build_update, build_upsert, collect_rows,
    object_fields, to_sql_value,
};
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};

pub struct LocalBackend {
    pool: Mutex<DbPool>,
    public_base: String,
}

impl LocalBackend {
    pub fn open(path: &str, public_base: &str) -> AppResult<Self> {
        Ok(Self::from_pool(DbPool::new(path)?, public_base))
    }

    pub fn in_memory(public_base: &str) -> AppResult<Self> {
        Ok(Self::from_pool(DbPool::in_memory()?, public_base))
    }

    fn from_pool(pool: DbPool, public_base: &str) -> Self {
        Self {
            pool: Mutex::new(pool),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, DbPool>> {
        self.pool
            .lock()
            .map_err(|_| AppError::Other("local database lock poisoned".into()))
    }

    /// Stored object content type and bytes, if present.
    pub fn fetch_object(&self, bucket: &str, name: &str) -> AppResult<Option<(String, Vec<u8>)>> {
        let pool = self.lock()?;
        let found = pool
            .conn
            .query_row(
                "SELECT content_type, bytes FROM storage_objects WHERE bucket = ?1 AND name = ?2",
                params![bucket, name],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?)),
            )
            .optional()?;
        Ok(found)
    }
}

/// Reject any column the table does not declare; column names end up in SQL text.
fn check_columns<'a>(
    conn: &Connection,
    table: Table,
    columns: impl IntoIterator<Item = &'a str>,
) -> AppResult<()> {
    let known = table_columns(conn, table.as_str())?;
    for c in columns {
        if !known.iter().any(|k| k == c) {
            return Err(AppError::UnknownColumn {
                table: table.as_str().to_string(),
                column: c.to_string(),
            });
        }
    }
    Ok(())
}

impl Backend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn select(&self, query: &Query) -> AppResult<Vec<Value>> {
        let pool = self.lock()?;

        let mut cols: Vec<&str> = query.filters.iter().map(|p| p.column.as_str()).collect();
        if let Some(o) = &query.order {
            cols.push(o.column.as_str());
        }
        check_columns(&pool.conn, query.table, cols)?;

        let (sql, params) = build_select(query);
        tracing::debug!(%sql, "local select");

        let mut stmt = pool.conn.prepare(&sql)?;
        collect_rows(&mut stmt, &params)
    }

    async fn insert(&self, table: Table, row: Value) -> AppResult<Value> {
        let pool = self.lock()?;

        let fields = object_fields(&row)?;
        check_columns(&pool.conn, table, fields.iter().map(|(c, _)| c.as_str()))?;

        let (columns, values): (Vec<String>, Vec<_>) = fields.into_iter().unzip();
        let sql = build_insert(table.as_str(), &columns);

        let mut stmt = pool.conn.prepare(&sql)?;
        collect_rows(&mut stmt, &values)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("inserted row not returned by {table}")))
    }

    async fn upsert(&self, table: Table, row: Value, on_conflict: &str) -> AppResult<Vec<Value>> {
        let pool = self.lock()?;

        let fields = object_fields(&row)?;
        check_columns(
            &pool.conn,
            table,
            fields
                .iter()
                .map(|(c, _)| c.as_str())
                .chain(std::iter::once(on_conflict)),
        )?;

        let (columns, values): (Vec<String>, Vec<_>) = fields.into_iter().unzip();
        let sql = build_upsert(table.as_str(), &columns, on_conflict);

        let mut stmt = pool.conn.prepare(&sql)?;
        collect_rows(&mut stmt, &values)
    }

    async fn update(
        &self,
        table: Table,
        patch: Value,
        filter: &Predicate,
    ) -> AppResult<Vec<Value>> {
        let pool = self.lock()?;

        let fields = object_fields(&patch)?;
        check_columns(
            &pool.conn,
            table,
            fields
                .iter()
                .map(|(c, _)| c.as_str())
                .chain(std::iter::once(filter.column.as_str())),
        )?;

        let (columns, mut values): (Vec<String>, Vec<_>) = fields.into_iter().unzip();
        values.push(to_sql_value(&filter.value));
        let sql = build_update(table.as_str(), &columns, filter);

        let mut stmt = pool.conn.prepare(&sql)?;
        collect_rows(&mut stmt, &values)
    }

    async fn delete(&self, table: Table, filter: &Predicate) -> AppResult<()> {
        let pool = self.lock()?;
        check_columns(&pool.conn, table, [filter.column.as_str()])?;

        let sql = build_delete(table.as_str(), filter);
        pool.conn.execute(&sql, [to_sql_value(&filter.value)])?;
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<()> {
        let pool = self.lock()?;

        let exists = pool
            .conn
            .query_row(
                "SELECT 1 FROM storage_objects WHERE bucket = ?1 AND name = ?2",
                params![bucket, name],
                |_| Ok(()),
            )
            .optional()?
            .is_some();

        if exists {
            return Err(AppError::Backend {
                status: 409,
                code: Some("Duplicate".into()),
                message: format!("The resource already exists: {bucket}/{name}"),
            });
        }

        pool.conn.execute(
            "INSERT INTO storage_objects (bucket, name, content_type, bytes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![bucket, name, content_type, bytes, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        format!("{}/{bucket}/{name}", self.public_base)
    }

    async fn list_tables(&self) -> AppResult<Vec<String>> {
        let pool = self.lock()?;
        table_names(&pool.conn)
    }
}
