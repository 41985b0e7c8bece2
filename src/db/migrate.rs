//! Schema of the local backend.
//!
//! Mirrors the tables of the hosted service, plus `storage_objects` standing in
//! for the object store and `log` recording applied migrations.

use crate::db::log::ttlog;
use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20240101_0001_core_tables",
        "Created work_scope, daily_work and infrastructure tables",
        r#"
        CREATE TABLE IF NOT EXISTS work_scope (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            block        TEXT NOT NULL UNIQUE,
            total_scope  REAL NOT NULL DEFAULT 0,
            created_at   TEXT,
            updated_at   TEXT
        );

        CREATE TABLE IF NOT EXISTS daily_work (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            district        TEXT,
            block           TEXT,
            machine_number  TEXT,
            ring_name       TEXT,
            route_name      TEXT,
            work_date       TEXT NOT NULL,
            work_done       REAL NOT NULL DEFAULT 0,
            description     TEXT,
            created_at      TEXT,
            updated_at      TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_daily_work_date ON daily_work(work_date);
        CREATE INDEX IF NOT EXISTS idx_daily_work_block ON daily_work(block);

        CREATE TABLE IF NOT EXISTS infrastructure (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            block              TEXT,
            gp_name            TEXT,
            ring_name          TEXT,
            building           TEXT,
            router_category    TEXT,
            router_status      TEXT,
            status             TEXT,
            electricity_meter  TEXT,
            live_status        TEXT,
            live_date          TEXT,
            not_live_reason    TEXT,
            notes              TEXT,
            created_at         TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_infrastructure_block ON infrastructure(block);
        "#,
    ),
    (
        "20240115_0002_survey_tables",
        "Created infrastructure_info and chambers tables",
        r#"
        CREATE TABLE IF NOT EXISTS infrastructure_info (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            block        TEXT,
            gp_name      TEXT,
            ring_name    TEXT,
            olt_port     TEXT,
            ont_serial   TEXT,
            notes        TEXT,
            created_at   TEXT
        );

        CREATE TABLE IF NOT EXISTS chambers (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            block           TEXT,
            ring_name       TEXT,
            chamber_number  TEXT,
            chamber_type    TEXT,
            latitude        REAL,
            longitude       REAL,
            photo_url       TEXT,
            notes           TEXT,
            created_at      TEXT
        );
        "#,
    ),
    (
        "20240201_0003_status_and_storage",
        "Created system_status and storage_objects tables",
        r#"
        CREATE TABLE IF NOT EXISTS system_status (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            component   TEXT NOT NULL,
            status      TEXT NOT NULL,
            checked_at  TEXT
        );

        CREATE TABLE IF NOT EXISTS storage_objects (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            bucket        TEXT NOT NULL,
            name          TEXT NOT NULL,
            content_type  TEXT NOT NULL,
            bytes         BLOB NOT NULL,
            created_at    TEXT NOT NULL,
            UNIQUE(bucket, name)
        );
        "#,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Invoked by `DbPool::new()`; safe to run on every open.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for (version, message, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch(sql)?;
        ttlog(conn, "migration_applied", version, message)?;
        tracing::info!(version, "migration applied");
    }

    Ok(())
}

/// Names of the user tables, internal bookkeeping excluded.
pub fn table_names(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table'
           AND name NOT LIKE 'sqlite_%'
           AND name NOT IN ('log', 'storage_objects')
         ORDER BY name",
    )?;

    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Column names of a table, in declaration order.
pub fn table_columns(conn: &Connection, table: &str) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?);
    }
    Ok(out)
}
