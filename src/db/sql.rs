//! Translation between JSON rows / backend queries and SQLite statements.

use crate::backend::query::{Predicate, Query};
use crate::errors::{AppError, AppResult};
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{Row, Statement, params_from_iter};
use serde_json::{Map, Number, Value};

pub fn to_sql_value(v: &Value) -> SqlValue {
    match v {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn value_ref_to_json(v: ValueRef<'_>) -> Value {
    match v {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(format!("<{} bytes>", b.len())),
    }
}

pub fn row_to_json(row: &Row<'_>, names: &[String]) -> rusqlite::Result<Value> {
    let mut obj = Map::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        obj.insert(name.clone(), value_ref_to_json(row.get_ref(i)?));
    }
    Ok(Value::Object(obj))
}

/// Run a prepared statement and collect every returned row as a JSON object.
pub fn collect_rows(stmt: &mut Statement<'_>, params: &[SqlValue]) -> AppResult<Vec<Value>> {
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let mut rows = stmt.query(params_from_iter(params.iter()))?;

    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(row_to_json(row, &names)?);
    }
    Ok(out)
}

/// Split a JSON object into ordered (column, value) pairs.
pub fn object_fields(row: &Value) -> AppResult<Vec<(String, SqlValue)>> {
    let obj = row
        .as_object()
        .ok_or_else(|| AppError::Other(format!("row must be a JSON object, got {row}")))?;

    Ok(obj
        .iter()
        .map(|(k, v)| (k.clone(), to_sql_value(v)))
        .collect())
}

fn placeholders(from: usize, n: usize) -> String {
    (from..from + n)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn build_select(query: &Query) -> (String, Vec<SqlValue>) {
    let mut sql = format!("SELECT * FROM {}", query.table.as_str());
    let mut params = Vec::with_capacity(query.filters.len());

    if !query.filters.is_empty() {
        let clauses: Vec<String> = query
            .filters
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{} {} ?{}", p.column, p.op.sql(), i + 1))
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
        params.extend(query.filters.iter().map(|p| to_sql_value(&p.value)));
    }

    if let Some(o) = &query.order {
        let dir = if o.ascending { "ASC" } else { "DESC" };
        // id come secondo criterio: ordine stabile tra righe con la stessa chiave
        sql.push_str(&format!(" ORDER BY {} {dir}, id {dir}", o.column));
    }

    if let Some(n) = query.limit {
        sql.push_str(&format!(" LIMIT {n}"));
    }

    (sql, params)
}

pub fn build_insert(table: &str, columns: &[String]) -> String {
    format!(
        "INSERT INTO {table} ({}) VALUES ({}) RETURNING *",
        columns.join(", "),
        placeholders(1, columns.len())
    )
}

pub fn build_upsert(table: &str, columns: &[String], conflict: &str) -> String {
    let updates: Vec<String> = columns
        .iter()
        .filter(|c| c.as_str() != conflict)
        .map(|c| format!("{c} = excluded.{c}"))
        .collect();

    let action = if updates.is_empty() {
        "NOTHING".to_string()
    } else {
        format!("UPDATE SET {}", updates.join(", "))
    };

    format!(
        "INSERT INTO {table} ({}) VALUES ({}) ON CONFLICT({conflict}) DO {action} RETURNING *",
        columns.join(", "),
        placeholders(1, columns.len())
    )
}

pub fn build_update(table: &str, columns: &[String], filter: &Predicate) -> String {
    let sets: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{c} = ?{}", i + 1))
        .collect();

    format!(
        "UPDATE {table} SET {} WHERE {} {} ?{} RETURNING *",
        sets.join(", "),
        filter.column,
        filter.op.sql(),
        columns.len() + 1
    )
}

pub fn build_delete(table: &str, filter: &Predicate) -> String {
    format!(
        "DELETE FROM {table} WHERE {} {} ?1",
        filter.column,
        filter.op.sql()
    )
}
