//! Backend-neutral query description.
//!
//! A `Query` is what the façade builds and what every backend translates:
//! PostgREST query-string parameters for the remote service, a parametrized
//! `SELECT` for the local SQLite store.

use crate::backend::tables::Table;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Gte,
    Lte,
}

impl Op {
    /// PostgREST operator keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Gte => "gte",
            Op::Lte => "lte",
        }
    }

    /// SQL comparison operator.
    pub fn sql(&self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Gte => ">=",
            Op::Lte => "<=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub op: Op,
    pub value: Value,
}

impl Predicate {
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self {
            column: column.to_string(),
            op: Op::Eq,
            value: value.into(),
        }
    }

    /// Value rendered the way it appears in a filter expression (strings unquoted).
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: Table,
    pub filters: Vec<Predicate>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    /// `select *` on a table, no predicates.
    pub fn from(table: Table) -> Self {
        Self {
            table,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    pub fn eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.push(column, Op::Eq, value.into())
    }

    pub fn gte(self, column: &str, value: impl Into<Value>) -> Self {
        self.push(column, Op::Gte, value.into())
    }

    pub fn lte(self, column: &str, value: impl Into<Value>) -> Self {
        self.push(column, Op::Lte, value.into())
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    fn push(mut self, column: &str, op: Op, value: Value) -> Self {
        self.filters.push(Predicate {
            column: column.to_string(),
            op,
            value,
        });
        self
    }

    /// PostgREST query-string pairs, in a stable order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];

        for p in &self.filters {
            params.push((
                p.column.clone(),
                format!("{}.{}", p.op.keyword(), p.value_text()),
            ));
        }

        if let Some(o) = &self.order {
            let dir = if o.ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{}", o.column, dir)));
        }

        if let Some(n) = self.limit {
            params.push(("limit".to_string(), n.to_string()));
        }

        params
    }
}
