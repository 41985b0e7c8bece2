//! Remote client handle: PostgREST tables and the storage API of the hosted
//! service, authenticated with the project key.

use crate::backend::query::{Predicate, Query};
use crate::backend::tables::Table;
use crate::backend::Backend;
use crate::errors::{AppError, AppResult};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde_json::Value;

const PREFER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";
const MERGE_DUPLICATES: &str = "resolution=merge-duplicates,return=representation";

/// Error body returned by PostgREST (`code`) and by the storage API (`error`).
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

pub struct RestBackend {
    base: Url,
    http: Client,
}

impl RestBackend {
    /// Build the handle from project URL and API key.
    ///
    /// Fails when the URL is not an absolute http(s) URL or the key cannot be
    /// carried in a header.
    pub fn new(url: &str, key: &str) -> AppResult<Self> {
        let base = Url::parse(url.trim_end_matches('/'))
            .map_err(|e| AppError::ClientInit(format!("invalid URL '{url}': {e}")))?;

        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::ClientInit(format!(
                "URL must be http(s): '{url}'"
            )));
        }

        if key.trim().is_empty() {
            return Err(AppError::ClientInit("API key is empty".into()));
        }

        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(key)
            .map_err(|e| AppError::ClientInit(format!("invalid API key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| AppError::ClientInit(format!("invalid API key: {e}")))?;
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::ClientInit(e.to_string()))?;

        tracing::debug!(url = %base, "backend client initialized");
        Ok(Self { base, http })
    }

    /// `base` + path segments, each percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn table_url(&self, table: Table) -> Url {
        self.endpoint(&["rest", "v1", table.as_str()])
    }
}

/// Turn a non-2xx response into `AppError::Backend`.
async fn check(resp: Response) -> AppResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();

    let mut message = body
        .message
        .or(body.error.clone())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    if let Some(d) = body.details {
        message.push_str(&format!(" ({d})"));
    }
    if let Some(h) = body.hint {
        message.push_str(&format!(" hint: {h}"));
    }

    Err(AppError::Backend {
        status: status.as_u16(),
        code: body.code.or(body.error),
        message,
    })
}

async fn rows(resp: Response) -> AppResult<Vec<Value>> {
    let resp = check(resp).await?;
    let text = resp.text().await?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Value>(&text)? {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        single => Ok(vec![single]),
    }
}

fn filter_param(filter: &Predicate) -> (String, String) {
    (
        filter.column.clone(),
        format!("{}.{}", filter.op.keyword(), filter.value_text()),
    )
}

impl Backend for RestBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn select(&self, query: &Query) -> AppResult<Vec<Value>> {
        let url = self.table_url(query.table);
        tracing::debug!(table = %query.table, params = ?query.to_params(), "GET");

        let resp = self.http.get(url).query(&query.to_params()).send().await?;
        rows(resp).await
    }

    async fn insert(&self, table: Table, row: Value) -> AppResult<Value> {
        tracing::debug!(%table, "POST");

        let resp = self
            .http
            .post(self.table_url(table))
            .header(PREFER, RETURN_REPRESENTATION)
            .json(&row)
            .send()
            .await?;

        rows(resp)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("inserted row not returned by {table}")))
    }

    async fn upsert(&self, table: Table, row: Value, on_conflict: &str) -> AppResult<Vec<Value>> {
        tracing::debug!(%table, on_conflict, "POST (upsert)");

        let resp = self
            .http
            .post(self.table_url(table))
            .query(&[("on_conflict", on_conflict)])
            .header(PREFER, MERGE_DUPLICATES)
            .json(&row)
            .send()
            .await?;
        rows(resp).await
    }

    async fn update(
        &self,
        table: Table,
        patch: Value,
        filter: &Predicate,
    ) -> AppResult<Vec<Value>> {
        tracing::debug!(%table, column = %filter.column, "PATCH");

        let resp = self
            .http
            .patch(self.table_url(table))
            .query(&[filter_param(filter)])
            .header(PREFER, RETURN_REPRESENTATION)
            .json(&patch)
            .send()
            .await?;
        rows(resp).await
    }

    async fn delete(&self, table: Table, filter: &Predicate) -> AppResult<()> {
        tracing::debug!(%table, column = %filter.column, "DELETE");

        let resp = self
            .http
            .delete(self.table_url(table))
            .query(&[filter_param(filter)])
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<()> {
        tracing::debug!(bucket, name, size = bytes.len(), "storage upload");

        let resp = self
            .http
            .post(self.endpoint(&["storage", "v1", "object", bucket, name]))
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        self.endpoint(&["storage", "v1", "object", "public", bucket, name])
            .to_string()
    }

    async fn list_tables(&self) -> AppResult<Vec<String>> {
        // La root REST espone lo schema OpenAPI: le tabelle sono le chiavi di `definitions`.
        let resp = self.http.get(self.endpoint(&["rest", "v1", ""])).send().await?;
        let doc: Value = check(resp).await?.json().await?;

        let mut names: Vec<String> = doc
            .get("definitions")
            .and_then(Value::as_object)
            .map(|defs| defs.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        Ok(names)
    }
}
