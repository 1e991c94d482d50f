//! Supabase PostgREST client.
//!
//! Thin typed wrapper over the `rest/v1` table endpoints:
//! - Service-key auth on every request (apikey + bearer headers)
//! - HTTP client tuning (pooling, timeouts)
//! - Observability (tracing spans, request metrics)
//!
//! The whole store is optional: when `SUPABASE_URL`/`SUPABASE_SERVICE_KEY`
//! are absent the API runs without persistence, so construction from the
//! environment returns `None` rather than failing.

use std::time::{Duration, Instant};

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info_span, Instrument};

use crate::error::{StoreError, StoreResult};
use crate::metrics::record_request;

/// Supabase client configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    pub base_url: String,
    /// Service-role key; bypasses row-level security
    pub service_key: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl StoreConfig {
    /// Read configuration from the environment; `None` when the store is
    /// not configured (development mode, no persistence).
    pub fn from_env() -> Option<Self> {
        let base_url = non_empty(std::env::var("SUPABASE_URL").ok())?;
        let service_key = non_empty(std::env::var("SUPABASE_SERVICE_KEY").ok())?;
        Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        })
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

/// Supabase PostgREST client.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    config: StoreConfig,
    base_url: String,
}

impl SupabaseClient {
    /// Create a new client.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("adforge-store/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StoreError::Network)?;

        let base_url = format!("{}/rest/v1", config.base_url);

        Ok(Self {
            http,
            config,
            base_url,
        })
    }

    /// Create from environment variables; `None` when not configured.
    pub fn from_env() -> StoreResult<Option<Self>> {
        match StoreConfig::from_env() {
            Some(config) => Ok(Some(Self::new(config)?)),
            None => {
                debug!("SUPABASE_URL/SUPABASE_SERVICE_KEY not set, store disabled");
                Ok(None)
            }
        }
    }

    fn table_url(&self, table: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/{}", self.base_url, table)
        } else {
            format!("{}/{}?{}", self.base_url, table, query)
        }
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
    }

    // =========================================================================
    // Table operations
    // =========================================================================

    /// Select rows matching a PostgREST filter query.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> StoreResult<Vec<T>> {
        let url = self.table_url(table, query);

        self.execute_request("select", table, async {
            let response = self.request(Method::GET, &url).send().await?;
            let status = response.status();

            match status {
                StatusCode::OK => Ok(response.json().await?),
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await
    }

    /// Insert one row, returning the stored representation.
    pub async fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        row: &T,
    ) -> StoreResult<R> {
        let url = self.table_url(table, "");

        self.execute_request("insert", table, async {
            let response = self
                .request(Method::POST, &url)
                .header("Prefer", "return=representation")
                .json(row)
                .send()
                .await?;
            let status = response.status();

            match status {
                StatusCode::OK | StatusCode::CREATED => {
                    // PostgREST returns an array even for single-row inserts
                    let mut rows: Vec<R> = response.json().await?;
                    rows.pop().ok_or_else(|| {
                        StoreError::InvalidResponse(format!("{table}: empty insert representation"))
                    })
                }
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await
    }

    /// Insert one row without asking for the representation back.
    pub async fn insert_only<T: Serialize>(&self, table: &str, row: &T) -> StoreResult<()> {
        let url = self.table_url(table, "");

        self.execute_request("insert", table, async {
            let response = self.request(Method::POST, &url).json(row).send().await?;
            let status = response.status();

            match status {
                StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(()),
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await
    }

    /// Patch rows matching a filter query, returning the updated rows.
    pub async fn update<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
        patch: &T,
    ) -> StoreResult<Vec<R>> {
        let url = self.table_url(table, query);

        self.execute_request("update", table, async {
            let response = self
                .request(Method::PATCH, &url)
                .header("Prefer", "return=representation")
                .json(patch)
                .send()
                .await?;
            let status = response.status();

            match status {
                StatusCode::OK => Ok(response.json().await?),
                StatusCode::NO_CONTENT => Ok(Vec::new()),
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await
    }

    /// Delete rows matching a filter query, returning how many were removed.
    pub async fn delete(&self, table: &str, query: &str) -> StoreResult<usize> {
        let url = self.table_url(table, query);

        self.execute_request("delete", table, async {
            let response = self
                .request(Method::DELETE, &url)
                .header("Prefer", "return=representation")
                .send()
                .await?;
            let status = response.status();

            match status {
                StatusCode::OK => {
                    let rows: Vec<serde_json::Value> = response.json().await?;
                    Ok(rows.len())
                }
                StatusCode::NO_CONTENT => Ok(0),
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Execute a request with tracing and metrics.
    async fn execute_request<T, F>(&self, operation: &str, table: &str, fut: F) -> StoreResult<T>
    where
        F: std::future::Future<Output = StoreResult<T>>,
    {
        let span = info_span!("store_request", operation = %operation, table = %table);

        let start = Instant::now();
        let result = fut.instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(StoreError::NotFound(_)) => 404,
            Err(_) => 500,
        };
        record_request(operation, status, latency_ms);

        result
    }

    async fn handle_error_response(
        status: StatusCode,
        url: &str,
        response: reqwest::Response,
    ) -> StoreError {
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => StoreError::not_found(url.to_string()),
            _ => StoreError::request_failed(format!("{} failed ({}): {}", url, status, body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_trims_trailing_slash() {
        let config = StoreConfig {
            base_url: "https://abc.supabase.co".to_string(),
            service_key: "key".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        };
        let client = SupabaseClient::new(config).unwrap();
        assert_eq!(
            client.table_url("projects", "id=eq.1"),
            "https://abc.supabase.co/rest/v1/projects?id=eq.1"
        );
        assert_eq!(
            client.table_url("projects", ""),
            "https://abc.supabase.co/rest/v1/projects"
        );
    }
}
