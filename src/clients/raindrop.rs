use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value as JsonValue};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::core::error::ApiError;
use crate::core::tool::ApiExecutor;
use crate::domain::ApiRequest;
use crate::infra::config::RaindropConfig;
use crate::infra::logging::log_metric;
use crate::infra::runtime::http_client::make_http_client;

pub const DEFAULT_BASE_URL: &str = "https://api.raindrop.io/rest/v1";

const USER_AGENT: &str = concat!("raindrop-mcp-server/", env!("CARGO_PKG_VERSION"));

static NEXT_CALL: AtomicU64 = AtomicU64::new(1);

/// Correlation id for one outbound call: process id plus a per-process sequence number.
fn next_request_id() -> String {
    format!("rd-{}-{}", std::process::id(), NEXT_CALL.fetch_add(1, Ordering::Relaxed))
}

/// Raindrop REST client. One request per call, bearer-token auth.
#[derive(Clone)]
pub struct RaindropRemote {
    base: String,
    token: String,
    http: Client,
}

impl RaindropRemote {
    pub fn new(base: impl Into<String>, token: impl Into<String>) -> Self {
        Self { base: base.into(), token: token.into(), http: make_http_client() }
    }

    pub fn from_config(cfg: &RaindropConfig) -> Self {
        Self::new(cfg.base_url.clone(), cfg.token.clone())
    }

    /// Full URL for a request: base (trailing `/` trimmed), path, form-encoded query.
    fn url(&self, req: &ApiRequest) -> Result<String, ApiError> {
        let target = req.path_and_query().map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(format!("{}{}", self.base.trim_end_matches('/'), target))
    }

    /// Auth, correlation id and user agent for every call.
    fn decorate(&self, builder: RequestBuilder, request_id: &str) -> RequestBuilder {
        builder
            .bearer_auth(&self.token)
            .header("x-request-id", request_id)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
    }

    pub async fn send(&self, req: &ApiRequest) -> Result<JsonValue, ApiError> {
        let url = self.url(req)?;
        let rid = next_request_id();
        tracing::debug!(method = %req.method, endpoint = %url, request_id = %rid, "raindrop request");

        let mut builder = self.decorate(self.http.request(req.method.clone(), url), &rid);
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let res = self.finish(builder).await;
        let elapsed_ms = start.elapsed().as_millis() as f64;
        metrics::histogram!("raindrop_remote_latency_ms").record(elapsed_ms);
        log_metric("raindrop.api", "remote_latency_ms", elapsed_ms);
        if let Err(e) = &res {
            tracing::debug!(request_id = %rid, error = %e, "raindrop request failed");
            log_metric("raindrop.api", "remote_error_total", 1.0);
        }
        res
    }

    async fn finish(&self, builder: RequestBuilder) -> Result<JsonValue, ApiError> {
        let resp = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), body });
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(json!({ "success": true }));
        }
        resp.json::<JsonValue>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ApiExecutor for RaindropRemote {
    async fn execute(&self, request: &ApiRequest) -> Result<JsonValue, ApiError> {
        self.send(request).await
    }
}
