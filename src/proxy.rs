//! `/api/*` forwarding to the college REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only ever talks to this origin. Requests under `/api` are
//! replayed against the configured upstream with the prefix removed, and the
//! upstream's status, content type and body are relayed unchanged. No session
//! state lives here; the upstream enforces authorization on every call.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

pub const API_PREFIX: &str = "/api";

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Request headers replayed upstream. Everything else (cookies, host,
/// hop-by-hop headers) stays at this hop.
pub const FORWARDED_HEADERS: [HeaderName; 3] = [AUTHORIZATION, CONTENT_TYPE, ACCEPT];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("http client build failed: {0}")]
    HttpClientBuild(String),
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_GATEWAY, "College API unavailable").into_response()
    }
}

/// Shared forwarding state: one pooled HTTP client for every request.
#[derive(Clone)]
pub struct ProxyState {
    http: reqwest::Client,
    upstream: Arc<str>,
}

impl ProxyState {
    /// # Errors
    ///
    /// Returns [`ProxyError::HttpClientBuild`] if the TLS backend cannot start.
    pub fn new(upstream: &str) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProxyError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, upstream: Arc::from(upstream.trim_end_matches('/')) })
    }

    pub fn upstream(&self) -> &str {
        &self.upstream
    }
}

/// Upstream URL for an incoming `/api/...` URI, query string included.
pub fn upstream_url(upstream: &str, uri: &Uri) -> String {
    let path = uri.path();
    let rest = path.strip_prefix(API_PREFIX).unwrap_or(path);
    let rest = if rest.is_empty() { "/" } else { rest };
    match uri.query() {
        Some(query) => format!("{upstream}{rest}?{query}"),
        None => format!("{upstream}{rest}"),
    }
}

/// The subset of `headers` listed in [`FORWARDED_HEADERS`].
pub fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in &FORWARDED_HEADERS {
        for value in headers.get_all(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// Axum handler for `/api/{*path}`.
pub async fn forward(
    State(state): State<ProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let url = upstream_url(state.upstream(), &uri);
    match relay(&state, method.clone(), &url, forwarded_headers(&headers), body).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, %method, %url, "api forward failed");
            e.into_response()
        }
    }
}

async fn relay(
    state: &ProxyState,
    method: Method,
    url: &str,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let upstream = state.http.request(method, url).headers(headers).body(body).send().await?;
    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    let bytes = upstream.bytes().await?;
    tracing::debug!(status = status.as_u16(), %url, "api forwarded");

    let mut response = (status, bytes).into_response();
    match content_type {
        Some(value) => {
            response.headers_mut().insert(CONTENT_TYPE, value);
        }
        None => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }
    Ok(response)
}
