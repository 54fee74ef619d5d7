// crates/todo-contract-harness/src/client.rs
// ============================================================================
// Module: API HTTP Client
// Description: Blocking HTTP client for the Todo Manager API.
// Purpose: Issue one request at a time, buffer responses, record transcripts.
// Dependencies: reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! [`ApiClient`] sends exactly one request per call with no retries. Every
//! exchange is appended to a shared transcript and emitted to the audit sink,
//! whether it produced a response or a transport error.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use reqwest::Method;
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::audit::ExchangeAuditEvent;
use crate::audit::ExchangeOutcome;
use crate::audit::HarnessAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::now_millis;
use crate::error::HarnessError;
use crate::error::HarnessResult;
use crate::response::ApiResponse;

/// One recorded request/response pair.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// 1-based position in the transcript.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Request URL.
    pub url: String,
    /// JSON request body, if any.
    pub request: Option<Value>,
    /// Response status, if a response arrived.
    pub status: Option<u16>,
    /// Response body as JSON, or as a string when not JSON.
    pub response: Value,
    /// Transport error message, if any.
    pub error: Option<String>,
}

/// Blocking client bound to one server base URL.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
    audit: Arc<dyn HarnessAuditSink>,
}

impl ApiClient {
    /// Creates a client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ClientBuild`] when the TLS backend cannot initialize.
    pub fn new(base_url: Url, timeout: Duration) -> HarnessResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(HarnessError::ClientBuild)?;
        Ok(Self::new_with_client(base_url, client))
    }

    /// Creates a client from an existing reqwest client.
    #[must_use]
    pub fn new_with_client(base_url: Url, client: Client) -> Self {
        Self {
            base_url,
            client,
            transcript: Arc::new(Mutex::new(Vec::new())),
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Routes exchange events to `sink`.
    #[must_use]
    pub fn with_audit_sink(mut self, sink: Arc<dyn HarnessAuditSink>) -> Self {
        self.audit = sink;
        self
    }

    /// Returns the server base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the audit sink shared with this client.
    #[must_use]
    pub fn audit(&self) -> &Arc<dyn HarnessAuditSink> {
        &self.audit
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Resolves `path` (which may carry a query) against the base URL,
    /// preserving any path prefix on the base.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        if path.is_empty() || path == "/" {
            return format!("{base}/");
        }
        if path.starts_with('/') { format!("{base}{path}") } else { format!("{base}/{path}") }
    }

    /// Sends a request and buffers the whole response.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Transport`] when no response arrives (refused
    /// connection, timeout, reset).
    pub fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> HarnessResult<ApiResponse> {
        let url = self.url_for(path);
        let request_bytes = body.map_or(0, |value| value.to_string().len());
        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let started = Instant::now();
        let result = request.send().and_then(|response| {
            let status = response.status();
            let headers = response.headers().clone();
            response.bytes().map(|bytes| (status, headers, bytes.to_vec()))
        });
        let duration_ms = started.elapsed().as_millis();
        match result {
            Ok((status, headers, bytes)) => {
                let response = ApiResponse::new(method, url, status, headers, bytes);
                self.record(&response, body, request_bytes, duration_ms);
                Ok(response)
            }
            Err(err) => {
                self.record_failure(&method, &url, body, request_bytes, duration_ms, &err);
                Err(HarnessError::Transport {
                    method: method.to_string(),
                    url,
                    source: err,
                })
            }
        }
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub fn get(&self, path: &str) -> HarnessResult<ApiResponse> {
        self.send(Method::GET, path, None)
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub fn post(&self, path: &str, body: &Value) -> HarnessResult<ApiResponse> {
        self.send(Method::POST, path, Some(body))
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub fn put(&self, path: &str, body: &Value) -> HarnessResult<ApiResponse> {
        self.send(Method::PUT, path, Some(body))
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub fn delete(&self, path: &str) -> HarnessResult<ApiResponse> {
        self.send(Method::DELETE, path, None)
    }

    /// Records a completed exchange.
    fn record(
        &self,
        response: &ApiResponse,
        body: Option<&Value>,
        request_bytes: usize,
        duration_ms: u128,
    ) {
        self.audit.record_exchange(&ExchangeAuditEvent {
            event: "http_exchange",
            timestamp_ms: now_millis(),
            method: response.method().to_string(),
            url: response.url().to_string(),
            status: Some(response.status().as_u16()),
            outcome: ExchangeOutcome::Response,
            request_bytes,
            response_bytes: response.body().len(),
            duration_ms,
            error: None,
        });
        let payload = response.json().unwrap_or_else(|_| Value::String(response.text()));
        self.push_transcript(
            response.method().as_str(),
            response.url(),
            body,
            Some(response.status().as_u16()),
            payload,
            None,
        );
    }

    /// Records an exchange that produced no response.
    fn record_failure(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        request_bytes: usize,
        duration_ms: u128,
        err: &reqwest::Error,
    ) {
        self.audit.record_exchange(&ExchangeAuditEvent {
            event: "http_exchange",
            timestamp_ms: now_millis(),
            method: method.to_string(),
            url: url.to_string(),
            status: None,
            outcome: ExchangeOutcome::TransportError,
            request_bytes,
            response_bytes: 0,
            duration_ms,
            error: Some(err.to_string()),
        });
        self.push_transcript(method.as_str(), url, body, None, Value::Null, Some(err.to_string()));
    }

    /// Appends to the shared transcript.
    fn push_transcript(
        &self,
        method: &str,
        url: &str,
        request: Option<&Value>,
        status: Option<u16>,
        response: Value,
        error: Option<String>,
    ) {
        let Ok(mut guard) = self.transcript.lock() else {
            return;
        };
        let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(TranscriptEntry {
            sequence,
            method: method.to_string(),
            url: url.to_string(),
            request: request.cloned(),
            status,
            response,
            error,
        });
    }
}
