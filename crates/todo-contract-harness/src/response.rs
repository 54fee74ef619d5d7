// crates/todo-contract-harness/src/response.rs
// ============================================================================
// Module: API Response
// Description: Fully buffered HTTP response captured by the harness.
// Purpose: Give expectations and fixtures uniform access to status, headers, body.
// Dependencies: reqwest, serde_json
// ============================================================================

use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::HarnessError;
use crate::error::HarnessResult;

/// Bytes of body kept in error messages.
const BODY_EXCERPT_LIMIT: usize = 200;

/// Buffered response to one harness request.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    method: Method,
    url: String,
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    /// Wraps already-received response parts.
    #[must_use]
    pub fn new(
        method: Method,
        url: String,
        status: StatusCode,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Self {
        Self {
            method,
            url,
            status,
            headers,
            body,
        }
    }

    /// Request method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value when present and valid ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, lossy.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::MalformedBody`] when the body is empty or not JSON.
    pub fn json(&self) -> HarnessResult<Value> {
        serde_json::from_slice(&self.body).map_err(|err| HarnessError::MalformedBody {
            method: self.method.to_string(),
            url: self.url.clone(),
            reason: err.to_string(),
        })
    }

    /// Returns `METHOD url` for error contexts.
    #[must_use]
    pub fn context(&self) -> String {
        format!("{} {}", self.method, self.url)
    }

    /// Returns the leading part of the body for diagnostics.
    #[must_use]
    pub fn body_excerpt(&self) -> String {
        let text = self.text();
        if text.len() <= BODY_EXCERPT_LIMIT {
            return text;
        }
        let mut cut = BODY_EXCERPT_LIMIT;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &text[..cut])
    }

    /// Fails unless the status is one of `accepted`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::UnexpectedStatus`] on mismatch.
    pub fn require_status(&self, accepted: &[u16]) -> HarnessResult<()> {
        if accepted.contains(&self.status.as_u16()) {
            return Ok(());
        }
        Err(HarnessError::UnexpectedStatus {
            method: self.method.to_string(),
            url: self.url.clone(),
            expected: render_statuses(accepted),
            actual: self.status.as_u16(),
            body_excerpt: self.body_excerpt(),
        })
    }
}

/// Renders `[200, 204]` as `200 or 204`.
fn render_statuses(accepted: &[u16]) -> String {
    accepted.iter().map(u16::to_string).collect::<Vec<_>>().join(" or ")
}
