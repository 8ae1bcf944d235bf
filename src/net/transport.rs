//! Raw HTTP transport seam.
//!
//! Client-side (hydrate): [`BrowserTransport`] issues real requests through
//! `gloo-net` with an abort-based timeout.
//! Everywhere else the [`Transport`] trait is implemented by test doubles, so
//! the session core never depends on a browser being present.
//!
//! DESIGN
//! ======
//! A transport only moves bytes: it never interprets status codes. Status
//! handling (bearer attachment, 401 invalidation, error mapping) lives in the
//! request gateway so every transport behaves identically.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const JSON_CONTENT_TYPE: &str = "application/json";

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Outbound request body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Body {
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` field list, in order.
    Form(Vec<(String, String)>),
    /// Pre-serialized JSON document.
    Json(String),
}

impl Body {
    #[must_use]
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Form(_) => Some(FORM_CONTENT_TYPE),
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
        }
    }

    /// Encode the body for the wire; `None` for an empty body.
    #[must_use]
    pub fn encode(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Form(fields) => Some(
                fields
                    .iter()
                    .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
                    .collect::<Vec<_>>()
                    .join("&"),
            ),
            Self::Json(raw) => Some(raw.clone()),
        }
    }
}

/// A request addressed by API path (the base URL is the transport's concern).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self { method, path: path.to_owned(), headers: Vec::new(), body: Body::Empty }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn post(path: &str, body: Body) -> Self {
        Self { body, ..Self::new(Method::Post, path) }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A received response; any status, including failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: &str) -> Self {
        Self { status, body: body.to_owned() }
    }

    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// =============================================================================
// TRANSPORT TRAIT
// =============================================================================

/// Moves one request to the server and returns whatever came back.
///
/// Futures are `?Send`: the browser runs a single-threaded event loop.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// Send a request.
    ///
    /// # Errors
    ///
    /// Returns a transport-level [`ApiError`] (`Network`, `Timeout`,
    /// `Request`) when no response was received. Non-2xx statuses are
    /// returned as `Ok`.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Join a base URL and an API path with exactly one separating slash.
#[must_use]
pub fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();
    if base.is_empty() {
        path.to_owned()
    } else {
        format!("{base}/{}", path.trim_start_matches('/'))
    }
}

// =============================================================================
// BROWSER TRANSPORT
// =============================================================================

/// `gloo-net` transport with an abort-signal timeout.
#[cfg(feature = "hydrate")]
#[derive(Clone, Debug)]
pub struct BrowserTransport {
    base_url: String,
    timeout_ms: u32,
}

#[cfg(feature = "hydrate")]
impl BrowserTransport {
    #[must_use]
    pub fn new(config: &crate::config::ClientConfig) -> Self {
        Self { base_url: config.api_base_url.clone(), timeout_ms: config.request_timeout_ms }
    }
}

#[cfg(feature = "hydrate")]
#[async_trait::async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        use gloo_net::http::RequestBuilder;
        use gloo_timers::callback::Timeout;
        use web_sys::AbortController;

        let url = build_url(&self.base_url, &request.path);
        let controller = AbortController::new()
            .map_err(|_| ApiError::Request("failed to initialize request timeout".to_owned()))?;
        let signal = controller.signal();
        let timeout_controller = controller.clone();
        let _timeout = Timeout::new(self.timeout_ms, move || timeout_controller.abort());

        let mut builder = RequestBuilder::new(&url)
            .method(gloo_method(request.method))
            .abort_signal(Some(&signal));
        if let Some(content_type) = request.body.content_type() {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let outgoing = match request.body.encode() {
            Some(payload) => builder.body(payload),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Request(e.to_string()))?;

        let response = outgoing.send().await.map_err(map_request_error)?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(ApiResponse { status, body })
    }
}

#[cfg(feature = "hydrate")]
fn gloo_method(method: Method) -> gloo_net::http::Method {
    match method {
        Method::Get => gloo_net::http::Method::GET,
        Method::Post => gloo_net::http::Method::POST,
        Method::Put => gloo_net::http::Method::PUT,
        Method::Patch => gloo_net::http::Method::PATCH,
        Method::Delete => gloo_net::http::Method::DELETE,
    }
}

#[cfg(feature = "hydrate")]
fn map_request_error(err: gloo_net::Error) -> ApiError {
    classify_request_error(&err.to_string())
}

/// Split a fetch failure message into timeout versus network failure.
#[cfg(any(test, feature = "hydrate"))]
fn classify_request_error(message: &str) -> ApiError {
    let lowered = message.to_lowercase();
    if lowered.contains("timeout") || lowered.contains("abort") {
        ApiError::Timeout(message.to_owned())
    } else {
        ApiError::Network(message.to_owned())
    }
}
