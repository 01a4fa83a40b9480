//! HTTP backend abstraction for the dashboard API.
//!
//! The backend only moves bytes and reports the status code; interpreting
//! statuses (404, 408, validation errors) is the client's job. The
//! production implementation uses reqwest with retries for idempotent reads.


use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::{DashboardClientConfig, RetryPolicy};
use crate::error::{HttpError, HttpResult};

/// HTTP methods used by the dashboard API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Only reads are safe to retry.
    pub const fn is_idempotent_read(self) -> bool {
        matches!(self, Self::Get)
    }
}

/// A request to send.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub const fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
        }
    }

    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A response with any status code.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed JSON body; a non-JSON body is kept as a string value.
    pub body: Option<Value>,
}

impl HttpResponse {
    pub const fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends.
///
/// Returns `Err` only when no HTTP status was obtained at all.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn send(&self, request: HttpRequest) -> HttpResult<HttpResponse>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// GET requests are retried with exponential backoff on network errors and
/// 5xx responses. 408 is returned as-is: it is the backend's health-probe
/// timeout signal, not a transient transport failure.
pub struct ReqwestBackend {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &DashboardClientConfig) -> HttpResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(ref cookie) = config.session {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| HttpError::InvalidHeader(e.to_string()))?;
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            retry: config.retry,
        })
    }

    fn build_request(&self, request: &HttpRequest) -> reqwest::RequestBuilder {
        let url = request.url.as_str();
        let builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };
        match request.body {
            Some(ref body) => builder.json(body),
            None => builder,
        }
    }

    async fn read_response(response: reqwest::Response) -> HttpResult<HttpResponse> {
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        };
        Ok(HttpResponse::new(status, body))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: HttpRequest) -> HttpResult<HttpResponse> {
        let max_retries = self.retry.retries_for(request.method);
        let mut attempt: u8 = 0;

        loop {
            if attempt > 0 {
                tokio::time::sleep(self.retry.delay_before(attempt)).await;
            }

            match self.build_request(&request).send().await {
                // 5xx errors are retryable (server-side issues)
                Ok(response) if response.status().is_server_error() && attempt < max_retries => {
                    debug!(
                        url = %request.url,
                        status = response.status().as_u16(),
                        attempt,
                        "Retrying after server error"
                    );
                }
                Ok(response) => return Self::read_response(response).await,
                Err(e) if attempt < max_retries && !e.is_builder() => {
                    debug!(url = %request.url, attempt, error = %e, "Retrying after network error");
                }
                Err(e) => return Err(e.into()),
            }

            attempt += 1;
        }
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// A fake HTTP backend that returns canned responses and records requests.
    #[derive(Clone, Default)]
    pub struct FakeBackend {
        routes: Arc<Mutex<Vec<(HttpMethod, String, HttpResponse)>>>,
        requests: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Respond to requests whose method matches and whose path ends with
        /// `path_suffix`. Later routes take precedence.
        pub fn with_route(self, method: HttpMethod, path_suffix: &str, response: HttpResponse) -> Self {
            self.routes
                .lock()
                .unwrap()
                .push((method, path_suffix.to_string(), response));
            self
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn send(&self, request: HttpRequest) -> HttpResult<HttpResponse> {
            self.requests.lock().unwrap().push(request.clone());
            let routes = self.routes.lock().unwrap();
            let response = routes
                .iter()
                .rev()
                .find(|(method, suffix, _)| {
                    *method == request.method && request.url.path().ends_with(suffix.as_str())
                })
                .map_or_else(|| HttpResponse::new(404, None), |(_, _, r)| r.clone());
            Ok(response)
        }
    }
}
