//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! This module provides a thin wrapper around `wiremock` for declarative
//! HTTP stubbing. Use it to mock IBGE API responses in integration tests.
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)` or `.respond_with_body(string)`
//! - **Error response**: `.respond_with_status(500)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(30))`
//! - **Request verification**: `.expect_times(1)` to assert call count

use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wrapper around a running wiremock server.
pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the server, without a trailing slash.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Access the underlying wiremock server for custom matchers.
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Start stubbing a GET for `route`.
    pub fn expect_get(&self, route: &str) -> StubBuilder<'_> {
        StubBuilder {
            server: &self.server,
            route: route.to_string(),
            status: 200,
            body: None,
            delay: None,
            times: None,
        }
    }

    /// Panic if any mounted `expect_times` expectation was not met.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    /// Paths of every request the server has received, in order.
    pub async fn received_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|request| request.url.path().to_string())
            .collect()
    }
}

enum StubBody {
    Text(String),
    Json(Value),
}

/// Builder for a single GET stub.
pub struct StubBuilder<'a> {
    server: &'a MockServer,
    route: String,
    status: u16,
    body: Option<StubBody>,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl StubBuilder<'_> {
    pub fn respond_with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(StubBody::Text(body.into()));
        self
    }

    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.body = Some(StubBody::Json(body));
        self
    }

    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut template = ResponseTemplate::new(self.status);
        template = match self.body {
            Some(StubBody::Text(text)) => {
                template.set_body_raw(text.into_bytes(), "application/json;charset=UTF-8")
            }
            Some(StubBody::Json(value)) => template.set_body_json(value),
            None => template,
        };
        if let Some(delay) = self.delay {
            template = template.set_delay(delay);
        }

        let mut mock = Mock::given(method("GET"))
            .and(path(self.route.as_str()))
            .respond_with(template);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }

        mock.mount(self.server).await;
    }
}
