//! Connection seam between [`ConsultaIbge`](super::ConsultaIbge) and the network.
//!
//! A [`ConnectionOpener`] turns a full URL into an open [`Connection`]. The
//! connection is owned and consumed by [`Connection::read_body`], so whatever
//! it holds is released as soon as the body is read or the connection is
//! dropped on an error path.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::client::ConsultaError;
use crate::config::HttpConfig;

/// An open connection whose headers have arrived and whose body is unread.
#[async_trait]
pub trait Connection: Send {
    /// Response status.
    fn status(&self) -> StatusCode;

    /// Read the entire body as text, consuming the connection.
    ///
    /// Bodies that are not valid UTF-8 fail with `io::ErrorKind::InvalidData`
    /// instead of being decoded lossily.
    async fn read_body(self: Box<Self>) -> Result<String, ConsultaError>;
}

/// Opens connections for a URL.
///
/// Use `HttpConnectionOpener` for real HTTP calls, or substitute another
/// implementation to keep requests off the network.
#[async_trait]
pub trait ConnectionOpener: Send + Sync {
    /// Issue a GET for `url` and return the connection once headers arrive.
    async fn open(&self, url: &str) -> Result<Box<dyn Connection>, ConsultaError>;
}

#[async_trait]
impl<T: ConnectionOpener + ?Sized> ConnectionOpener for Arc<T> {
    async fn open(&self, url: &str) -> Result<Box<dyn Connection>, ConsultaError> {
        (**self).open(url).await
    }
}

/// reqwest-backed opener used in production.
#[derive(Debug, Clone)]
pub struct HttpConnectionOpener {
    client: reqwest::Client,
}

impl HttpConnectionOpener {
    /// Create an opener with reqwest's default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create an opener with a custom `reqwest::Client` (for testing with custom config).
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build the underlying client from configuration.
    ///
    /// # Errors
    /// Returns `ConsultaError::Transport` if reqwest rejects the settings.
    pub fn from_config(config: &HttpConfig) -> Result<Self, ConsultaError> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        Ok(Self::with_client(builder.build()?))
    }
}

impl Default for HttpConnectionOpener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionOpener for HttpConnectionOpener {
    async fn open(&self, url: &str) -> Result<Box<dyn Connection>, ConsultaError> {
        let response = self.client.get(url).send().await?;
        Ok(Box::new(HttpConnection { response }))
    }
}

struct HttpConnection {
    response: reqwest::Response,
}

#[async_trait]
impl Connection for HttpConnection {
    fn status(&self) -> StatusCode {
        self.response.status()
    }

    async fn read_body(self: Box<Self>) -> Result<String, ConsultaError> {
        let bytes = self.response.bytes().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{Connection, ConnectionOpener, ConsultaError};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    enum Canned {
        Response { status: StatusCode, body: String },
        ConnectError(io::ErrorKind),
        ReadError,
    }

    /// Mock implementation of `ConnectionOpener` for unit tests.
    ///
    /// Configure responses per URL with the `set_*` methods (or a fallback
    /// with `respond_to_any`) and verify calls with `calls()`. URLs with no
    /// canned response fail to connect with `NotFound`.
    #[derive(Debug, Default)]
    pub struct MockConnectionOpener {
        responses: Mutex<HashMap<String, Canned>>,
        fallback: Mutex<Option<Canned>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockConnectionOpener {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer `url` with status 200 and `body`.
        pub fn set_body(&self, url: &str, body: &str) {
            self.set_response(url, StatusCode::OK, body);
        }

        /// Answer `url` with the given status and body.
        pub fn set_response(&self, url: &str, status: StatusCode, body: &str) {
            self.insert(
                url,
                Canned::Response {
                    status,
                    body: body.to_string(),
                },
            );
        }

        /// Fail to open `url` with an I/O error of `kind`.
        pub fn set_connect_error(&self, url: &str, kind: io::ErrorKind) {
            self.insert(url, Canned::ConnectError(kind));
        }

        /// Open `url` with status 200 but fail while reading the body.
        pub fn set_read_error(&self, url: &str) {
            self.insert(url, Canned::ReadError);
        }

        /// Answer every URL without a specific response with status 200 and `body`.
        pub fn respond_to_any(&self, body: &str) {
            *self.fallback.lock().unwrap() = Some(Canned::Response {
                status: StatusCode::OK,
                body: body.to_string(),
            });
        }

        /// Get all URLs passed to `open`, in call order.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn insert(&self, url: &str, canned: Canned) {
            self.responses
                .lock()
                .unwrap()
                .insert(url.to_string(), canned);
        }
    }

    #[async_trait]
    impl ConnectionOpener for MockConnectionOpener {
        async fn open(&self, url: &str) -> Result<Box<dyn Connection>, ConsultaError> {
            self.calls.lock().unwrap().push(url.to_string());

            let canned = self
                .responses
                .lock()
                .unwrap()
                .get(url)
                .cloned()
                .or_else(|| self.fallback.lock().unwrap().clone());

            match canned {
                Some(Canned::Response { status, body }) => Ok(Box::new(MockConnection {
                    status,
                    body: Ok(body),
                })),
                Some(Canned::ReadError) => Ok(Box::new(MockConnection {
                    status: StatusCode::OK,
                    body: Err(io::ErrorKind::UnexpectedEof),
                })),
                Some(Canned::ConnectError(kind)) => {
                    Err(io::Error::new(kind, format!("mock connect failure for {url}")).into())
                }
                None => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no mock response for {url}"),
                )
                .into()),
            }
        }
    }

    /// Connection handed out by `MockConnectionOpener`.
    #[derive(Debug)]
    pub struct MockConnection {
        status: StatusCode,
        body: Result<String, io::ErrorKind>,
    }

    #[async_trait]
    impl Connection for MockConnection {
        fn status(&self) -> StatusCode {
            self.status
        }

        async fn read_body(self: Box<Self>) -> Result<String, ConsultaError> {
            self.body
                .map_err(|kind| io::Error::new(kind, "mock stream read failure").into())
        }
    }
}
