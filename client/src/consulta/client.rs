//! IBGE localidades client returning raw response text.
//!
//! [`ConsultaIbge`] builds the endpoint URL for a state code or district id,
//! opens one connection through its [`ConnectionOpener`], and hands back the
//! body exactly as the service sent it.
//!
//! # Example
//!
//! ```ignore
//! use consulta_ibge::consulta::ConsultaIbge;
//!
//! let client = ConsultaIbge::new();
//! let estado = client.consultar_estado("SP").await?;
//! let distrito = client.consultar_distrito(520_005_005).await?;
//! ```

use thiserror::Error;

use super::connection::{ConnectionOpener, HttpConnectionOpener};
use crate::config::HttpConfig;

/// Origin of the IBGE data service.
pub const IBGE_ORIGIN: &str = "https://servicodados.ibge.gov.br";

/// Base URL of the states resource. The UF code is appended as one
/// percent-encoded path segment.
pub const ESTADOS_API_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades/estados/";

/// Base URL of the districts resource. The district id is appended in decimal.
pub const DISTRITOS_API_URL: &str =
    "https://servicodados.ibge.gov.br/api/v1/localidades/distritos/";

/// Errors that can occur when querying the IBGE API.
#[derive(Debug, Error)]
pub enum ConsultaError {
    /// Connection, timeout or body read failure on the HTTP transport
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Connection or stream failure reported by a non-HTTP opener
    #[error("connection I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The service answered with a non-success status
    #[error("IBGE API error: {status} - {body}")]
    Status { status: u16, body: String },

    /// The code is a `.` or `..` path segment, which URL normalization would
    /// resolve to a different resource
    #[error("UF code cannot be sent as a path segment: {0:?}")]
    UnroutableCode(String),
}

impl ConsultaError {
    /// Whether the failure happened before a complete response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Io(_))
    }
}

/// Full URL for a state lookup.
///
/// Every byte outside the unreserved set is percent-encoded, so `/`, `?`,
/// `#`, `%` and spaces reach the service as part of the code.
#[must_use]
pub fn estado_url(uf: &str) -> String {
    format!("{ESTADOS_API_URL}{}", urlencoding::encode(uf))
}

/// `.` and `..` are dot segments even when percent-encoded, so no URL can
/// carry them literally.
fn is_dot_segment(uf: &str) -> bool {
    uf == "." || uf == ".."
}

/// Full URL for a district lookup.
#[must_use]
pub fn distrito_url(distrito_id: u32) -> String {
    format!("{DISTRITOS_API_URL}{distrito_id}")
}

/// Client for the IBGE localidades endpoints.
///
/// Holds nothing but its opener, so every call is independent of the
/// previous ones. Use [`ConsultaIbge::new`] for real HTTP calls, or
/// [`ConsultaIbge::with_opener`] to route connections elsewhere.
#[derive(Debug, Clone)]
pub struct ConsultaIbge<O = HttpConnectionOpener> {
    opener: O,
}

impl ConsultaIbge {
    /// Create a client backed by a default reqwest transport.
    #[must_use]
    pub fn new() -> Self {
        Self::with_opener(HttpConnectionOpener::new())
    }

    /// Create a client whose transport is built from configuration.
    ///
    /// # Errors
    /// Returns `ConsultaError::Transport` if the HTTP client cannot be built.
    pub fn from_config(config: &HttpConfig) -> Result<Self, ConsultaError> {
        Ok(Self::with_opener(HttpConnectionOpener::from_config(config)?))
    }
}

impl Default for ConsultaIbge {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ConnectionOpener> ConsultaIbge<O> {
    /// Create a client that opens connections through `opener`.
    pub const fn with_opener(opener: O) -> Self {
        Self { opener }
    }

    /// Fetch the raw JSON for a state by its UF code (e.g. "SP").
    ///
    /// The code is not validated. Unknown codes come back as whatever the
    /// service returns for them, typically `[]`.
    ///
    /// # Errors
    /// Returns a transport error if the connection fails or the body cannot
    /// be read, `ConsultaError::Status` for a non-success status, and
    /// `ConsultaError::UnroutableCode` for `.` or `..` (nothing is sent).
    pub async fn consultar_estado(&self, uf: &str) -> Result<String, ConsultaError> {
        if is_dot_segment(uf) {
            return Err(ConsultaError::UnroutableCode(uf.to_string()));
        }
        self.fetch(&estado_url(uf)).await
    }

    /// Fetch the raw JSON for a district by its numeric id.
    ///
    /// # Errors
    /// Returns a transport error if the connection fails or the body cannot
    /// be read, and `ConsultaError::Status` for a non-success status.
    pub async fn consultar_distrito(&self, distrito_id: u32) -> Result<String, ConsultaError> {
        self.fetch(&distrito_url(distrito_id)).await
    }

    async fn fetch(&self, url: &str) -> Result<String, ConsultaError> {
        tracing::debug!(url, "opening connection");
        let connection = self.opener.open(url).await?;
        let status = connection.status();

        if !status.is_success() {
            let body = connection.read_body().await.unwrap_or_default();
            tracing::warn!(url, status = status.as_u16(), "IBGE API returned error status");
            return Err(ConsultaError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = connection.read_body().await?;
        tracing::debug!(url, bytes = body.len(), "response body read");
        Ok(body)
    }
}
