//! IBGE localidades client module.
//!
//! Fetches state and district data from the IBGE REST API and returns the
//! response text untouched.
//!
//! # Architecture
//!
//! - [`ConsultaIbge`] - Builds endpoint URLs and reads one response per call
//! - [`ConnectionOpener`] - Trait for opening a connection to a URL
//! - [`HttpConnectionOpener`] - Real HTTP implementation using reqwest
//! - [`mock::MockConnectionOpener`] - Canned connections for unit tests (behind `test-utils` feature)
//!
//! # Testing Patterns
//!
//! ## Unit Tests (Mock Opener)
//!
//! ```ignore
//! use consulta_ibge::consulta::{distrito_url, mock::MockConnectionOpener, ConsultaIbge};
//! use std::sync::Arc;
//!
//! let mock = Arc::new(MockConnectionOpener::new());
//! mock.set_body(&distrito_url(520005005), r#"{"id":520005005,"nome":"Abadia de Goiás"}"#);
//!
//! let client = ConsultaIbge::with_opener(Arc::clone(&mock));
//! let body = client.consultar_distrito(520005005).await?;
//! ```
//!
//! ## Integration Tests (HTTP Stubbing)
//!
//! Integration tests point a real `HttpConnectionOpener` at a wiremock server
//! by rewriting [`IBGE_ORIGIN`] in the requested URL (see `tests/common`).

mod client;
mod connection;

pub use client::{
    distrito_url, estado_url, ConsultaError, ConsultaIbge, DISTRITOS_API_URL, ESTADOS_API_URL,
    IBGE_ORIGIN,
};
pub use connection::{Connection, ConnectionOpener, HttpConnectionOpener};

#[cfg(any(test, feature = "test-utils"))]
pub use connection::mock;
