//! Common test utilities for integration tests.
//!
//! This module provides:
//!
//! - [`http_mock::MockHttpServer`] - wiremock wrapper for stubbing the IBGE API
//! - [`RebasingOpener`] - real HTTP opener that sends IBGE URLs to a local server
//! - [`fixtures`] - payloads captured from the live service
//!
//! # Usage
//!
//! ```ignore
//! use crate::common::{http_mock::MockHttpServer, RebasingOpener};
//!
//! #[tokio::test]
//! async fn test_against_stub() {
//!     let server = MockHttpServer::start().await;
//!     server.expect_get("/api/v1/localidades/estados/SP").respond_with_body("[]").mount().await;
//!
//!     let client = ConsultaIbge::with_opener(RebasingOpener::new(server.url()));
//!     // ...
//! }
//! ```

#![allow(dead_code)]

pub mod http_mock;

use async_trait::async_trait;
use consulta_ibge::consulta::{
    Connection, ConnectionOpener, ConsultaError, HttpConnectionOpener, IBGE_ORIGIN,
};

/// Opener that swaps the IBGE origin for `base_url` and then uses real HTTP.
pub struct RebasingOpener {
    base_url: String,
    inner: HttpConnectionOpener,
}

impl RebasingOpener {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_opener(base_url, HttpConnectionOpener::new())
    }

    pub fn with_opener(base_url: impl Into<String>, inner: HttpConnectionOpener) -> Self {
        Self {
            base_url: base_url.into(),
            inner,
        }
    }
}

#[async_trait]
impl ConnectionOpener for RebasingOpener {
    async fn open(&self, url: &str) -> Result<Box<dyn Connection>, ConsultaError> {
        let rebased = url.replacen(IBGE_ORIGIN, &self.base_url, 1);
        self.inner.open(&rebased).await
    }
}

pub mod fixtures {
    /// Known district: Abadia de Goiás (GO).
    pub const DISTRITO_ID: u32 = 520_005_005;

    pub const DISTRITO_PATH: &str = "/api/v1/localidades/distritos/520005005";

    /// District payload as returned by the live service.
    pub const DISTRITO_JSON: &str = "{\"id\":520005005,\"nome\":\"Abadia de Goiás\",\"municipio\":{\"id\":5200050,\"nome\":\"Abadia de Goiás\",\"microrregiao\":{\"id\":52010,\"nome\":\"Goiânia\",\"mesorregiao\":{\"id\":5203,\"nome\":\"Centro Goiano\",\"UF\":{\"id\":52,\"sigla\":\"GO\",\"nome\":\"Goiás\",\"regiao\":{\"id\":5,\"sigla\":\"CO\",\"nome\":\"Centro-Oeste\"}}}},\"regiao-imediata\":{\"id\":520001,\"nome\":\"Goiânia\",\"regiao-intermediaria\":{\"id\":5201,\"nome\":\"Goiânia\",\"UF\":{\"id\":52,\"sigla\":\"GO\",\"nome\":\"Goiás\",\"regiao\":{\"id\":5,\"sigla\":\"CO\",\"nome\":\"Centro-Oeste\"}}}}}}";

    pub const SP_PATH: &str = "/api/v1/localidades/estados/SP";

    pub const SP_JSON: &str = r#"{"id":35,"sigla":"SP","nome":"São Paulo","regiao":{"id":3,"sigla":"SE","nome":"Sudeste"}}"#;
}
