#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

//! Client for the IBGE localidades API.
//!
//! Queries a state by UF code or a district by id and returns the JSON text
//! exactly as the service sent it.
//!
//! The query methods are `async` and built on reqwest's tokio-based client.
//! Each call sends one request and awaits its body with no internal
//! concurrency. Callers outside an async runtime must supply their own
//! executor, for example by building a tokio runtime and calling `block_on`:
//!
//! ```ignore
//! let runtime = tokio::runtime::Runtime::new()?;
//! let estado = runtime.block_on(ConsultaIbge::new().consultar_estado("SP"))?;
//! ```

pub mod config;
pub mod consulta;
pub mod logging;

pub use consulta::{ConsultaError, ConsultaIbge};
