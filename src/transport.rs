//! HTTP transport over reqwest.

pub mod http;

pub use http::{HttpTransport, TransportConfig, TRACING_TARGET};
