//! 客户端模块：Intervene API 的类型化异步客户端。
//!
//! Typed client for the Intervene API.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod endpoint;

pub use self::builder::InterveneClientBuilder;
pub use self::core::{InterveneClient, TRACING_TARGET};
pub use self::endpoint::{render_path, Endpoint};
