//! # intervene
//!
//! Intervene 文档解析 API 的类型化 Rust 客户端。
//!
//! Typed async client for the Intervene document-parsing API.
//!
//! ## Overview
//!
//! The client wraps the Intervene HTTP API behind typed methods. Each method
//! sends exactly one request to the configured host with the
//! `Authorization: Bearer <private key>` header set at construction, and
//! returns the decoded response. There is no retry, caching or built-in job
//! polling: submit a job, then call [`InterveneClient::job_status`] as often
//! as you need.
//!
//! ## Operations
//!
//! | Method | HTTP |
//! |--------|------|
//! | [`InterveneClient::identify`] | `POST /v1/parser/identify` |
//! | [`InterveneClient::execute`] | `POST /v1/parser/execute` |
//! | [`InterveneClient::job_status`] | `GET /v1/parser/{job_id}/status` |
//! | [`InterveneClient::identify_job_status`] | same, result checked and typed as identify |
//! | [`InterveneClient::execute_job_status`] | same, result checked and typed as execute |
//! | [`InterveneClient::destroy_connection`] | `DELETE /v1/integrations/{provider}/connections/{user_id}` |
//! | [`InterveneClient::generate_hmac_digest`] | `POST /v1/integrations/{provider}/connections/{user_id}/hmac_digest` |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use intervene::{ClientOptions, InterveneClient};
//! use intervene::types::ExecuteParams;
//!
//! #[tokio::main]
//! async fn main() -> intervene::Result<()> {
//!     let client = InterveneClient::new(ClientOptions::new("sk_live_..."))?;
//!
//!     let params = ExecuteParams::new()
//!         .with("parser_id", "prs_123")
//!         .with("data", serde_json::json!({"url": "https://example.com/invoice.pdf"}));
//!     let job = client.execute(&params).await?;
//!
//!     let status = client.execute_job_status(&job.job_id).await?;
//!     if let Some(result) = status.result {
//!         println!("{}", result.as_value());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder and endpoint catalogue |
//! | [`config`] | Client options and environment lookup |
//! | [`transport`] | reqwest-based HTTP transport |
//! | [`types`] | Request and response types |

pub mod client;
pub mod config;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{InterveneClient, InterveneClientBuilder};
pub use config::{ClientOptions, DEFAULT_HOST};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
