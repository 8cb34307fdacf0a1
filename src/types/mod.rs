//! 类型模块：Intervene API 的请求与响应类型。
//!
//! # Types Module
//!
//! Request bodies are open JSON objects forwarded verbatim. Responses keep the
//! fields this crate does not model in an `extra` map (or wrap the raw JSON),
//! so nothing the server sends is dropped.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`IdentifyParams`] / [`ExecuteParams`] | Parser request bodies |
//! | [`JobSubmission`] | Response of a job submission |
//! | [`JobStatus`] | Generic job status with an untyped result |
//! | [`TypedJobStatus`] | Status narrowed after checking [`JobKind`] |
//! | [`IdentifyResult`] / [`ExecuteResult`] | Kind-specific result payloads |
//! | [`ConnectionDeleted`] | Connection deletion confirmation |
//! | [`HmacDigest`] | Raw HMAC digest text |
//!
//! ## Example
//!
//! ```rust
//! use intervene::types::{JobKind, JobStatus, IdentifyResult};
//!
//! let status: JobStatus = serde_json::from_value(serde_json::json!({
//!     "job_id": "job_123",
//!     "status": "completed",
//!     "job_kind": "identify",
//!     "result": {"document_type": "invoice"}
//! }))
//! .unwrap();
//!
//! let typed = status.narrow::<IdentifyResult>(JobKind::Identify).unwrap();
//! assert!(typed.status.is_terminal());
//! ```

pub mod integration;
pub mod job;
pub mod params;

pub use integration::{ConnectionDeleted, HmacDigest};
pub use job::{
    ExecuteResult, IdentifyResult, JobKind, JobState, JobStatus, JobSubmission, TypedJobStatus,
};
pub use params::{ExecuteParams, IdentifyParams};
