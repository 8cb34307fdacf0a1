//! Parser job submission and status types.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::{Error, Result};

/// Kind of parser job, as reported by the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Identify,
    Execute,
    /// Any kind this client does not know about.
    #[serde(other)]
    Unknown,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::Identify => "identify",
            JobKind::Execute => "execute",
            JobKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a parser job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Queued,
    #[serde(alias = "in_progress", alias = "processing")]
    Running,
    #[serde(alias = "succeeded", alias = "success", alias = "complete")]
    Completed,
    #[serde(alias = "error", alias = "errored")]
    Failed,
    #[serde(alias = "canceled")]
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

impl JobState {
    /// Whether the job will not change state again.
    ///
    /// Useful for caller-side polling; the client itself never polls.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobState::Completed | JobState::Failed | JobState::Cancelled
        )
    }
}

/// Response of a job submission (`identify` or `execute`).
///
/// The id is read from `job_id`, or from `id` when `job_id` is absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSubmission {
    pub job_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobState>,
    /// Fields not modelled here, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for JobSubmission {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            job_id: Option<Value>,
            #[serde(default)]
            status: Option<Value>,
            #[serde(flatten)]
            extra: Map<String, Value>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let job_id = raw
            .job_id
            .as_ref()
            .and_then(id_text)
            .or_else(|| raw.extra.get("id").and_then(id_text))
            .ok_or_else(|| D::Error::custom("job submission has no `job_id` or `id`"))?;

        Ok(JobSubmission {
            job_id,
            status: raw.status.as_ref().map(state_of),
            extra: raw.extra,
        })
    }
}

/// Generic status of a parser job.
///
/// `result` is left untyped; use [`JobStatus::narrow`] (or the client's
/// `identify_job_status` / `execute_job_status`) to get a typed payload after
/// the job kind has been checked.
///
/// Decoding never fails on the shape of known fields. A missing, `null` or
/// unrecognised `status` reads as [`JobState::Unknown`]. The kind comes from
/// `job_kind`, falling back to `type` only when `job_kind` is absent; `type`
/// and `id` stay in `extra` either way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    pub status: JobState,
    /// Job kind discriminator.
    #[serde(rename = "job_kind", skip_serializing_if = "Option::is_none")]
    pub kind: Option<JobKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Known fields are taken as raw values so odd types or nulls degrade
        // instead of failing the whole response.
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            job_id: Option<Value>,
            #[serde(default)]
            status: Option<Value>,
            #[serde(default)]
            job_kind: Option<Value>,
            #[serde(default)]
            result: Option<Value>,
            #[serde(default)]
            error: Option<Value>,
            #[serde(flatten)]
            extra: Map<String, Value>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let job_id = raw
            .job_id
            .as_ref()
            .and_then(id_text)
            .or_else(|| raw.extra.get("id").and_then(id_text));
        let kind = match &raw.job_kind {
            Some(value) => kind_of(value),
            None => raw.extra.get("type").and_then(kind_of),
        };

        Ok(JobStatus {
            job_id,
            status: raw.status.as_ref().map(state_of).unwrap_or_default(),
            kind,
            result: raw.result,
            error: raw.error,
            extra: raw.extra,
        })
    }
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn state_of(value: &Value) -> JobState {
    JobState::deserialize(value).unwrap_or_default()
}

fn kind_of(value: &Value) -> Option<JobKind> {
    JobKind::deserialize(value).ok()
}

impl JobStatus {
    /// Check the job kind discriminator and decode `result` as `R`.
    ///
    /// Fails with [`Error::JobKindMismatch`] when the discriminator is absent
    /// or names a different kind, and with [`Error::Serialization`] when the
    /// result does not decode as `R`. A missing or `null` result (job still
    /// running) narrows to `None`.
    pub fn narrow<R: DeserializeOwned>(self, expected: JobKind) -> Result<TypedJobStatus<R>> {
        if self.kind != Some(expected) {
            return Err(Error::JobKindMismatch {
                expected,
                found: self.kind,
            });
        }

        let result = match self.result {
            None | Some(Value::Null) => None,
            Some(value) => Some(serde_json::from_value(value)?),
        };

        Ok(TypedJobStatus {
            job_id: self.job_id,
            status: self.status,
            kind: expected,
            result,
            error: self.error,
            extra: self.extra,
        })
    }
}

/// Job status whose kind has been verified and whose result is typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedJobStatus<R> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    pub status: JobState,
    #[serde(rename = "job_kind")]
    pub kind: JobKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<R>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result payload of an identify job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentifyResult(Value);

impl IdentifyResult {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Decode the payload into a caller-defined shape.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.0)?)
    }
}

/// Result payload of an execute job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecuteResult(Value);

impl ExecuteResult {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Decode the payload into a caller-defined shape.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.0)?)
    }
}
