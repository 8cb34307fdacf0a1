use crate::client::builder::InterveneClientBuilder;
use crate::client::endpoint::Endpoint;
use crate::config::ClientOptions;
use crate::transport::HttpTransport;
use crate::types::{
    ConnectionDeleted, ExecuteResult, HmacDigest, IdentifyResult, JobKind, JobStatus,
    JobSubmission, TypedJobStatus,
};
use crate::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Tracing target for client operations.
pub const TRACING_TARGET: &str = "intervene::client";

/// Client for the Intervene parser and integrations API.
///
/// Every method issues exactly one HTTP request. Nothing is retried, cached
/// or polled; callers that wait for a job call [`job_status`](Self::job_status)
/// themselves.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Clone, Debug)]
pub struct InterveneClient {
    options: ClientOptions,
    transport: Arc<HttpTransport>,
}

impl InterveneClient {
    /// Create a client from options.
    pub fn new(options: ClientOptions) -> Result<Self> {
        InterveneClientBuilder::from_options(options).build()
    }

    pub fn builder() -> InterveneClientBuilder {
        InterveneClientBuilder::new()
    }

    pub(crate) fn from_parts(options: ClientOptions, transport: Arc<HttpTransport>) -> Self {
        info!(
            target: TRACING_TARGET,
            host = transport.base_url(),
            "Intervene client created"
        );
        Self { options, transport }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Base URL every request is sent to.
    pub fn host(&self) -> &str {
        self.transport.base_url()
    }

    /// Submit an identify job. `params` is sent as the JSON body unmodified.
    pub async fn identify<P>(&self, params: &P) -> Result<JobSubmission>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(params)?;
        let submission: JobSubmission = self
            .transport
            .send_json(
                Endpoint::Identify.method(),
                Endpoint::Identify.template(),
                Some(body),
            )
            .await?;

        debug!(target: TRACING_TARGET, job_id = %submission.job_id, "Identify job submitted");
        Ok(submission)
    }

    /// Submit an execute job. `params` is sent as the JSON body unmodified.
    pub async fn execute<P>(&self, params: &P) -> Result<JobSubmission>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(params)?;
        let submission: JobSubmission = self
            .transport
            .send_json(
                Endpoint::Execute.method(),
                Endpoint::Execute.template(),
                Some(body),
            )
            .await?;

        debug!(target: TRACING_TARGET, job_id = %submission.job_id, "Execute job submitted");
        Ok(submission)
    }

    /// Fetch the status of any job.
    pub async fn job_status(&self, job_id: &str) -> Result<JobStatus> {
        let path = Endpoint::JobStatus.path(&[("job_id", job_id)]);
        let status: JobStatus = self
            .transport
            .send_json(Endpoint::JobStatus.method(), &path, None)
            .await?;

        debug!(
            target: TRACING_TARGET,
            job_id,
            status = ?status.status,
            kind = ?status.kind,
            "Job status fetched"
        );
        Ok(status)
    }

    /// Status of an identify job, with its result typed.
    ///
    /// Fails with [`Error::JobKindMismatch`](crate::Error::JobKindMismatch)
    /// if the server reports a different (or no) job kind.
    pub async fn identify_job_status(&self, job_id: &str) -> Result<TypedJobStatus<IdentifyResult>> {
        self.job_status(job_id).await?.narrow(JobKind::Identify)
    }

    /// Status of an execute job, with its result typed.
    ///
    /// Fails with [`Error::JobKindMismatch`](crate::Error::JobKindMismatch)
    /// if the server reports a different (or no) job kind.
    pub async fn execute_job_status(&self, job_id: &str) -> Result<TypedJobStatus<ExecuteResult>> {
        self.job_status(job_id).await?.narrow(JobKind::Execute)
    }

    /// Delete the connection between a user and a provider.
    ///
    /// For OAuth integrations this also deletes the stored access tokens.
    pub async fn destroy_connection(
        &self,
        provider: &str,
        user_id: &str,
    ) -> Result<ConnectionDeleted> {
        let path = Endpoint::DestroyConnection.path(&[("provider", provider), ("user_id", user_id)]);
        let deleted = self
            .transport
            .send_json(Endpoint::DestroyConnection.method(), &path, None)
            .await?;

        debug!(target: TRACING_TARGET, provider, user_id, "Connection destroyed");
        Ok(deleted)
    }

    /// Generate the HMAC digest for a user's provider connection.
    ///
    /// The response body is returned as text; it is not parsed as JSON.
    pub async fn generate_hmac_digest(&self, provider: &str, user_id: &str) -> Result<HmacDigest> {
        let path = Endpoint::HmacDigest.path(&[("provider", provider), ("user_id", user_id)]);
        let text = self
            .transport
            .send_text(Endpoint::HmacDigest.method(), &path, None)
            .await?;

        debug!(target: TRACING_TARGET, provider, user_id, "HMAC digest generated");
        Ok(HmacDigest::new(text))
    }
}
