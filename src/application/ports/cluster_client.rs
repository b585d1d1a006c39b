use async_trait::async_trait;

/// Failure reported by the execution-cluster REST interface.
///
/// `Transport` failures are transient and expected to self-heal on the next
/// poll; `NotFound` means the cluster no longer knows the job; `Rejected`
/// carries whatever error detail the cluster returned with a non-success
/// status.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    #[error("job not found on the cluster")]
    NotFound,
    #[error("cluster request failed: {0}")]
    Transport(String),
    #[error("cluster rejected the request (HTTP {status}): {detail}")]
    Rejected { status: u16, detail: String },
}

/// Status and cancellation surface of the execution cluster.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Current state string for a cluster job, e.g. `RUNNING` or `FINISHED`.
    async fn job_state(&self, job_id: &str) -> Result<String, ClusterError>;

    /// Lightweight yarn-style cancel call.
    async fn yarn_cancel(&self, job_id: &str) -> Result<(), ClusterError>;

    /// Standard job-cancel endpoint with a state-change payload, used as the
    /// fallback when the yarn-style call is not accepted.
    async fn cancel_with_patch(&self, job_id: &str) -> Result<(), ClusterError>;

    /// Cluster liveness probe.
    async fn overview(&self) -> Result<(), ClusterError>;
}
