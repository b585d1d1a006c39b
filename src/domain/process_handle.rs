use std::time::Duration;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ProcessHandleError {
    #[error("failed to signal process: {0}")]
    Signal(String),
    #[error("failed to wait for process exit: {0}")]
    Wait(String),
    #[error("failed to kill process: {0}")]
    Kill(String),
}

/// Exclusive ownership of the local submit process.
///
/// Shutdown consumes the handle, so the underlying process can only ever be
/// released through one code path.
#[async_trait]
pub trait ProcessHandle: Send + Sync {
    /// Requests graceful termination, waits up to `grace` for the process to
    /// exit, and kills it forcibly if it has not.
    async fn shutdown(self: Box<Self>, grace: Duration) -> Result<(), ProcessHandleError>;
}
