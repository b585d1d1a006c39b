use std::path::Path;

use async_trait::async_trait;

use crate::domain::ProcessHandle;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to spawn the submit command: {0}")]
    Spawn(String),
}

/// What a submission attempt produced.
///
/// `external_id` is absent when no job-id line could be extracted from the
/// submit output; `initial_logs` then carries the diagnostic lines the caller
/// must record instead of failing silently.
pub struct LaunchOutcome {
    pub external_id: Option<String>,
    pub initial_logs: Vec<String>,
    pub process: Option<Box<dyn ProcessHandle>>,
}

/// Starts a pipeline on the execution cluster from a materialized config
/// document.
#[async_trait]
pub trait JobLauncher: Send + Sync {
    async fn launch(
        &self,
        config_document: &Path,
        parallelism: u32,
        checkpoint_interval_secs: u64,
    ) -> Result<LaunchOutcome, LaunchError>;
}
