use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

use crate::application::ports::{Clock, ClusterClient, JobLauncher};
use crate::domain::{ConfigError, JobId, JobRecord, JobState, SyncJobConfig};

use super::cancellation::{CancelRejected, CancellationCoordinator, CancellationOptions};
use super::config_materializer::materialize_pipeline_config;
use super::job_registry::JobRegistry;
use super::status_reconciler::StatusReconciler;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write the config document: {0}")]
    DocumentWrite(String),
}

#[derive(Debug, thiserror::Error)]
pub enum JobLookupError {
    #[error("job not found: {0}")]
    NotFound(JobId),
}

#[derive(Debug, thiserror::Error)]
pub enum CancelServiceError {
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error(transparent)]
    Rejected(#[from] CancelRejected),
}

pub struct SubmitOutcome {
    pub job_id: JobId,
    pub external_id: Option<String>,
    pub state: JobState,
    pub initial_logs: Vec<String>,
}

pub struct PollOutcome {
    pub job_id: JobId,
    pub external_id: Option<String>,
    pub state: JobState,
    pub new_logs: Vec<String>,
    pub started_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

pub struct JobServiceOptions {
    /// Directory the materialized config documents are written into.
    pub config_dir: PathBuf,
    pub cancellation: CancellationOptions,
}

impl Default for JobServiceOptions {
    fn default() -> Self {
        Self {
            config_dir: std::env::temp_dir(),
            cancellation: CancellationOptions::default(),
        }
    }
}

/// Facade over the job lifecycle: submission, status polling with incremental
/// log delivery, and cancellation.
pub struct JobService {
    registry: Arc<JobRegistry>,
    launcher: Arc<dyn JobLauncher>,
    reconciler: StatusReconciler,
    canceller: CancellationCoordinator,
    clock: Arc<dyn Clock>,
    config_dir: PathBuf,
}

impl JobService {
    pub fn new(
        registry: Arc<JobRegistry>,
        launcher: Arc<dyn JobLauncher>,
        cluster: Arc<dyn ClusterClient>,
        clock: Arc<dyn Clock>,
        options: JobServiceOptions,
    ) -> Self {
        Self {
            reconciler: StatusReconciler::new(Arc::clone(&cluster), Arc::clone(&clock)),
            canceller: CancellationCoordinator::new(cluster, Arc::clone(&clock), options.cancellation),
            registry,
            launcher,
            clock,
            config_dir: options.config_dir,
        }
    }

    /// Validates the payload, materializes the config document, starts the
    /// pipeline and registers a record for it.
    ///
    /// Launch failures do not propagate: the record is still created with the
    /// diagnostics logged, in line with the rest of the lifecycle being
    /// poll-driven. Only configuration errors reject the submission outright.
    pub async fn submit(&self, config: SyncJobConfig) -> Result<SubmitOutcome, SubmitError> {
        let (source, sink, options) = config.validated()?;
        let parallelism = options.parallelism()?;
        let checkpoint_interval_secs = options.checkpoint_interval_secs()?;
        let document = materialize_pipeline_config(&source, &sink, &options)?;

        let job_id = JobId::new();
        let document_path = self.config_dir.join(format!("syncpilot_{}.yaml", job_id));
        tokio::fs::write(&document_path, &document)
            .await
            .map_err(|e| SubmitError::DocumentWrite(e.to_string()))?;

        let launch = self
            .launcher
            .launch(&document_path, parallelism, checkpoint_interval_secs)
            .await;

        let now = self.clock.now();
        let mut record = match launch {
            Ok(outcome) => {
                let mut record = JobRecord::new(
                    job_id,
                    outcome.external_id,
                    Some(document_path),
                    outcome.process,
                    now,
                );
                for line in outcome.initial_logs {
                    record.log(now, line);
                }
                record
            }
            Err(err) => {
                tracing::error!(job_id = %job_id, error = %err, "submit command could not be started");
                let mut record = JobRecord::new(job_id, None, Some(document_path), None, now);
                record.log(now, format!("failed to start the submit command: {}", err));
                record
            }
        };

        let initial_logs = record.drain_new_logs();
        let external_id = record.external_id().map(str::to_string);
        let state = record.state();
        self.registry.create(record).await;

        tracing::info!(
            job_id = %job_id,
            external_id = external_id.as_deref().unwrap_or("-"),
            "sync job submitted"
        );

        Ok(SubmitOutcome {
            job_id,
            external_id,
            state,
            initial_logs,
        })
    }

    /// Reconciles the record against the cluster and drains the log lines
    /// appended since the previous poll.
    pub async fn poll(&self, job_id: JobId) -> Result<PollOutcome, JobLookupError> {
        let record = self
            .registry
            .get(job_id)
            .await
            .ok_or(JobLookupError::NotFound(job_id))?;
        let mut record = record.lock().await;

        self.reconciler.reconcile(&mut record).await;

        Ok(PollOutcome {
            job_id,
            external_id: record.external_id().map(str::to_string),
            state: record.state(),
            new_logs: record.drain_new_logs(),
            started_at: record.started_at(),
            updated_at: record.updated_at(),
        })
    }

    /// Runs the cancellation flow and reports the record's final state.
    pub async fn cancel(&self, job_id: JobId) -> Result<JobState, CancelServiceError> {
        let record = self
            .registry
            .get(job_id)
            .await
            .ok_or(CancelServiceError::NotFound(job_id))?;
        let mut record = record.lock().await;

        let state = self.canceller.cancel(&mut record).await?;
        tracing::info!(job_id = %job_id, state = %state, "cancellation finished");
        Ok(state)
    }
}
