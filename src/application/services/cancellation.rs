use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::application::ports::{Clock, ClusterClient, ClusterError};
use crate::domain::{JobRecord, JobState};

/// Timing bounds for one cancellation attempt.
#[derive(Debug, Clone)]
pub struct CancellationOptions {
    /// Delay between status polls while waiting for a terminal state.
    pub poll_interval: Duration,
    /// Upper bound on the total wait-and-poll time.
    pub max_wait: Duration,
    /// After this much cumulative wait, persistent transport errors are taken
    /// to mean the job is gone.
    pub transport_grace: Duration,
    /// How long the local submit process gets to exit after a graceful stop
    /// before it is killed.
    pub process_grace: Duration,
}

impl Default for CancellationOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_wait: Duration::from_secs(30),
            transport_grace: Duration::from_secs(5),
            process_grace: Duration::from_secs(5),
        }
    }
}

/// Both cancel request forms were rejected by the cluster.
#[derive(Debug, thiserror::Error)]
#[error("cluster rejected both cancel requests: {detail}")]
pub struct CancelRejected {
    pub detail: String,
}

/// Orchestrates a multi-step cancellation: cancel request with one fallback
/// form, bounded wait-and-poll for a terminal state, then release of the
/// local process handle and config document.
///
/// Local cleanup always runs, including when both cancel requests fail or
/// the wait times out; those outcomes degrade to logged best effort, never
/// to lost resources.
pub struct CancellationCoordinator {
    cluster: Arc<dyn ClusterClient>,
    clock: Arc<dyn Clock>,
    options: CancellationOptions,
}

impl CancellationCoordinator {
    pub fn new(
        cluster: Arc<dyn ClusterClient>,
        clock: Arc<dyn Clock>,
        options: CancellationOptions,
    ) -> Self {
        Self {
            cluster,
            clock,
            options,
        }
    }

    pub async fn cancel(&self, record: &mut JobRecord) -> Result<JobState, CancelRejected> {
        let Some(external_id) = record.external_id().map(str::to_string) else {
            // Nothing to cancel on the cluster side.
            record.log(
                self.clock.now(),
                "no cluster job to cancel, marking the job canceled",
            );
            self.release_local_resources(record).await;
            record.transition(JobState::Canceled);
            record.set_last_observed_state(JobState::Canceled);
            return Ok(record.state());
        };

        if let Err(detail) = self.request_cancel(&external_id).await {
            tracing::warn!(job_id = %record.id(), detail = %detail, "cancel requests rejected");
            record.log(
                self.clock.now(),
                format!("cancel request rejected by the cluster: {}", detail),
            );
            self.release_local_resources(record).await;
            return Err(CancelRejected { detail });
        }

        record.log(self.clock.now(), "cancel request sent to the cluster");
        let resolved = self.await_terminal(&external_id, record).await;
        self.release_local_resources(record).await;

        // A timed-out wait leaves the state at whatever was last observed;
        // only a resolved wait falls back to CANCELED.
        if resolved && !record.state().is_terminal() {
            record.transition(JobState::Canceled);
            record.set_last_observed_state(JobState::Canceled);
        }
        Ok(record.state())
    }

    /// Issues the yarn-style cancel call, falling back to the standard cancel
    /// endpoint when the first form is not accepted. Failure of both forms is
    /// surfaced, not retried.
    async fn request_cancel(&self, external_id: &str) -> Result<(), String> {
        let primary = match self.cluster.yarn_cancel(external_id).await {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };
        tracing::debug!(
            external_id,
            error = %primary,
            "yarn-style cancel not accepted, trying the standard endpoint"
        );
        match self.cluster.cancel_with_patch(external_id).await {
            Ok(()) => Ok(()),
            Err(fallback) => Err(format!("{} (fallback: {})", primary, fallback)),
        }
    }

    /// Polls for a terminal state until `max_wait` elapses.
    ///
    /// Returns whether the wait resolved, either by observing a terminal
    /// state or by concluding the job is gone. A timed-out wait returns
    /// `false` and leaves the record at the last observed state.
    async fn await_terminal(&self, external_id: &str, record: &mut JobRecord) -> bool {
        let started = Instant::now();
        let mut last_observed = record.state();

        loop {
            match self.cluster.job_state(external_id).await {
                Ok(raw) => {
                    let observed = JobState::from_external(&raw);
                    if observed != last_observed {
                        last_observed = observed;
                        record.transition(observed);
                        record.set_last_observed_state(observed);
                        if observed.is_terminal() {
                            record.log(self.clock.now(), final_state_message(observed));
                            return true;
                        }
                        if observed == JobState::Canceling {
                            record.log(self.clock.now(), "cancellation in progress");
                        } else {
                            record.log(self.clock.now(), format!("job reported state {}", raw));
                        }
                    } else if observed.is_terminal() {
                        // The state was already terminal before the first
                        // differing-state check.
                        return true;
                    }
                }
                Err(ClusterError::NotFound) => {
                    record.log(
                        self.clock.now(),
                        "job is no longer known to the cluster, treating it as canceled",
                    );
                    return true;
                }
                Err(err) => {
                    // Informative only: a freshly submitted job may not be
                    // queryable yet. Past the grace window, assume it is gone.
                    if started.elapsed() > self.options.transport_grace {
                        record.log(
                            self.clock.now(),
                            format!("status checks keep failing ({}), assuming the job is gone", err),
                        );
                        return true;
                    }
                    tracing::debug!(
                        external_id,
                        error = %err,
                        "status check failed during cancellation, retrying"
                    );
                }
            }

            if started.elapsed() + self.options.poll_interval >= self.options.max_wait {
                record.log(
                    self.clock.now(),
                    "cancellation wait timed out, but the cancel request was sent",
                );
                return false;
            }
            tokio::time::sleep(self.options.poll_interval).await;
        }
    }

    /// Releases the process handle and deletes the config document. Errors
    /// here are logged onto the record but never fail the cancellation.
    async fn release_local_resources(&self, record: &mut JobRecord) {
        if let Some(process) = record.take_process() {
            if let Err(err) = process.shutdown(self.options.process_grace).await {
                tracing::warn!(job_id = %record.id(), error = %err, "failed to stop the local submit process");
                record.log(
                    self.clock.now(),
                    format!("failed to stop the local submit process: {}", err),
                );
            }
        }
        if let Some(path) = record.take_config_document() {
            if let Err(err) = tokio::fs::remove_file(&path).await {
                tracing::warn!(
                    job_id = %record.id(),
                    path = %path.display(),
                    error = %err,
                    "failed to remove the config document"
                );
                record.log(
                    self.clock.now(),
                    format!("failed to remove the config document: {}", err),
                );
            }
        }
    }
}

fn final_state_message(state: JobState) -> String {
    match state {
        JobState::Finished => "job completed before the cancellation took effect".to_string(),
        JobState::Failed => "job failed while the cancellation was pending".to_string(),
        _ => "job was canceled".to_string(),
    }
}
