use std::sync::Arc;

use crate::application::ports::{Clock, ClusterClient};
use crate::domain::{JobRecord, JobState};

/// Brings a job record in line with what the cluster reports.
///
/// Terminal records are absorbed: a reconcile only refreshes their
/// `updated_at`. Transient cluster failures are logged onto the record and
/// never change its state; the next poll is expected to self-heal.
pub struct StatusReconciler {
    cluster: Arc<dyn ClusterClient>,
    clock: Arc<dyn Clock>,
}

impl StatusReconciler {
    pub fn new(cluster: Arc<dyn ClusterClient>, clock: Arc<dyn Clock>) -> Self {
        Self { cluster, clock }
    }

    pub async fn reconcile(&self, record: &mut JobRecord) {
        let now = self.clock.now();

        if record.state().is_terminal() {
            record.touch(now);
            return;
        }

        let Some(external_id) = record.external_id().map(str::to_string) else {
            // One "no job" line, not one per poll.
            if record.last_observed_state() != Some(JobState::NoJob) {
                record.transition(JobState::NoJob);
                record.set_last_observed_state(JobState::NoJob);
                record.log(now, "no job is running on the cluster");
            } else {
                record.touch(now);
            }
            return;
        };

        match self.cluster.job_state(&external_id).await {
            Err(err) => {
                tracing::warn!(job_id = %record.id(), error = %err, "status poll failed");
                record.log(now, format!("status check failed: {}", err));
            }
            Ok(raw) => {
                let observed = JobState::from_external(&raw);
                record.transition(observed);
                if observed == JobState::Running {
                    // Logged on every poll: the line conveys liveness, not a
                    // one-time transition.
                    record.set_last_observed_state(observed);
                    record.log(now, "job is running");
                } else if record.last_observed_state() != Some(observed) {
                    record.set_last_observed_state(observed);
                    record.log(now, transition_message(observed, &raw));
                } else {
                    record.touch(now);
                }
            }
        }
    }
}

fn transition_message(state: JobState, raw: &str) -> String {
    match state {
        JobState::Finished => "job completed".to_string(),
        JobState::Failed => "job failed".to_string(),
        JobState::Canceled => "job was canceled".to_string(),
        JobState::Canceling => "job cancellation in progress".to_string(),
        _ => format!("job reported state {}", raw),
    }
}
