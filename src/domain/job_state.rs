use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a tracked synchronization job.
///
/// `Finished`, `Failed` and `Canceled` are terminal: once a record enters one
/// of them it never leaves. `NoJob` means the submission produced no cluster
/// job id, so there is nothing to track on the cluster side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobState {
    Submitted,
    Running,
    Finished,
    Failed,
    Canceling,
    Canceled,
    NoJob,
    Unknown,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Submitted => "SUBMITTED",
            JobState::Running => "RUNNING",
            JobState::Finished => "FINISHED",
            JobState::Failed => "FAILED",
            JobState::Canceling => "CANCELING",
            JobState::Canceled => "CANCELED",
            JobState::NoJob => "NO_JOB",
            JobState::Unknown => "UNKNOWN",
        }
    }

    /// Maps a state string reported by the cluster REST interface.
    ///
    /// The cluster spells the in-flight cancellation state `CANCELLING`;
    /// anything not recognized maps to `Unknown` rather than failing, since
    /// clusters grow new states across versions.
    pub fn from_external(state: &str) -> Self {
        match state.to_ascii_uppercase().as_str() {
            "RUNNING" => JobState::Running,
            "FINISHED" => JobState::Finished,
            "FAILED" => JobState::Failed,
            "CANCELLING" | "CANCELING" => JobState::Canceling,
            "CANCELED" => JobState::Canceled,
            _ => JobState::Unknown,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Finished | JobState::Failed | JobState::Canceled
        )
    }
}

impl FromStr for JobState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUBMITTED" => Ok(JobState::Submitted),
            "RUNNING" => Ok(JobState::Running),
            "FINISHED" => Ok(JobState::Finished),
            "FAILED" => Ok(JobState::Failed),
            "CANCELING" => Ok(JobState::Canceling),
            "CANCELED" => Ok(JobState::Canceled),
            "NO_JOB" => Ok(JobState::NoJob),
            "UNKNOWN" => Ok(JobState::Unknown),
            _ => Err(format!("Invalid job state: {}", s)),
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
