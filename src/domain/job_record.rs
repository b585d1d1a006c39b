use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};

use super::process_handle::ProcessHandle;
use super::{JobId, JobState};

const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// In-memory record for one submitted synchronization job.
///
/// The log is append-only and never reordered; `delivered` marks how much of
/// it has already been handed to callers and never runs ahead of the log.
/// Terminal states absorb: `transition` refuses to move a record out of
/// `Finished`, `Failed` or `Canceled`.
pub struct JobRecord {
    id: JobId,
    external_id: Option<String>,
    state: JobState,
    logs: Vec<String>,
    delivered: usize,
    last_observed_state: Option<JobState>,
    config_document: Option<PathBuf>,
    process: Option<Box<dyn ProcessHandle>>,
    started_at: DateTime<FixedOffset>,
    updated_at: DateTime<FixedOffset>,
}

impl JobRecord {
    pub fn new(
        id: JobId,
        external_id: Option<String>,
        config_document: Option<PathBuf>,
        process: Option<Box<dyn ProcessHandle>>,
        now: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id,
            external_id,
            state: JobState::Submitted,
            logs: Vec::new(),
            delivered: 0,
            last_observed_state: None,
            config_document,
            process,
            started_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn last_observed_state(&self) -> Option<JobState> {
        self.last_observed_state
    }

    pub fn set_last_observed_state(&mut self, state: JobState) {
        self.last_observed_state = Some(state);
    }

    pub fn started_at(&self) -> DateTime<FixedOffset> {
        self.started_at
    }

    pub fn updated_at(&self) -> DateTime<FixedOffset> {
        self.updated_at
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn delivered_count(&self) -> usize {
        self.delivered
    }

    /// Appends a timestamped line and refreshes `updated_at`.
    pub fn log(&mut self, now: DateTime<FixedOffset>, message: impl AsRef<str>) {
        self.logs.push(format!(
            "[{}] {}",
            now.format(LOG_TIMESTAMP_FORMAT),
            message.as_ref()
        ));
        self.updated_at = now;
    }

    /// Refreshes `updated_at` without logging anything.
    pub fn touch(&mut self, now: DateTime<FixedOffset>) {
        self.updated_at = now;
    }

    /// Moves the record to `next` unless it already reached a terminal state.
    ///
    /// Returns whether the state actually changed.
    pub fn transition(&mut self, next: JobState) -> bool {
        if self.state.is_terminal() || self.state == next {
            return false;
        }
        self.state = next;
        true
    }

    /// Returns the log lines appended since the previous drain and advances
    /// the delivery cursor past them. A second drain with no intervening
    /// appends yields nothing: this is delivery, not a peek.
    pub fn drain_new_logs(&mut self) -> Vec<String> {
        let new_logs = self.logs[self.delivered..].to_vec();
        self.delivered = self.logs.len();
        new_logs
    }

    /// Hands out the process handle, leaving none behind.
    pub fn take_process(&mut self) -> Option<Box<dyn ProcessHandle>> {
        self.process.take()
    }

    /// Hands out the config document path, leaving none behind.
    pub fn take_config_document(&mut self) -> Option<PathBuf> {
        self.config_document.take()
    }
}
