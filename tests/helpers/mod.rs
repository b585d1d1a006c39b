#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use syncpilot::application::ports::{Clock, ClusterClient, ClusterError};
use syncpilot::domain::{ProcessHandle, ProcessHandleError};

/// Deterministic clock for lifecycle tests.
pub struct ManualClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl ManualClock {
    pub fn fixed() -> Self {
        Self {
            now: Mutex::new(
                DateTime::parse_from_rfc3339("2024-06-01T12:00:00+08:00").unwrap(),
            ),
        }
    }

    pub fn advance(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap()
    }
}

/// One scripted reply from the status endpoint.
pub enum ScriptedStatus {
    State(&'static str),
    NotFound,
    Transport,
}

/// One scripted reply from a cancel endpoint.
pub enum ScriptedAck {
    Accepted,
    Rejected(u16, &'static str),
    Transport,
}

/// Cluster double that replays scripted responses; the last scripted status
/// response is sticky, so poll loops can run longer than the script.
pub struct ScriptedCluster {
    statuses: Mutex<Vec<ScriptedStatus>>,
    yarn_acks: Mutex<Vec<ScriptedAck>>,
    patch_acks: Mutex<Vec<ScriptedAck>>,
    pub status_calls: AtomicUsize,
    pub yarn_calls: AtomicUsize,
    pub patch_calls: AtomicUsize,
}

impl ScriptedCluster {
    pub fn new() -> Self {
        Self {
            statuses: Mutex::new(Vec::new()),
            yarn_acks: Mutex::new(Vec::new()),
            patch_acks: Mutex::new(Vec::new()),
            status_calls: AtomicUsize::new(0),
            yarn_calls: AtomicUsize::new(0),
            patch_calls: AtomicUsize::new(0),
        }
    }

    pub fn push_status(&self, status: ScriptedStatus) -> &Self {
        self.statuses.lock().unwrap().push(status);
        self
    }

    pub fn push_yarn_ack(&self, ack: ScriptedAck) -> &Self {
        self.yarn_acks.lock().unwrap().push(ack);
        self
    }

    pub fn push_patch_ack(&self, ack: ScriptedAck) -> &Self {
        self.patch_acks.lock().unwrap().push(ack);
        self
    }

    fn next_status(&self) -> Result<String, ClusterError> {
        let index = self.status_calls.fetch_add(1, Ordering::SeqCst);
        let statuses = self.statuses.lock().unwrap();
        let scripted = match statuses.get(index).or_else(|| statuses.last()) {
            Some(s) => s,
            None => return Err(ClusterError::Transport("no scripted status".to_string())),
        };
        match scripted {
            ScriptedStatus::State(state) => Ok((*state).to_string()),
            ScriptedStatus::NotFound => Err(ClusterError::NotFound),
            ScriptedStatus::Transport => {
                Err(ClusterError::Transport("connection refused".to_string()))
            }
        }
    }

    fn next_ack(acks: &Mutex<Vec<ScriptedAck>>, counter: &AtomicUsize) -> Result<(), ClusterError> {
        let index = counter.fetch_add(1, Ordering::SeqCst);
        let acks = acks.lock().unwrap();
        // An unscripted cancel endpoint accepts the request.
        match acks.get(index).or_else(|| acks.last()) {
            None | Some(ScriptedAck::Accepted) => Ok(()),
            Some(ScriptedAck::Rejected(status, detail)) => Err(ClusterError::Rejected {
                status: *status,
                detail: (*detail).to_string(),
            }),
            Some(ScriptedAck::Transport) => {
                Err(ClusterError::Transport("connection refused".to_string()))
            }
        }
    }
}

#[async_trait]
impl ClusterClient for ScriptedCluster {
    async fn job_state(&self, _job_id: &str) -> Result<String, ClusterError> {
        self.next_status()
    }

    async fn yarn_cancel(&self, _job_id: &str) -> Result<(), ClusterError> {
        Self::next_ack(&self.yarn_acks, &self.yarn_calls)
    }

    async fn cancel_with_patch(&self, _job_id: &str) -> Result<(), ClusterError> {
        Self::next_ack(&self.patch_acks, &self.patch_calls)
    }

    async fn overview(&self) -> Result<(), ClusterError> {
        Ok(())
    }
}

/// Process double that records whether it was released.
pub struct FakeProcess {
    released: std::sync::Arc<AtomicBool>,
}

impl FakeProcess {
    pub fn new() -> (Self, std::sync::Arc<AtomicBool>) {
        let released = std::sync::Arc::new(AtomicBool::new(false));
        (
            Self {
                released: std::sync::Arc::clone(&released),
            },
            released,
        )
    }
}

#[async_trait]
impl ProcessHandle for FakeProcess {
    async fn shutdown(self: Box<Self>, _grace: Duration) -> Result<(), ProcessHandleError> {
        self.released.store(true, Ordering::SeqCst);
        Ok(())
    }
}
