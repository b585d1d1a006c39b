use std::fmt;

use uuid::Uuid;

/// Locally assigned identifier for a tracked job.
///
/// This is the registry key for the whole record lifetime. The identifier the
/// cluster assigns at submission is stored on the record as data, so a job
/// whose launch never produced a cluster id stays reachable for status and
/// cancel calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
