use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::domain::{JobId, JobRecord};

/// In-memory table of all tracked job records.
///
/// The map itself is the only structure shared across jobs; each record sits
/// behind its own mutex, so reconcile/drain/cancel on one record serialize
/// with each other while distinct records never contend.
///
/// Records are retained for the lifetime of the process; `remove` exists so
/// callers can reclaim slots explicitly.
pub struct JobRegistry {
    jobs: RwLock<HashMap<JobId, Arc<Mutex<JobRecord>>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(&self, record: JobRecord) -> Arc<Mutex<JobRecord>> {
        let id = record.id();
        let handle = Arc::new(Mutex::new(record));
        self.jobs.write().await.insert(id, Arc::clone(&handle));
        handle
    }

    pub async fn get(&self, id: JobId) -> Option<Arc<Mutex<JobRecord>>> {
        self.jobs.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: JobId) -> Option<Arc<Mutex<JobRecord>>> {
        self.jobs.write().await.remove(&id)
    }
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}
