use std::sync::Arc;

use crate::application::ports::{ClusterClient, SqlGateway};
use crate::application::services::JobService;

pub struct AppState {
    pub job_service: Arc<JobService>,
    pub sql_gateway: Arc<dyn SqlGateway>,
    pub cluster: Arc<dyn ClusterClient>,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            job_service: Arc::clone(&self.job_service),
            sql_gateway: Arc::clone(&self.sql_gateway),
            cluster: Arc::clone(&self.cluster),
        }
    }
}
