use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{ClusterClient, ClusterError};

const OVERVIEW_TIMEOUT: Duration = Duration::from_secs(5);
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

#[derive(Deserialize)]
struct JobDetails {
    state: String,
}

#[derive(Serialize)]
struct CancelStatePayload {
    state: &'static str,
}

/// REST adapter for the Flink-style execution cluster.
pub struct FlinkRestClient {
    client: Client,
    base_url: String,
}

impl FlinkRestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(&self, response: Response) -> Result<Response, ClusterError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClusterError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClusterError::Rejected {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ClusterClient for FlinkRestClient {
    async fn job_state(&self, job_id: &str) -> Result<String, ClusterError> {
        let response = self
            .client
            .get(self.url(&format!("/jobs/{}", job_id)))
            .send()
            .await
            .map_err(|e| ClusterError::Transport(e.to_string()))?;
        let response = self.check(response).await?;
        let details: JobDetails = response
            .json()
            .await
            .map_err(|e| ClusterError::Transport(e.to_string()))?;
        Ok(details.state)
    }

    async fn yarn_cancel(&self, job_id: &str) -> Result<(), ClusterError> {
        let response = self
            .client
            .get(self.url(&format!("/jobs/{}/yarn-cancel", job_id)))
            .send()
            .await
            .map_err(|e| ClusterError::Transport(e.to_string()))?;
        self.check(response).await.map(|_| ())
    }

    async fn cancel_with_patch(&self, job_id: &str) -> Result<(), ClusterError> {
        let response = self
            .client
            .patch(self.url(&format!("/jobs/{}/cancel", job_id)))
            .json(&CancelStatePayload { state: "CANCELED" })
            .send()
            .await
            .map_err(|e| ClusterError::Transport(e.to_string()))?;
        self.check(response).await.map(|_| ())
    }

    async fn overview(&self) -> Result<(), ClusterError> {
        let response = self
            .client
            .get(self.url("/overview"))
            .timeout(OVERVIEW_TIMEOUT)
            .send()
            .await
            .map_err(|e| ClusterError::Transport(e.to_string()))?;
        self.check(response).await.map(|_| ())
    }
}

/// Pulls the structured error list out of a cluster error body, falling back
/// to a bounded preview of the raw text.
fn error_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        errors: Vec<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if !parsed.errors.is_empty() {
            return parsed.errors.join("; ");
        }
    }
    let preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
    if preview.is_empty() {
        "no error detail".to_string()
    } else {
        preview
    }
}
