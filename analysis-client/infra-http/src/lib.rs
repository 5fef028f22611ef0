use std::time::Duration;

use analysis_domain::{AnalysisPayload, AnalysisPort, AnalysisResponse, DomainError};
use async_trait::async_trait;
use reqwest::Client;

#[derive(Clone)]
pub struct HttpAnalysisClientConfig {
    pub endpoint: String,
    pub token: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

/// Posts payloads as JSON with a bearer token. TLS verification is always on.
pub struct HttpAnalysisClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl HttpAnalysisClient {
    pub fn new(config: HttpAnalysisClientConfig) -> Result<Self, DomainError> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| DomainError::transport(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            token: config.token,
        })
    }
}

#[async_trait]
impl AnalysisPort for HttpAnalysisClient {
    async fn submit(&self, payload: &AnalysisPayload) -> Result<AnalysisResponse, DomainError> {
        tracing::debug!(endpoint = %self.endpoint, field_count = payload.len(), "posting analysis request");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await
            .map_err(|err| DomainError::transport(format!("POST {} failed: {err}", self.endpoint)))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| {
            DomainError::transport(format!("failed to read response body: {err}"))
        })?;

        if status != AnalysisResponse::SUCCESS_STATUS {
            tracing::warn!(status, "analysis endpoint returned non-success status");
        }

        Ok(AnalysisResponse::new(status, body))
    }
}
