use std::sync::Arc;

use async_trait::async_trait;

use analysis_domain::{AnalysisOptions, AnalysisPayload, AnalysisPort, AnalysisResponse};

use crate::payload::{build_payload, loggable, resolve_recording, PayloadDefaults};
use crate::ApplicationError;

#[async_trait]
pub trait AnalyzeRecordingUseCase: Send + Sync {
    /// Merges options and fills defaults. Does not touch the file system.
    fn build_payload(
        &self,
        recording_reference: &str,
        options: AnalysisOptions,
    ) -> Result<AnalysisPayload, ApplicationError>;

    /// Inlines a local recording if needed and performs the single POST.
    /// Non-200 statuses come back as a normal `AnalysisResponse`.
    async fn dispatch(&self, payload: AnalysisPayload) -> Result<AnalysisResponse, ApplicationError>;

    async fn analyze(
        &self,
        recording_reference: &str,
        options: AnalysisOptions,
    ) -> Result<AnalysisResponse, ApplicationError> {
        let payload = self.build_payload(recording_reference, options)?;
        self.dispatch(payload).await
    }
}

pub struct AnalyzeRecordingUseCaseImpl {
    port: Arc<dyn AnalysisPort>,
    defaults: PayloadDefaults,
}

impl AnalyzeRecordingUseCaseImpl {
    pub fn new(port: Arc<dyn AnalysisPort>, defaults: PayloadDefaults) -> Self {
        Self { port, defaults }
    }
}

#[async_trait]
impl AnalyzeRecordingUseCase for AnalyzeRecordingUseCaseImpl {
    fn build_payload(
        &self,
        recording_reference: &str,
        options: AnalysisOptions,
    ) -> Result<AnalysisPayload, ApplicationError> {
        build_payload(recording_reference, options, &self.defaults)
    }

    async fn dispatch(
        &self,
        mut payload: AnalysisPayload,
    ) -> Result<AnalysisResponse, ApplicationError> {
        tracing::info!(payload = %loggable(&payload), "request payload");

        resolve_recording(&mut payload, self.defaults.max_recording_bytes)?;
        let response = self.port.submit(&payload).await?;

        tracing::debug!(
            status = response.status,
            body_bytes = response.body.len(),
            "analysis request completed"
        );

        Ok(response)
    }
}
