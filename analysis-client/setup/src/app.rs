use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use analysis_application::{AnalyzeRecordingUseCase, AnalyzeRecordingUseCaseImpl, PayloadDefaults};
use analysis_configuration::AppConfig;
use analysis_domain::{AnalysisOptions, AnalysisPort};
use analysis_infra_http::{HttpAnalysisClient, HttpAnalysisClientConfig};
use serde_json::Value;

use crate::report::report_response;
use crate::AnalyzeError;

pub async fn build_and_run<W: Write>(
    config: AppConfig,
    recording_reference: &str,
    options: AnalysisOptions,
    out: &mut W,
) -> Result<Value, AnalyzeError> {
    let app = Application::new(config)?;
    app.run(recording_reference, options, out).await
}

pub struct Application {
    pub config: AppConfig,
    pub usecase: Arc<dyn AnalyzeRecordingUseCase>,
}

impl Application {
    pub fn new(config: AppConfig) -> Result<Self, AnalyzeError> {
        tracing::info!(
            endpoint = %config.api.endpoint,
            project_id = %config.api.project_id,
            connect_timeout_ms = config.api.connect_timeout_ms,
            request_timeout_ms = config.api.request_timeout_ms,
            "initializing analysis client"
        );

        let client = HttpAnalysisClient::new(HttpAnalysisClientConfig {
            endpoint: config.api.endpoint.clone(),
            token: config.api.token.clone(),
            connect_timeout: Duration::from_millis(config.api.connect_timeout_ms),
            request_timeout: Duration::from_millis(config.api.request_timeout_ms),
        })?;

        Ok(Self::with_port(config, Arc::new(client)))
    }

    pub fn with_port(config: AppConfig, port: Arc<dyn AnalysisPort>) -> Self {
        let defaults =
            PayloadDefaults::new(config.api.project_id.clone(), config.api.max_recording_bytes);
        let usecase: Arc<dyn AnalyzeRecordingUseCase> =
            Arc::new(AnalyzeRecordingUseCaseImpl::new(port, defaults));

        Self { config, usecase }
    }

    /// Builds the payload, echoes it to `out`, sends it and reports the result.
    pub async fn run<W: Write>(
        &self,
        recording_reference: &str,
        options: AnalysisOptions,
        out: &mut W,
    ) -> Result<Value, AnalyzeError> {
        let payload = self.usecase.build_payload(recording_reference, options)?;
        writeln!(out, "request payload:")?;
        writeln!(out, "{payload}")?;

        let response = self.usecase.dispatch(payload).await?;
        report_response(response, out)
    }
}
