use std::io;

use analysis_application::ApplicationError;
use analysis_configuration::ConfigError;
use analysis_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("response body is not valid JSON: {0}")]
    ResponseDecode(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl AnalyzeError {
    /// HTTP status of a rejected request, if that is what failed.
    pub fn api_status(&self) -> Option<u16> {
        match self {
            AnalyzeError::Domain(err) => err.status(),
            AnalyzeError::Application(err) => err.domain().and_then(DomainError::status),
            _ => None,
        }
    }
}
