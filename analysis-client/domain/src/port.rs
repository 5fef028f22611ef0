use async_trait::async_trait;

use crate::{AnalysisPayload, AnalysisResponse, DomainError};

/// Transport boundary for submitting a fully resolved payload.
///
/// Implementations return every HTTP status as an `AnalysisResponse`; only
/// failures to complete the exchange surface as errors.
#[async_trait]
pub trait AnalysisPort: Send + Sync {
    async fn submit(&self, payload: &AnalysisPayload) -> Result<AnalysisResponse, DomainError>;
}
