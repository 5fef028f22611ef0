pub mod error;
pub mod payload;
pub mod usecase;

pub use error::*;
pub use payload::{PayloadDefaults, DATA_URI_PREFIX, DEFAULT_EXPECTED_LANGUAGES, REMOTE_PREFIX};
pub use usecase::{AnalyzeRecordingUseCase, AnalyzeRecordingUseCaseImpl};
