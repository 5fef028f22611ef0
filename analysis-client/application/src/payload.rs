use std::fs;
use std::path::{Path, PathBuf};

use analysis_domain::{
    AnalysisOptions, AnalysisPayload, DomainError, CALLER, CLIENT_ID, EXPECTED_LANGUAGES, FROM,
    PROJECT_ID, RECORDING_URL,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;
use uuid::Uuid;

use crate::ApplicationError;

pub const DEFAULT_EXPECTED_LANGUAGES: [&str; 4] = ["English", "Arabic", "Hindi", "Urdu"];
pub const DATA_URI_PREFIX: &str = "data:audio/mp3;base64,";
/// References starting with this literal are sent as-is; anything else is a local path.
pub const REMOTE_PREFIX: &str = "http";

/// Values applied to fields the caller left out.
///
/// `max_recording_bytes` caps the size of a local recording before it is
/// inlined; `u64::MAX` turns the check off and leaves enforcement to the API.
#[derive(Debug, Clone)]
pub struct PayloadDefaults {
    pub project_id: String,
    pub expected_languages: Vec<String>,
    pub max_recording_bytes: u64,
}

impl PayloadDefaults {
    pub fn new(project_id: impl Into<String>, max_recording_bytes: u64) -> Self {
        Self {
            project_id: project_id.into(),
            expected_languages: DEFAULT_EXPECTED_LANGUAGES
                .iter()
                .map(|language| language.to_string())
                .collect(),
            max_recording_bytes,
        }
    }
}

/// Merges options with the recording reference and fills every missing
/// required field. Never touches a key the caller already set.
pub fn build_payload(
    recording_reference: &str,
    options: AnalysisOptions,
    defaults: &PayloadDefaults,
) -> Result<AnalysisPayload, ApplicationError> {
    if recording_reference.is_empty() {
        return Err(ApplicationError::Validation(
            "recording reference must not be empty".to_string(),
        ));
    }

    let mut payload = options.into_payload();
    payload.insert_if_absent_with(RECORDING_URL, || Value::from(recording_reference));
    payload.insert_if_absent_with(EXPECTED_LANGUAGES, || {
        Value::from(defaults.expected_languages.clone())
    });
    payload.insert_if_absent_with(PROJECT_ID, || Value::from(defaults.project_id.clone()));
    // Each missing identifier gets its own UUID.
    for key in [CLIENT_ID, CALLER, FROM] {
        payload.insert_if_absent_with(key, || Value::from(Uuid::new_v4().to_string()));
    }

    Ok(payload)
}

/// Replaces a local-path `recording_url` with an inline data URI.
pub fn resolve_recording(
    payload: &mut AnalysisPayload,
    max_recording_bytes: u64,
) -> Result<(), ApplicationError> {
    let path = match payload.recording_url() {
        Some(reference) if reference.starts_with(REMOTE_PREFIX) => return Ok(()),
        Some(reference) => PathBuf::from(reference),
        None => {
            return Err(ApplicationError::Validation(format!(
                "`{RECORDING_URL}` must be a string"
            )))
        }
    };

    let data_uri = encode_recording(&path, max_recording_bytes)?;
    payload.insert(RECORDING_URL, data_uri);
    Ok(())
}

pub fn encode_recording(path: &Path, max_recording_bytes: u64) -> Result<String, DomainError> {
    let metadata = fs::metadata(path).map_err(|source| DomainError::file_access(path, source))?;
    if metadata.len() > max_recording_bytes {
        return Err(DomainError::RecordingTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: max_recording_bytes,
        });
    }

    let bytes = fs::read(path).map_err(|source| DomainError::file_access(path, source))?;
    tracing::debug!(
        path = %path.display(),
        recording_bytes = bytes.len(),
        "encoding local recording"
    );

    Ok(format!("{DATA_URI_PREFIX}{}", STANDARD.encode(bytes)))
}

/// Compact JSON for logs, with any inline data URI shortened to its length.
pub fn loggable(payload: &AnalysisPayload) -> String {
    match payload.recording_url() {
        Some(url) if url.starts_with("data:") => {
            let encoded_len = url.strip_prefix(DATA_URI_PREFIX).unwrap_or(url).len();
            let mut shortened = payload.clone();
            shortened.insert(RECORDING_URL, format!("{DATA_URI_PREFIX}<{encoded_len} chars>"));
            shortened.to_string()
        }
        _ => payload.to_string(),
    }
}
