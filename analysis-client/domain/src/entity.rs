use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::DomainError;

pub const RECORDING_URL: &str = "recording_url";
pub const EXPECTED_LANGUAGES: &str = "expected_languages";
pub const PROJECT_ID: &str = "project_id";
pub const CLIENT_ID: &str = "client_id";
pub const CALLER: &str = "caller";
pub const FROM: &str = "from";
pub const DIRECTION: &str = "direction";
pub const TIMESTAMP: &str = "timestamp";
pub const CLIENT_TASKS: &str = "client_tasks";
pub const PREVIOUS_CALLS_LOGS: &str = "previous_calls_logs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallDirection {
    Inbound,
    Outbound,
}

impl CallDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallDirection::Inbound => "INBOUND",
            CallDirection::Outbound => "OUTBOUND",
        }
    }
}

/// JSON body sent to the analysis endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisPayload(Map<String, Value>);

impl AnalysisPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Inserts the value produced by `value` only when `key` is absent.
    /// Returns whether an insert happened.
    pub fn insert_if_absent_with<F>(&mut self, key: &str, value: F) -> bool
    where
        F: FnOnce() -> Value,
    {
        if self.0.contains_key(key) {
            return false;
        }
        self.0.insert(key.to_string(), value());
        true
    }

    pub fn recording_url(&self) -> Option<&str> {
        self.get_str(RECORDING_URL)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for AnalysisPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl fmt::Display for AnalysisPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Caller-supplied request fields. Unset fields are left out of the payload
/// so that defaults can be applied later.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisOptions {
    pub recording_url: Option<String>,
    pub expected_languages: Option<Vec<String>>,
    pub project_id: Option<String>,
    pub client_id: Option<String>,
    pub caller: Option<String>,
    pub from: Option<String>,
    pub direction: Option<CallDirection>,
    pub timestamp: Option<String>,
    pub client_tasks: Option<Vec<Value>>,
    pub previous_calls_logs: Option<Vec<Value>>,
    pub extra: Map<String, Value>,
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expected_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_direction(mut self, direction: CallDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn with_client_tasks(mut self, tasks: Vec<Value>) -> Self {
        self.client_tasks = Some(tasks);
        self
    }

    pub fn with_previous_calls_logs(mut self, logs: Vec<Value>) -> Self {
        self.previous_calls_logs = Some(logs);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Typed fields take precedence over `extra` entries with the same key.
    pub fn into_payload(self) -> AnalysisPayload {
        let mut payload = AnalysisPayload::from(self.extra);

        if let Some(url) = self.recording_url {
            payload.insert(RECORDING_URL, url);
        }
        if let Some(languages) = self.expected_languages {
            payload.insert(EXPECTED_LANGUAGES, languages);
        }
        if let Some(project_id) = self.project_id {
            payload.insert(PROJECT_ID, project_id);
        }
        if let Some(client_id) = self.client_id {
            payload.insert(CLIENT_ID, client_id);
        }
        if let Some(caller) = self.caller {
            payload.insert(CALLER, caller);
        }
        if let Some(from) = self.from {
            payload.insert(FROM, from);
        }
        if let Some(direction) = self.direction {
            payload.insert(DIRECTION, direction.as_str());
        }
        if let Some(timestamp) = self.timestamp {
            payload.insert(TIMESTAMP, timestamp);
        }
        if let Some(tasks) = self.client_tasks {
            payload.insert(CLIENT_TASKS, tasks);
        }
        if let Some(logs) = self.previous_calls_logs {
            payload.insert(PREVIOUS_CALLS_LOGS, logs);
        }

        payload
    }
}

/// Raw outcome of one POST: status code and body text, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResponse {
    pub status: u16,
    pub body: String,
}

impl AnalysisResponse {
    pub const SUCCESS_STATUS: u16 = 200;

    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Self::SUCCESS_STATUS
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    pub fn into_result(self) -> Result<Self, DomainError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(DomainError::Api {
                status: self.status,
                body: self.body,
            })
        }
    }
}
