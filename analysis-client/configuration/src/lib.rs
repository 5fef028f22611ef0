use std::fmt;

use thiserror::Error;
use tracing_subscriber::{fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub type AppConfig = ClientConfig;

pub const TOKEN_VAR: &str = "token";
pub const PROJECT_ID_VAR: &str = "project_id";
pub const ENDPOINT_VAR: &str = "ANALYSIS_CLIENT_ENDPOINT";
pub const CONNECT_TIMEOUT_VAR: &str = "ANALYSIS_CLIENT_CONNECT_TIMEOUT_MS";
pub const REQUEST_TIMEOUT_VAR: &str = "ANALYSIS_CLIENT_REQUEST_TIMEOUT_MS";
pub const MAX_RECORDING_BYTES_VAR: &str = "ANALYSIS_CLIENT_MAX_RECORDING_BYTES";
pub const LOG_LEVEL_VAR: &str = "ANALYSIS_CLIENT_LOG_LEVEL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable `{0}`")]
    MissingVariable(&'static str),

    #[error("invalid value for `{name}`: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone)]
pub struct ApiConfig {
    pub endpoint: String,
    pub token: String,
    pub project_id: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_recording_bytes: u64,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: String::new(),
            project_id: String::new(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            max_recording_bytes: default_max_recording_bytes(),
        }
    }
}

// Keeps the bearer token out of logs and panics.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("max_recording_bytes", &self.max_recording_bytes)
            .finish()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// `token` and `project_id` are required and must be non-empty; every
    /// other variable falls back to its default when unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::default();

        config.api.token = required(&lookup, TOKEN_VAR)?;
        config.api.project_id = required(&lookup, PROJECT_ID_VAR)?;

        if let Some(endpoint) = optional(&lookup, ENDPOINT_VAR) {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    name: ENDPOINT_VAR,
                    reason: format!("`{endpoint}` is not an http(s) URL"),
                });
            }
            config.api.endpoint = endpoint;
        }
        if let Some(value) = parse_u64(&lookup, CONNECT_TIMEOUT_VAR)? {
            config.api.connect_timeout_ms = value;
        }
        if let Some(value) = parse_u64(&lookup, REQUEST_TIMEOUT_VAR)? {
            config.api.request_timeout_ms = value;
        }
        if let Some(value) = parse_u64(&lookup, MAX_RECORDING_BYTES_VAR)? {
            config.api.max_recording_bytes = value;
        }
        if let Some(level) = optional(&lookup, LOG_LEVEL_VAR) {
            config.logging.level = level;
        }

        Ok(config)
    }
}

/// Reads the process environment once, after loading `.env` if present.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    dotenvy::dotenv().ok();
    ClientConfig::from_lookup(|key| std::env::var(key).ok())
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
/// Output goes to stderr so stdout carries only payload and results. A
/// subscriber that is already installed is left in place.
pub fn setup_logging(config: &ClientConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(log_fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok();
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name).ok_or(ConfigError::MissingVariable(name))
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn parse_u64<F>(lookup: &F, name: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name)
        .map(|raw| {
            raw.trim().parse::<u64>().map_err(|err| ConfigError::InvalidValue {
                name,
                reason: format!("`{raw}` is not a non-negative integer: {err}"),
            })
        })
        .transpose()
}

fn default_endpoint() -> String {
    "https://app.maximizer.ai/pubchat/api/analize".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_request_timeout_ms() -> u64 {
    120_000
}

fn default_max_recording_bytes() -> u64 {
    10_000_000
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn config_defaults_are_deterministic() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.api.endpoint, "https://app.maximizer.ai/pubchat/api/analize");
        assert_eq!(cfg.api.connect_timeout_ms, 10_000);
        assert_eq!(cfg.api.request_timeout_ms, 120_000);
        assert_eq!(cfg.api.max_recording_bytes, 10_000_000);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn required_variables_are_read() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[
            ("token", "secret"),
            ("project_id", "proj-1"),
        ]))
        .expect("config loads");

        assert_eq!(cfg.api.token, "secret");
        assert_eq!(cfg.api.project_id, "proj-1");
    }

    #[test]
    fn missing_token_is_reported_by_name() {
        let err = ClientConfig::from_lookup(lookup_from(&[("project_id", "proj-1")]))
            .expect_err("token is required");

        assert!(matches!(err, ConfigError::MissingVariable("token")));
        assert!(err.to_string().contains("`token`"));
    }

    #[test]
    fn blank_project_id_counts_as_missing() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            ("token", "secret"),
            ("project_id", "  "),
        ]))
        .expect_err("project_id is required");

        assert!(matches!(err, ConfigError::MissingVariable("project_id")));
    }

    #[test]
    fn numeric_overrides_are_applied() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[
            ("token", "secret"),
            ("project_id", "proj-1"),
            (CONNECT_TIMEOUT_VAR, "500"),
            (REQUEST_TIMEOUT_VAR, "2000"),
            (MAX_RECORDING_BYTES_VAR, "1024"),
            (ENDPOINT_VAR, "http://127.0.0.1:9000/analize"),
        ]))
        .expect("config loads");

        assert_eq!(cfg.api.connect_timeout_ms, 500);
        assert_eq!(cfg.api.request_timeout_ms, 2_000);
        assert_eq!(cfg.api.max_recording_bytes, 1_024);
        assert_eq!(cfg.api.endpoint, "http://127.0.0.1:9000/analize");
    }

    #[test]
    fn malformed_number_is_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            ("token", "secret"),
            ("project_id", "proj-1"),
            (REQUEST_TIMEOUT_VAR, "soon"),
        ]))
        .expect_err("not a number");

        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: REQUEST_TIMEOUT_VAR,
                ..
            }
        ));
    }

    #[test]
    fn logging_setup_tolerates_repeat_calls() {
        let cfg = ClientConfig::default();
        setup_logging(&cfg);
        setup_logging(&cfg);
    }

    #[test]
    fn debug_output_hides_token() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[
            ("token", "very-secret"),
            ("project_id", "proj-1"),
        ]))
        .expect("config loads");

        assert!(!format!("{cfg:?}").contains("very-secret"));
    }
}
