use analysis_domain::{AnalysisOptions, CallDirection};
use clap::{Parser, ValueEnum};
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(name = "analyze-call", version, about = "Submit a call recording for analysis")]
pub struct Cli {
    /// Public recording URL, or a local audio file path to inline as base64.
    pub recording: String,

    #[arg(long)]
    pub client_id: Option<String>,

    /// Client phone id or number.
    #[arg(long)]
    pub caller: Option<String>,

    /// Client name.
    #[arg(long = "from", value_name = "NAME")]
    pub from: Option<String>,

    /// Overrides the `project_id` environment variable for this call.
    #[arg(long)]
    pub project_id: Option<String>,

    /// Repeat to list every language expected in the call.
    #[arg(long = "expected-language", value_name = "LANGUAGE")]
    pub expected_languages: Vec<String>,

    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,

    /// Call start date and time.
    #[arg(long)]
    pub timestamp: Option<String>,

    /// JSON array of CRM tasks for the client.
    #[arg(long, value_name = "JSON", value_parser = parse_json_list)]
    pub client_tasks: Option<JsonList>,

    /// JSON array describing the client's earlier calls.
    #[arg(long, value_name = "JSON", value_parser = parse_json_list)]
    pub previous_calls_logs: Option<JsonList>,

    /// Extra payload field. Values that are not valid JSON are sent as strings.
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, Value)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Inbound,
    Outbound,
}

impl From<DirectionArg> for CallDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Inbound => CallDirection::Inbound,
            DirectionArg::Outbound => CallDirection::Outbound,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonList(pub Vec<Value>);

impl Cli {
    /// Splits the invocation into the recording reference and request options.
    pub fn into_request(self) -> (String, AnalysisOptions) {
        let mut options = AnalysisOptions::new();
        for (key, value) in self.fields {
            options = options.with_field(key, value);
        }

        options.client_id = self.client_id;
        options.caller = self.caller;
        options.from = self.from;
        options.project_id = self.project_id;
        options.timestamp = self.timestamp;
        options.direction = self.direction.map(CallDirection::from);
        options.client_tasks = self.client_tasks.map(|list| list.0);
        options.previous_calls_logs = self.previous_calls_logs.map(|list| list.0);
        if !self.expected_languages.is_empty() {
            options.expected_languages = Some(self.expected_languages);
        }

        (self.recording, options)
    }
}

fn parse_json_list(raw: &str) -> Result<JsonList, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => Ok(JsonList(items)),
        Ok(_) => Err("expected a JSON array".to_string()),
        Err(err) => Err(format!("invalid JSON: {err}")),
    }
}

fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("`{raw}` is not KEY=VALUE"))?;
    if key.is_empty() {
        return Err("field key must not be empty".to_string());
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_recording_leaves_every_option_unset() {
        let cli = Cli::try_parse_from(["analyze-call", "call.mp3"]).expect("parses");

        let (recording, options) = cli.into_request();

        assert_eq!(recording, "call.mp3");
        assert_eq!(options, AnalysisOptions::new());
    }

    #[test]
    fn repeated_languages_keep_their_order() {
        let cli = Cli::try_parse_from([
            "analyze-call",
            "call-cut.mp3",
            "--client-id",
            "addjo30-2er3fvd",
            "--expected-language",
            "English",
            "--expected-language",
            "Arabic",
        ])
        .expect("parses");

        let (_, options) = cli.into_request();

        assert_eq!(options.client_id.as_deref(), Some("addjo30-2er3fvd"));
        assert_eq!(
            options.expected_languages,
            Some(vec!["English".to_string(), "Arabic".to_string()])
        );
    }

    #[test]
    fn structured_arguments_are_parsed_as_json() {
        let cli = Cli::try_parse_from([
            "analyze-call",
            "https://cdn.example/call.mp3",
            "--direction",
            "outbound",
            "--client-tasks",
            r#"[{"title": "follow up"}]"#,
            "--field",
            "priority=2",
            "--field",
            "agent=Sara",
        ])
        .expect("parses");

        let (_, options) = cli.into_request();
        let payload = options.into_payload();

        assert_eq!(payload.get_str("direction"), Some("OUTBOUND"));
        assert_eq!(payload.get("client_tasks"), Some(&json!([{"title": "follow up"}])));
        assert_eq!(payload.get("priority"), Some(&json!(2)));
        assert_eq!(payload.get("agent"), Some(&json!("Sara")));
    }

    #[test]
    fn non_array_task_list_is_rejected() {
        let result = Cli::try_parse_from([
            "analyze-call",
            "call.mp3",
            "--client-tasks",
            r#"{"title": "follow up"}"#,
        ]);

        assert!(result.is_err());
    }
}
