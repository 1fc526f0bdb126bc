//! Outcome of a single external query.
//!
//! Queries never raise: every way a command can fail collapses into
//! [`QueryOutcome::Unavailable`], which the report builder turns into
//! placeholder fields. Keeping the failure as a value (instead of discarding
//! it) lets tests and verbose output see why a section degraded.

use serde_json::{Map, Value};
use thiserror::Error;

use super::section::ParseMode;
use crate::ports::{CommandError, CommandOutput};

/// Why a query produced no usable data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryFailure {
    /// The command could not be started or waited on.
    #[error("{0}")]
    Invocation(String),

    #[error("command timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("command exited with {}", describe_exit(.code))]
    ExitStatus { code: Option<i32> },

    #[error("command produced no output")]
    Empty,

    #[error("output is not valid JSON: {0}")]
    Malformed(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(|| "no status (killed by signal)".to_string(), |c| format!("status {c}"))
}

impl From<CommandError> for QueryFailure {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::TimedOut { timeout, .. } => Self::Timeout {
                after_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            },
            other => Self::Invocation(other.to_string()),
        }
    }
}

/// Parsed result of one external query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Structured output parsed from JSON.
    Data(Value),
    /// Trimmed text output for [`ParseMode::Text`] queries.
    Text(String),
    /// The query failed; the section falls back to placeholders.
    Unavailable(QueryFailure),
}

impl QueryOutcome {
    /// Interpret a command result according to `mode`.
    ///
    /// Spawn errors, timeouts, non-zero exits, empty output and malformed
    /// JSON all map to [`QueryOutcome::Unavailable`].
    pub fn from_command(mode: ParseMode, result: Result<CommandOutput, CommandError>) -> Self {
        let output = match result {
            Ok(output) => output,
            Err(err) => return Self::Unavailable(err.into()),
        };

        if !output.succeeded() {
            return Self::Unavailable(QueryFailure::ExitStatus {
                code: output.status_code,
            });
        }

        Self::parse(mode, &output.stdout)
    }

    /// Parse captured text.
    pub fn parse(mode: ParseMode, text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::Unavailable(QueryFailure::Empty);
        }

        match mode {
            ParseMode::Text => Self::Text(trimmed.to_string()),
            ParseMode::Json => match serde_json::from_str::<Value>(trimmed) {
                Ok(Value::Null) => Self::Unavailable(QueryFailure::Empty),
                Ok(value) => Self::Data(value),
                Err(e) => Self::Unavailable(QueryFailure::Malformed(e.to_string())),
            },
        }
    }

    /// The parsed mapping, if the output was a JSON object.
    pub fn object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Data(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&QueryFailure> {
        match self {
            Self::Unavailable(failure) => Some(failure),
            _ => None,
        }
    }

    pub const fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_parse_json_object() {
        let outcome = QueryOutcome::parse(ParseMode::Json, r#"{"percentage": 87}"#);
        let map = outcome.object().expect("object");
        assert_eq!(map["percentage"], 87);
    }

    #[test]
    fn test_parse_whitespace_is_empty() {
        let outcome = QueryOutcome::parse(ParseMode::Json, "  \n\t");
        assert_eq!(outcome.failure(), Some(&QueryFailure::Empty));
        assert!(outcome.object().is_none());
    }

    #[test]
    fn test_parse_malformed_json() {
        let outcome = QueryOutcome::parse(ParseMode::Json, "Termux API not installed");
        assert!(matches!(
            outcome,
            QueryOutcome::Unavailable(QueryFailure::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_json_null_is_empty() {
        let outcome = QueryOutcome::parse(ParseMode::Json, "null");
        assert_eq!(outcome.failure(), Some(&QueryFailure::Empty));
    }

    #[test]
    fn test_parse_text_is_trimmed() {
        let outcome = QueryOutcome::parse(ParseMode::Text, " 128\n");
        assert_eq!(outcome, QueryOutcome::Text("128".to_string()));
    }

    #[test]
    fn test_non_zero_exit_is_unavailable() {
        let output = CommandOutput {
            status_code: Some(1),
            stdout: r#"{"ssid": "home"}"#.to_string(),
            stderr: String::new(),
        };
        let outcome = QueryOutcome::from_command(ParseMode::Json, Ok(output));
        assert_eq!(
            outcome.failure(),
            Some(&QueryFailure::ExitStatus { code: Some(1) })
        );
    }

    #[test]
    fn test_timeout_maps_to_timeout_failure() {
        let err = CommandError::TimedOut {
            program: "termux-volume".to_string(),
            timeout: Duration::from_millis(250),
        };
        let outcome = QueryOutcome::from_command(ParseMode::Json, Err(err));
        assert_eq!(
            outcome.failure(),
            Some(&QueryFailure::Timeout { after_ms: 250 })
        );
    }

    #[test]
    fn test_spawn_error_is_invocation_failure() {
        let err = CommandError::Spawn {
            program: "termux-info".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let outcome = QueryOutcome::from_command(ParseMode::Json, Err(err));
        let failure = outcome.failure().expect("failure");
        assert!(failure.to_string().contains("termux-info"));
        assert!(!outcome.is_available());
    }

    #[test]
    fn test_signal_exit_description() {
        let failure = QueryFailure::ExitStatus { code: None };
        assert_eq!(
            failure.to_string(),
            "command exited with no status (killed by signal)"
        );
    }
}
