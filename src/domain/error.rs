use std::io;

use thiserror::Error;

/// Library-wide error type for fundalloc operations.
///
/// Only collaborator failures surface here. Malformed record fields are
/// recovered where they are read and never reach this type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration value is missing or out of range.
    #[error("{0}")]
    Configuration(String),

    /// Configuration file does not exist.
    #[error("Config not found: {0}")]
    ConfigMissing(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The LCD endpoint rejected a query or could not be reached.
    #[error("LCD query failed{}: {message}", status_suffix(.status))]
    LcdQuery { message: String, status: Option<u16> },

    /// A delimited auxiliary file could not be read as a table.
    #[error("Malformed table {path}: {reason}")]
    MalformedTable { path: String, reason: String },

    /// Report rendering failed.
    #[error("Failed to render report: {0}")]
    Render(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|code| format!(" (HTTP {code})")).unwrap_or_default()
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn table<P: Into<String>, R: Into<String>>(path: P, reason: R) -> Self {
        AppError::MalformedTable { path: path.into(), reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcd_query_message_includes_status_when_present() {
        let err = AppError::LcdQuery { message: "Server error".into(), status: Some(503) };
        assert_eq!(err.to_string(), "LCD query failed (HTTP 503): Server error");

        let err = AppError::LcdQuery { message: "connection refused".into(), status: None };
        assert_eq!(err.to_string(), "LCD query failed: connection refused");
    }
}
