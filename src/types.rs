//! Core types and errors shared by the notifier backends and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while loading configuration or delivering notifications.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No enabled notifiers found in configuration")]
    NoEnabledNotifiers,

    #[error("The '{program}' command is not available: {source}")]
    CommandNotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("Failed to start '{program}': {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}{}", format_stderr(.stderr))]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{notifier} did not finish within {secs}s")]
    Timeout { notifier: String, secs: u64 },
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

pub type Result<T> = std::result::Result<T, NotifyError>;

/// Kind of notification, selecting the emoji, spoken label and dialog icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum NotificationType {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Success => "success",
            NotificationType::Error => "error",
            NotificationType::Info => "info",
            NotificationType::Warning => "warning",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single notification, shared read-only by every backend that delivers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Text supplied by the user.
    pub message: String,
    /// Notification kind.
    pub kind: NotificationType,
    /// Dialog title. Backends without a title ignore it.
    pub title: String,
}

impl NotificationRequest {
    pub fn new(message: impl Into<String>, kind: NotificationType, title: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            title: title.into(),
        }
    }
}

/// Outcome of a backend self-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticResult {
    pub available: bool,
    pub message: String,
}

impl DiagnosticResult {
    pub fn available(message: impl Into<String>) -> Self {
        Self {
            available: true,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            available: false,
            message: message.into(),
        }
    }
}

/// One row of the diagnostics report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub id: String,
    pub name: String,
    pub available: bool,
    pub enabled: bool,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_type_parses_lowercase_names() {
        use clap::ValueEnum;

        assert_eq!(
            NotificationType::from_str("warning", false).unwrap(),
            NotificationType::Warning
        );
        assert!(NotificationType::from_str("loud", false).is_err());
        assert!(NotificationType::from_str("Error", false).is_err());
    }

    #[test]
    fn test_notification_type_display() {
        assert_eq!(NotificationType::Error.to_string(), "error");
        assert_eq!(NotificationType::default(), NotificationType::Info);
    }

    #[test]
    fn test_no_enabled_notifiers_message() {
        let err = NotifyError::NoEnabledNotifiers;
        assert_eq!(err.to_string(), "No enabled notifiers found in configuration");
    }

    #[test]
    fn test_timeout_message() {
        let err = NotifyError::Timeout {
            notifier: "Audio (say)".to_string(),
            secs: 5,
        };
        assert_eq!(err.to_string(), "Audio (say) did not finish within 5s");
    }
}
