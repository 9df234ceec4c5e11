//! Modal dialog notifications through AppleScript (`osascript`).

use super::{command, Notifier};
use crate::formatter::format_message;
use crate::types::{DiagnosticResult, NotificationRequest, Result};
use async_trait::async_trait;

/// Shows a modal dialog with a single OK button.
#[derive(Debug, Clone)]
pub struct DialogNotifier {
    program: String,
    version_program: String,
}

impl DialogNotifier {
    pub const ID: &'static str = "dialog";
    pub const NAME: &'static str = "Dialog (osascript)";

    pub fn new() -> Self {
        Self {
            program: "osascript".to_string(),
            version_program: "sw_vers".to_string(),
        }
    }

    /// Use a different scripting command.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a different command to read the OS version during diagnostics.
    pub fn with_version_program(mut self, program: impl Into<String>) -> Self {
        self.version_program = program.into();
        self
    }

    /// AppleScript icon for a notification kind.
    pub fn icon(kind: &str) -> &'static str {
        match kind {
            "success" | "info" => "note",
            "warning" => "caution",
            _ => "stop",
        }
    }

    /// Build the `display dialog` script for a request.
    pub fn script(request: &NotificationRequest) -> String {
        let kind = request.kind.as_str();
        let message = format_message(&request.message, kind, true);
        format!(
            r#"display dialog "{}" buttons {{"OK"}} default button "OK" with icon {} with title "{}""#,
            escape(&message),
            Self::icon(kind),
            escape(&request.title)
        )
    }
}

impl Default for DialogNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text for an AppleScript string literal.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[async_trait]
impl Notifier for DialogNotifier {
    async fn notify(&self, request: &NotificationRequest) -> Result<()> {
        let script = Self::script(request);
        command::run(&self.program, &["-e", script.as_str()]).await
    }

    async fn diagnose(&self) -> DiagnosticResult {
        let path = match command::lookup(&self.program) {
            Ok(path) => path,
            Err(e) => return DiagnosticResult::unavailable(e.to_string()),
        };

        // The version is informational only.
        match command::combined_output(&self.version_program, &["-productVersion"]).await {
            Ok(version) => DiagnosticResult::available(format!(
                "'{}' command available at: {}. macOS version: {}",
                self.program,
                path.display(),
                version.trim()
            )),
            Err(_) => DiagnosticResult::available(format!(
                "'{}' command available at: {}. Could not determine macOS version.",
                self.program,
                path.display()
            )),
        }
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn id(&self) -> &str {
        Self::ID
    }
}
