//! Spoken notifications through the macOS `say` command.

use super::{command, Notifier};
use crate::formatter::format_message;
use crate::types::{DiagnosticResult, NotificationRequest, Result};
use async_trait::async_trait;

/// Speaks the message aloud.
#[derive(Debug, Clone)]
pub struct AudioNotifier {
    program: String,
}

impl AudioNotifier {
    pub const ID: &'static str = "audio";
    pub const NAME: &'static str = "Audio (say)";

    pub fn new() -> Self {
        Self {
            program: "say".to_string(),
        }
    }

    /// Use a different speech command.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Text handed to the speech command.
    pub fn spoken_text(request: &NotificationRequest) -> String {
        format_message(&request.message, request.kind.as_str(), false)
    }
}

impl Default for AudioNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for AudioNotifier {
    async fn notify(&self, request: &NotificationRequest) -> Result<()> {
        let text = Self::spoken_text(request);
        command::run(&self.program, &[text.as_str()]).await
    }

    async fn diagnose(&self) -> DiagnosticResult {
        let path = match command::lookup(&self.program) {
            Ok(path) => path,
            Err(e) => return DiagnosticResult::unavailable(e.to_string()),
        };

        // `say -v ?` lists one voice per line.
        let output = match command::combined_output(&self.program, &["-v", "?"]).await {
            Ok(output) => output,
            Err(e) => {
                return DiagnosticResult::unavailable(format!(
                    "Error testing the '{}' command: {}",
                    self.program, e
                ));
            }
        };

        DiagnosticResult::available(format!(
            "'{}' command available at: {}. Available voices: {}",
            self.program,
            path.display(),
            output.matches('\n').count()
        ))
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn id(&self) -> &str {
        Self::ID
    }
}
