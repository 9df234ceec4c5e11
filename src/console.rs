//! Colored console output for diagnostics and listings.

use crate::notifier::Notifier;
use crate::settings::Settings;
use crate::types::{DiagnosticReport, Result};
use colored::Colorize;
use std::io::{self, Write};
use std::sync::Arc;

/// Console output handler with colors and formatting.
pub struct ConsoleOutput {
    json_mode: bool,
}

impl ConsoleOutput {
    /// Create a new console output handler.
    pub fn new(json_mode: bool) -> Self {
        Self { json_mode }
    }

    /// Print the diagnostics report to stdout.
    pub fn print_diagnostics(&self, reports: &[DiagnosticReport]) -> Result<()> {
        let stdout = io::stdout();
        self.write_diagnostics(&mut stdout.lock(), reports)
    }

    /// Write the diagnostics report, one block per notifier.
    pub fn write_diagnostics<W: Write>(&self, out: &mut W, reports: &[DiagnosticReport]) -> Result<()> {
        if self.json_mode {
            let json = serde_json::to_string_pretty(reports)?;
            writeln!(out, "{}", json)?;
            return Ok(());
        }

        writeln!(out, "Running notifier diagnostics...")?;
        writeln!(out)?;

        for report in reports {
            let status = if report.available {
                "AVAILABLE".green().bold()
            } else {
                "NOT AVAILABLE".red().bold()
            };
            let enabled = if report.enabled {
                "ENABLED".green()
            } else {
                "DISABLED".dimmed()
            };

            writeln!(out, "Notifier: {} ({})", report.name.bright_white(), report.id)?;
            writeln!(out, "Status: {}", status)?;
            writeln!(out, "Configuration: {}", enabled)?;
            writeln!(out, "Details: {}", report.details)?;
            writeln!(out)?;
        }

        Ok(())
    }

    /// Write every backend with its id, marking the enabled ones.
    pub fn write_notifiers<W: Write>(
        &self,
        out: &mut W,
        notifiers: &[Arc<dyn Notifier>],
        settings: &Settings,
    ) -> Result<()> {
        for notifier in notifiers {
            let marker = if settings.is_enabled(notifier.id()) {
                "[*]".bright_blue()
            } else {
                "[ ]".dimmed()
            };
            writeln!(out, "{} {} ({})", marker, notifier.name(), notifier.id())?;
        }
        Ok(())
    }

    /// Write configuration file names, one per line.
    pub fn write_config_files<W: Write>(&self, out: &mut W, files: &[String]) -> Result<()> {
        for file in files {
            writeln!(out, "{}", file)?;
        }
        Ok(())
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false)
    }
}
