//! Self-checks for every registered notifier.

use crate::notifier::{all_notifiers, Notifier};
use crate::settings::Settings;
use crate::types::DiagnosticReport;
use std::sync::Arc;
use tracing::debug;

/// Run `diagnose` on each notifier in order and note whether it is enabled.
pub async fn collect_reports(
    notifiers: &[Arc<dyn Notifier>],
    settings: &Settings,
) -> Vec<DiagnosticReport> {
    let mut reports = Vec::with_capacity(notifiers.len());

    for notifier in notifiers {
        let result = notifier.diagnose().await;
        debug!(
            "Diagnosed {}: available={}",
            notifier.id(),
            result.available
        );

        reports.push(DiagnosticReport {
            id: notifier.id().to_string(),
            name: notifier.name().to_string(),
            available: result.available,
            enabled: settings.is_enabled(notifier.id()),
            details: result.message,
        });
    }

    reports
}

/// Diagnose every backend in the registry, enabled or not.
pub async fn run_diagnostics(settings: &Settings) -> Vec<DiagnosticReport> {
    collect_reports(&all_notifiers(), settings).await
}
