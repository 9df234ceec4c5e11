//! Notifier backends and the compiled-in registry.
//!
//! Every backend implements [`Notifier`]. The registry lists them in a fixed
//! order (audio, then dialog) and filters them by the ids enabled in the
//! configuration file.

pub mod audio;
mod command;
pub mod dialog;

pub use audio::AudioNotifier;
pub use dialog::DialogNotifier;

use crate::settings::Settings;
use crate::types::{DiagnosticResult, NotificationRequest, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// A delivery mechanism for notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification.
    async fn notify(&self, request: &NotificationRequest) -> Result<()>;

    /// Check whether this backend can run on the current system.
    ///
    /// Never fails: problems are reported through [`DiagnosticResult`].
    async fn diagnose(&self) -> DiagnosticResult;

    /// Human-readable label.
    fn name(&self) -> &str;

    /// Short key used in `enabledNotifiers`.
    fn id(&self) -> &str;
}

/// All known backends in registration order.
pub fn all_notifiers() -> Vec<Arc<dyn Notifier>> {
    vec![
        Arc::new(AudioNotifier::new()),
        Arc::new(DialogNotifier::new()),
    ]
}

/// Backends whose id appears in the configuration, in registration order.
///
/// Unknown ids in the configuration are ignored.
pub fn enabled_notifiers(settings: &Settings) -> Vec<Arc<dyn Notifier>> {
    filter_enabled(all_notifiers(), settings)
}

/// Keep the notifiers of `registry` that `settings` enables, in order.
pub fn filter_enabled(
    registry: Vec<Arc<dyn Notifier>>,
    settings: &Settings,
) -> Vec<Arc<dyn Notifier>> {
    registry
        .into_iter()
        .filter(|n| settings.is_enabled(n.id()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(notifiers: &[Arc<dyn Notifier>]) -> Vec<&str> {
        notifiers.iter().map(|n| n.id()).collect()
    }

    #[test]
    fn test_all_notifiers() {
        let notifiers = all_notifiers();
        assert_eq!(notifiers.len(), 2);
        assert_eq!(ids(&notifiers), vec!["audio", "dialog"]);
    }

    #[test]
    fn test_enabled_notifiers_single() {
        let settings = Settings::with_enabled(["audio"]);
        let enabled = enabled_notifiers(&settings);
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].id(), "audio");
    }

    #[test]
    fn test_enabled_notifiers_keeps_registry_order() {
        let settings = Settings::with_enabled(["dialog", "audio"]);
        assert_eq!(ids(&enabled_notifiers(&settings)), vec!["audio", "dialog"]);
    }

    #[test]
    fn test_enabled_notifiers_ignores_unknown_ids() {
        let settings = Settings::with_enabled(["pager", "dialog", "email"]);
        assert_eq!(ids(&enabled_notifiers(&settings)), vec!["dialog"]);

        let settings = Settings::with_enabled(["pager"]);
        assert!(enabled_notifiers(&settings).is_empty());
    }

    #[test]
    fn test_enabled_notifiers_empty_config() {
        assert!(enabled_notifiers(&Settings::default()).is_empty());
    }
}
