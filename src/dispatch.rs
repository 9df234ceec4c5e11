//! Concurrent fan-out of one notification to every enabled backend.

use crate::notifier::{all_notifiers, filter_enabled, Notifier};
use crate::settings::Settings;
use crate::types::{NotificationRequest, NotifyError, Result};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Deliver `request` through every notifier concurrently and wait for all of them.
///
/// Each backend runs on its own task; a failure is logged with the backend's
/// name and does not affect the others. Nothing is returned: the log is the
/// only record of a failed delivery.
pub async fn dispatch(
    request: NotificationRequest,
    notifiers: Vec<Arc<dyn Notifier>>,
    timeout: Option<Duration>,
) {
    let request = Arc::new(request);
    debug!(
        "Dispatching {} notification to {} notifier(s)",
        request.kind,
        notifiers.len()
    );

    let mut names = Vec::with_capacity(notifiers.len());
    let mut handles = Vec::with_capacity(notifiers.len());
    for notifier in notifiers {
        let request = Arc::clone(&request);
        names.push(notifier.name().to_string());
        handles.push(tokio::spawn(async move {
            match deliver(notifier.as_ref(), &request, timeout).await {
                Ok(()) => debug!("Notified with {}", notifier.name()),
                Err(e) => warn!("Error notifying with {}: {}", notifier.name(), e),
            }
        }));
    }

    // Delivery errors are logged by their own task; only panics surface here.
    for (name, result) in names.iter().zip(join_all(handles).await) {
        if let Err(e) = result {
            warn!("Error notifying with {}: task failed: {}", name, e);
        }
    }
}

async fn deliver(
    notifier: &dyn Notifier,
    request: &NotificationRequest,
    timeout: Option<Duration>,
) -> Result<()> {
    match timeout {
        None => notifier.notify(request).await,
        Some(limit) => match tokio::time::timeout(limit, notifier.notify(request)).await {
            Ok(result) => result,
            Err(_) => Err(NotifyError::Timeout {
                notifier: notifier.name().to_string(),
                secs: limit.as_secs(),
            }),
        },
    }
}

/// Send `request` through the notifiers enabled in `settings`.
///
/// Fails with [`NotifyError::NoEnabledNotifiers`] before touching any backend
/// when the configuration enables none of them. Individual delivery failures
/// are logged by [`dispatch`] and never surface here.
pub async fn send_notification(
    settings: &Settings,
    request: NotificationRequest,
    timeout: Option<Duration>,
) -> Result<()> {
    send_with(all_notifiers(), settings, request, timeout).await
}

/// Like [`send_notification`], choosing from `registry` instead of the built-in backends.
pub async fn send_with(
    registry: Vec<Arc<dyn Notifier>>,
    settings: &Settings,
    request: NotificationRequest,
    timeout: Option<Duration>,
) -> Result<()> {
    let notifiers = filter_enabled(registry, settings);
    if notifiers.is_empty() {
        return Err(NotifyError::NoEnabledNotifiers);
    }
    dispatch(request, notifiers, timeout).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiagnosticResult, NotificationType};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::Barrier;

    /// Records every request it receives and optionally fails.
    struct Recording {
        id: &'static str,
        fail: bool,
        calls: Arc<Mutex<Vec<NotificationRequest>>>,
    }

    impl Recording {
        fn new(
            id: &'static str,
            fail: bool,
        ) -> (Arc<dyn Notifier>, Arc<Mutex<Vec<NotificationRequest>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            let notifier: Arc<dyn Notifier> = Arc::new(Self {
                id,
                fail,
                calls: Arc::clone(&calls),
            });
            (notifier, calls)
        }
    }

    #[async_trait]
    impl Notifier for Recording {
        async fn notify(&self, request: &NotificationRequest) -> Result<()> {
            self.calls.lock().unwrap().push(request.clone());
            if self.fail {
                Err(NotifyError::ConfigError(format!("{} is broken", self.id)))
            } else {
                Ok(())
            }
        }

        async fn diagnose(&self) -> DiagnosticResult {
            DiagnosticResult::available("recording")
        }

        fn name(&self) -> &str {
            self.id
        }

        fn id(&self) -> &str {
            self.id
        }
    }

    /// Waits on a shared barrier, so it only completes if its siblings run too.
    struct Rendezvous {
        barrier: Arc<Barrier>,
        done: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Notifier for Rendezvous {
        async fn notify(&self, _request: &NotificationRequest) -> Result<()> {
            self.barrier.wait().await;
            self.done.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn diagnose(&self) -> DiagnosticResult {
            DiagnosticResult::available("rendezvous")
        }

        fn name(&self) -> &str {
            "rendezvous"
        }

        fn id(&self) -> &str {
            "rendezvous"
        }
    }

    /// Never finishes on its own.
    struct Hanging;

    #[async_trait]
    impl Notifier for Hanging {
        async fn notify(&self, _request: &NotificationRequest) -> Result<()> {
            futures::future::pending::<()>().await;
            Ok(())
        }

        async fn diagnose(&self) -> DiagnosticResult {
            DiagnosticResult::unavailable("hangs")
        }

        fn name(&self) -> &str {
            "hanging"
        }

        fn id(&self) -> &str {
            "hanging"
        }
    }

    fn request() -> NotificationRequest {
        NotificationRequest::new("Build finished", NotificationType::Success, "CI")
    }

    #[tokio::test]
    async fn test_every_notifier_receives_the_request() {
        let (a, a_calls) = Recording::new("a", false);
        let (b, b_calls) = Recording::new("b", false);

        dispatch(request(), vec![a, b], None).await;

        assert_eq!(a_calls.lock().unwrap().as_slice(), &[request()]);
        assert_eq!(b_calls.lock().unwrap().as_slice(), &[request()]);
    }

    #[tokio::test]
    async fn test_failure_does_not_affect_siblings() {
        let (broken, broken_calls) = Recording::new("broken", true);
        let (healthy, healthy_calls) = Recording::new("healthy", false);

        dispatch(request(), vec![broken, healthy], None).await;

        assert_eq!(broken_calls.lock().unwrap().len(), 1);
        assert_eq!(healthy_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_notifiers_run_concurrently() {
        let barrier = Arc::new(Barrier::new(3));
        let done = Arc::new(AtomicUsize::new(0));
        let notifiers: Vec<Arc<dyn Notifier>> = (0..3)
            .map(|_| {
                Arc::new(Rendezvous {
                    barrier: Arc::clone(&barrier),
                    done: Arc::clone(&done),
                }) as Arc<dyn Notifier>
            })
            .collect();

        // Sequential delivery would deadlock on the barrier.
        tokio::time::timeout(Duration::from_secs(5), dispatch(request(), notifiers, None))
            .await
            .expect("dispatch should not deadlock");

        assert_eq!(done.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_timeout_releases_hung_notifier() {
        let (healthy, healthy_calls) = Recording::new("healthy", false);
        let notifiers: Vec<Arc<dyn Notifier>> = vec![Arc::new(Hanging), healthy];

        dispatch(request(), notifiers, Some(Duration::from_millis(50))).await;

        assert_eq!(healthy_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deliver_timeout_error() {
        let err = deliver(&Hanging, &request(), Some(Duration::from_millis(10)))
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_send_without_enabled_notifiers() {
        let settings = Settings::with_enabled(Vec::<String>::new());
        let err = send_notification(&settings, request(), None).await.unwrap_err();
        assert!(matches!(err, NotifyError::NoEnabledNotifiers));

        let settings = Settings::with_enabled(["carrier-pigeon"]);
        let err = send_notification(&settings, request(), None).await.unwrap_err();
        assert!(matches!(err, NotifyError::NoEnabledNotifiers));
    }

    #[tokio::test]
    async fn test_unknown_ids_reach_no_notifier() {
        let (a, a_calls) = Recording::new("a", false);
        let (b, b_calls) = Recording::new("b", false);
        let settings = Settings::with_enabled(["carrier-pigeon"]);

        let err = send_with(vec![a, b], &settings, request(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, NotifyError::NoEnabledNotifiers));
        assert!(a_calls.lock().unwrap().is_empty());
        assert!(b_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_with_only_reaches_enabled_notifiers() {
        let (a, a_calls) = Recording::new("a", false);
        let (b, b_calls) = Recording::new("b", false);
        let settings = Settings::with_enabled(["b"]);

        send_with(vec![a, b], &settings, request(), None).await.unwrap();

        assert!(a_calls.lock().unwrap().is_empty());
        assert_eq!(b_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_send_with_swallows_delivery_errors() {
        let (broken, calls) = Recording::new("broken", true);
        let settings = Settings::with_enabled(["broken"]);
        assert!(send_with(vec![broken], &settings, request(), None).await.is_ok());
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    /// In-memory log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Stays busy until the log shows `needle`, then records whether it did.
    struct WaitsForLog {
        logs: LogBuffer,
        needle: &'static str,
        saw_it: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Notifier for WaitsForLog {
        async fn notify(&self, _request: &NotificationRequest) -> Result<()> {
            for _ in 0..200 {
                if self.logs.contents().contains(self.needle) {
                    self.saw_it.store(1, Ordering::SeqCst);
                    break;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            Ok(())
        }

        async fn diagnose(&self) -> DiagnosticResult {
            DiagnosticResult::available("waiting")
        }

        fn name(&self) -> &str {
            "slow"
        }

        fn id(&self) -> &str {
            "slow"
        }
    }

    // Single-threaded runtime: spawned tasks share the thread-local subscriber.
    #[tokio::test]
    async fn test_failure_is_logged_before_slow_sibling_finishes() {
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let saw_it = Arc::new(AtomicUsize::new(0));
        let slow: Arc<dyn Notifier> = Arc::new(WaitsForLog {
            logs: logs.clone(),
            needle: "Error notifying with broken",
            saw_it: Arc::clone(&saw_it),
        });
        let (broken, _) = Recording::new("broken", true);

        dispatch(request(), vec![slow, broken], None).await;

        assert_eq!(saw_it.load(Ordering::SeqCst), 1, "logs: {}", logs.contents());
        assert_eq!(logs.contents().matches("Error notifying with broken").count(), 1);
    }
}
