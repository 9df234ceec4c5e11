//! notify - send a message through desktop notifiers.
//!
//! A YAML configuration file selects which backends run:
//! - `audio`: speaks the message with `say`
//! - `dialog`: shows a modal dialog with `osascript`
//!
//! Every enabled backend receives the notification concurrently, and a failing
//! backend never stops the others.
//!
//! # Example
//!
//! ```no_run
//! use notify::{settings, send_notification, NotificationRequest, NotificationType};
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = settings::load(None).unwrap();
//!     let request = NotificationRequest::new("Build finished", NotificationType::Success, "CI");
//!     send_notification(&settings, request, None).await.unwrap();
//! }
//! ```

pub mod config;
pub mod console;
pub mod diagnose;
pub mod dispatch;
pub mod formatter;
pub mod notifier;
pub mod settings;
pub mod types;

pub use config::{Commands, Config, ConfigCommands, DiagnoseConfig, InitConfig, SendConfig};
pub use console::ConsoleOutput;
pub use diagnose::run_diagnostics;
pub use dispatch::{dispatch, send_notification};
pub use formatter::format_message;
pub use notifier::{all_notifiers, enabled_notifiers, Notifier};
pub use settings::Settings;
pub use types::{
    DiagnosticReport, DiagnosticResult, NotificationRequest, NotificationType, NotifyError, Result,
};
