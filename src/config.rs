//! Command-line arguments.

use crate::settings::DEFAULT_CONFIG_FILE;
use crate::types::NotificationType;
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

/// Send desktop notifications through speech and dialog backends.
#[derive(Parser, Debug, Clone)]
#[command(name = "notify")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Config {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub send: SendConfig,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Send a notification (the default action)
    Send(SendConfig),
    /// Run self-checks on every notifier
    Diagnose(DiagnoseConfig),
    /// Manage configuration files
    #[command(subcommand)]
    Config(ConfigCommands),
    /// List available notifiers
    Notifiers(NotifiersConfig),
    /// Display version information
    Version,
}

/// Options for sending a notification.
#[derive(Args, Debug, Clone, Default)]
pub struct SendConfig {
    /// Message to deliver
    pub message: Option<String>,

    /// Notification type
    #[arg(short = 't', long = "type", value_enum, default_value_t = NotificationType::Info)]
    pub kind: NotificationType,

    /// Custom title for the dialog
    #[arg(long)]
    pub title: Option<String>,

    /// Configuration file to use (relative to ~/.config/notify)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Give up on a notifier after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl SendConfig {
    /// Per-notifier timeout, if one was requested.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Options for the diagnose command.
#[derive(Args, Debug, Clone, Default)]
pub struct DiagnoseConfig {
    /// Configuration file to use
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for the notifiers command.
#[derive(Args, Debug, Clone, Default)]
pub struct NotifiersConfig {
    /// Configuration file used to mark enabled notifiers
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// List configuration files
    List,
    /// Write a default configuration file
    Init(InitConfig),
}

/// Options for `config init`.
#[derive(Args, Debug, Clone)]
pub struct InitConfig {
    /// Configuration file to create
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}
