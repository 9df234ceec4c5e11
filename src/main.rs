//! notify - send a message through desktop notifiers.
//!
//! CLI entry point.

use clap::Parser;
use notify::config::NotifiersConfig;
use notify::settings::{self, DEFAULT_TITLE};
use notify::{
    all_notifiers, Commands, Config, ConfigCommands, ConsoleOutput, DiagnoseConfig, InitConfig,
    NotificationRequest, NotifyError, SendConfig, Settings,
};
use std::io;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("notify=debug,info")
    } else {
        EnvFilter::new("notify=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let result = match config.command {
        None => run_send(config.send).await,
        Some(Commands::Send(send_config)) => run_send(send_config).await,
        Some(Commands::Diagnose(diagnose_config)) => run_diagnose(diagnose_config).await,
        Some(Commands::Config(ConfigCommands::Init(init_config))) => run_init(init_config),
        Some(Commands::Config(ConfigCommands::List)) => run_list_configs(),
        Some(Commands::Notifiers(notifiers_config)) => run_notifiers(notifiers_config),
        Some(Commands::Version) => {
            println!("notify version: {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

fn load_settings(file: Option<&str>) -> Result<Settings, ExitCode> {
    settings::load(file).map_err(|e| {
        error!("Error loading configuration: {}", e);
        ExitCode::FAILURE
    })
}

async fn run_send(send_config: SendConfig) -> Result<(), ExitCode> {
    let Some(message) = send_config.message.clone() else {
        error!("No message specified. Usage: notify [send] [OPTIONS] <MESSAGE>");
        return Err(ExitCode::FAILURE);
    };

    let settings = load_settings(send_config.config.as_deref())?;

    let title = send_config
        .title
        .clone()
        .or_else(|| settings.dialog_title().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let request = NotificationRequest::new(message, send_config.kind, title);

    match notify::send_notification(&settings, request, send_config.timeout()).await {
        Ok(()) => Ok(()),
        Err(NotifyError::NoEnabledNotifiers) => {
            error!(
                "No enabled notifiers found in configuration. \
                 Run `notify notifiers` to see the available ids and `notify diagnose` to check them."
            );
            Err(ExitCode::FAILURE)
        }
        Err(e) => {
            error!("Failed to send notification: {}", e);
            Err(ExitCode::FAILURE)
        }
    }
}

async fn run_diagnose(diagnose_config: DiagnoseConfig) -> Result<(), ExitCode> {
    let settings = load_settings(diagnose_config.config.as_deref())?;
    let reports = notify::run_diagnostics(&settings).await;

    ConsoleOutput::new(diagnose_config.json)
        .print_diagnostics(&reports)
        .map_err(|e| {
            error!("Failed to print diagnostics: {}", e);
            ExitCode::FAILURE
        })
}

fn run_init(init_config: InitConfig) -> Result<(), ExitCode> {
    let path = settings::config_path(Some(&init_config.config));

    if path.exists() && !init_config.force {
        println!(
            "Configuration file {} already exists. Use --force to overwrite.",
            path.display()
        );
        return Ok(());
    }

    if let Err(e) = Settings::initial().save(&path) {
        error!("Error saving configuration: {}", e);
        return Err(ExitCode::FAILURE);
    }

    println!("Created configuration file at {}", path.display());
    Ok(())
}

fn run_list_configs() -> Result<(), ExitCode> {
    let files = settings::list_config_files().map_err(|e| {
        error!("Error listing configuration files: {}", e);
        ExitCode::FAILURE
    })?;

    ConsoleOutput::default()
        .write_config_files(&mut io::stdout().lock(), &files)
        .map_err(|e| {
            error!("Failed to print configuration files: {}", e);
            ExitCode::FAILURE
        })
}

fn run_notifiers(notifiers_config: NotifiersConfig) -> Result<(), ExitCode> {
    // Listing never creates or requires a configuration file.
    let path = settings::config_path(notifiers_config.config.as_deref());
    let settings = settings::read_from(&path);

    ConsoleOutput::default()
        .write_notifiers(&mut io::stdout().lock(), &all_notifiers(), &settings)
        .map_err(|e| {
            error!("Failed to print notifiers: {}", e);
            ExitCode::FAILURE
        })
}
