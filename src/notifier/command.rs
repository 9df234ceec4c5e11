//! Thin wrappers over `tokio::process` used by the backends.

use crate::types::{NotifyError, Result};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Resolve `program` on the executable search path.
pub fn lookup(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|source| NotifyError::CommandNotFound {
        program: program.to_string(),
        source,
    })
}

fn command(program: &str, args: &[&str]) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);
    cmd
}

/// Run `program` to completion, discarding stdout.
///
/// Fails if the process cannot be started or exits non-zero; stderr is kept
/// for the error message.
pub async fn run(program: &str, args: &[&str]) -> Result<()> {
    debug!("Running {} with {} argument(s)", program, args.len());

    let output = command(program, args)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| NotifyError::CommandSpawn {
            program: program.to_string(),
            source,
        })?;

    if output.status.success() {
        Ok(())
    } else {
        Err(NotifyError::CommandFailed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Run `program` to completion and return stdout followed by stderr.
pub async fn combined_output(program: &str, args: &[&str]) -> Result<String> {
    debug!("Capturing output of {} {:?}", program, args);

    let output = command(program, args)
        .output()
        .await
        .map_err(|source| NotifyError::CommandSpawn {
            program: program.to_string(),
            source,
        })?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    if output.status.success() {
        Ok(text)
    } else {
        Err(NotifyError::CommandFailed {
            program: program.to_string(),
            status: output.status,
            stderr: text.trim().to_string(),
        })
    }
}
