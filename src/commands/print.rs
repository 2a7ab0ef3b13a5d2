//! Print command implementation
//!
//! Hands a downloaded map to an external print command (e.g. `/usr/bin/lpr`).
//! Unlike download failures, a failed print stops the whole run.

use log::info;
use std::path::Path;
use tokio::process::Command;

use crate::errors::AppError;

/// Print a map if a print command is configured
///
/// The command is run with the map's path as its only argument and must exit
/// successfully.
///
/// # Arguments
///
/// * `path` - The map to print
/// * `print_command` - The executable to run, `None` or empty to skip printing
///
/// # Returns
///
/// `Ok(true)` if the map was printed, `Ok(false)` if printing is disabled.
///
/// # Errors
///
/// Returns an error if the command cannot be started or exits unsuccessfully.
pub async fn print_if_configured(
    path: &Path,
    print_command: Option<&str>,
) -> Result<bool, AppError> {
    let command = match print_command {
        Some(command) if !command.is_empty() => command,
        _ => return Ok(false),
    };

    info!("Printing {}", path.display());

    let status = Command::new(command)
        .arg(path)
        .status()
        .await
        .map_err(|source| AppError::PrintSpawn {
            command: command.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(AppError::PrintFailed {
            command: command.to_string(),
            path: path.to_path_buf(),
            status,
        });
    }

    Ok(true)
}
