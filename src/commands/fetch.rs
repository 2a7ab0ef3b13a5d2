//! Fetch command implementation
//!
//! Downloads one analysis map per requested level into a scratch directory
//! and optionally prints each one. Levels are processed strictly in order.
//!
//! Failure policy:
//! - a level that cannot be downloaded or stored is logged and skipped
//! - a failed print stops the run
//! - a run where no level could be downloaded at all is an error
//!
//! The scratch directory is removed when the run ends, however it ends.

use log::{debug, error, info, warn};
use reqwest::{Client, StatusCode};
use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::Path,
};
use tokio::time::Duration;

use crate::{
    commands::print::print_if_configured,
    config::Config,
    errors::AppError,
    maps::{DownloadTarget, Level},
    utils::{create_run_dir, truncate_detail},
};

const USER_AGENT: &str = concat!("wxbrief/", env!("CARGO_PKG_VERSION"));

/// Longest server response kept in an error message.
const MAX_DETAIL_CHARS: usize = 200;

const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);
const RETRY_MAX_DELAY: Duration = Duration::from_secs(30);

/// What happened to each requested level
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Levels downloaded and written to disk
    pub stored: Vec<Level>,
    /// Levels handed to the print command
    pub printed: Vec<Level>,
    /// Levels skipped because of a download or storage error
    pub failed: Vec<Level>,
}

/// Download (and optionally print) every configured map
///
/// This function:
/// 1. Creates a scratch directory named `wxbrief.*`
/// 2. For each level in order, builds the URL, downloads and stores the map
/// 3. Prints the map if a print command is configured
/// 4. Removes the scratch directory
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client or scratch directory cannot be created
/// - A print command fails (remaining levels are not processed)
/// - None of the levels could be downloaded
pub async fn fetch_maps(config: &Config) -> Result<RunSummary, AppError> {
    info!(
        "Fetching {} map(s) for {} {}",
        config.levels.len(),
        config.date,
        config.hour
    );

    let client = Client::builder().user_agent(USER_AGENT).build()?;
    let run_dir = create_run_dir()?;
    debug!("Using scratch directory {}", run_dir.path().display());

    let result = fetch_into(&client, config, run_dir.path()).await;

    let run_dir_path = run_dir.path().to_path_buf();
    if let Err(err) = run_dir.close() {
        warn!("Unable to remove {}: {}", run_dir_path.display(), err);
    }

    let summary = result?;
    if summary.stored.is_empty() && !summary.failed.is_empty() {
        return Err(AppError::NoMapsDownloaded {
            count: summary.failed.len(),
        });
    }

    info!(
        "Done: {} stored, {} printed, {} failed",
        summary.stored.len(),
        summary.printed.len(),
        summary.failed.len()
    );
    Ok(summary)
}

/// Process every configured level in order, writing maps into `dir`
///
/// Download and storage failures skip the level. A print failure is returned
/// straight away and the remaining levels are left untouched.
async fn fetch_into(client: &Client, config: &Config, dir: &Path) -> Result<RunSummary, AppError> {
    let mut summary = RunSummary::default();

    for &level in &config.levels {
        let target = DownloadTarget::new(&config.base_url, config.date, level, config.hour, dir);

        info!("Downloading level {} ...", target.level.label());

        if download(client, &target, config.retries).await.is_err() {
            warn!("Skipping level {}", level.label());
            summary.failed.push(level);
            continue;
        }
        summary.stored.push(level);

        if print_if_configured(&target.path, config.print_command.as_deref()).await? {
            summary.printed.push(level);
        }
    }

    Ok(summary)
}

/// Fetch one target and write it to its path
///
/// Failures are logged here with the target's path and URL. A partially
/// written file is removed so a failed level leaves nothing behind.
async fn download(client: &Client, target: &DownloadTarget, retries: u32) -> Result<(), AppError> {
    let bytes = fetch(client, &target.url, retries).await.inspect_err(|err| {
        error!(
            "Unable to download {} from {}; error: {}",
            target.path.display(),
            target.url,
            err
        );
    })?;

    if let Err(err) = store(&bytes, &target.path) {
        error!("{}", err);
        match fs::remove_file(&target.path) {
            Err(cleanup) if cleanup.kind() != ErrorKind::NotFound => {
                debug!("Unable to remove {}: {}", target.path.display(), cleanup);
            }
            _ => {}
        }
        return Err(err);
    }

    debug!("Saved {} bytes to {}", bytes.len(), target.path.display());
    Ok(())
}

/// Download a map, retrying transient failures up to `retries` times
///
/// The delay between attempts starts at 500ms and doubles each time.
///
/// # Errors
///
/// Returns [`AppError::DownloadStatus`] for any answer other than 200 and
/// [`AppError::HttpError`] for transport failures.
pub async fn fetch(client: &Client, url: &str, retries: u32) -> Result<Vec<u8>, AppError> {
    let mut attempt = 0;
    loop {
        match fetch_once(client, url).await {
            Ok(bytes) => return Ok(bytes),
            Err(err) if attempt < retries && err.is_retryable() => {
                let delay = RETRY_BASE_DELAY
                    .saturating_mul(2u32.saturating_pow(attempt))
                    .min(RETRY_MAX_DELAY);
                warn!(
                    "Attempt {} of {} failed ({}); retrying in {:?}",
                    attempt + 1,
                    retries + 1,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn fetch_once(client: &Client, url: &str) -> Result<Vec<u8>, AppError> {
    let mut response = client.get(url).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::DownloadStatus {
            url: url.to_string(),
            status,
            detail: truncate_detail(&body, MAX_DETAIL_CHARS),
        });
    }

    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Write `bytes` to a new file at `path`
///
/// The file handle is closed on every return path.
pub fn store(bytes: &[u8], path: &Path) -> Result<(), AppError> {
    let storage_error = |source| AppError::Storage {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(storage_error)?;
    file.write_all(bytes).map_err(storage_error)?;
    file.flush().map_err(storage_error)
}
