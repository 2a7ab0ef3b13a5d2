//! Error types for the application
//!
//! This module defines all error types used throughout the application using the
//! `thiserror` crate. Errors fall in two classes: per-level failures (download,
//! storage) which are logged and skipped, and run-level failures (configuration,
//! printing) which stop the run.

use std::{path::PathBuf, process::ExitStatus};

use reqwest::StatusCode;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    /// A requested level is not one of the known map levels
    #[error("Invalid --levels value {value}; expected one of {expected}")]
    InvalidLevel { value: String, expected: String },
    /// The map server answered with something other than 200
    #[error("Unable to download {url}: status {status}: {detail}")]
    DownloadStatus {
        url: String,
        status: StatusCode,
        detail: String,
    },
    /// Writing a downloaded map to disk failed
    #[error("Unable to store {path:?}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The print command could not be started
    #[error("Unable to run print command {command}: {source}")]
    PrintSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The print command ran but did not succeed
    #[error("Print command {command} failed for {path:?}: {status}")]
    PrintFailed {
        command: String,
        path: PathBuf,
        status: ExitStatus,
    },
    /// Every requested level failed to download or store
    #[error("None of the {count} requested map(s) could be downloaded")]
    NoMapsDownloaded { count: usize },
}

impl AppError {
    /// Whether another attempt at the same request could succeed.
    ///
    /// Transport failures and 5xx answers are retryable; anything else is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::HttpError(err) => !err.is_builder() && !err.is_redirect(),
            AppError::DownloadStatus { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}
