//! Run configuration
//!
//! Built once from the command line, validated before any network activity,
//! and read-only afterwards.

use chrono::NaiveDate;
use log::info;

use crate::{
    errors::AppError,
    maps::{Level, SynopticHour},
};

/// Immutable parameters of one run
#[derive(Debug, Clone)]
pub struct Config {
    pub levels: Vec<Level>,
    pub hour: SynopticHour,
    pub print_command: Option<String>,
    pub base_url: String,
    pub date: NaiveDate,
    pub retries: u32,
}

impl Config {
    /// Validate the raw command line values and build a configuration
    ///
    /// An empty print command disables printing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidLevel`] for the first unknown level.
    pub fn new(
        levels: &[String],
        hour: SynopticHour,
        print_command: &str,
        base_url: &str,
        date: NaiveDate,
        retries: u32,
    ) -> Result<Self, AppError> {
        let levels = validate(levels)?;
        let print_command = match print_command.trim() {
            "" => None,
            cmd => Some(cmd.to_string()),
        };

        Ok(Config {
            levels,
            hour,
            print_command,
            base_url: base_url.to_string(),
            date,
            retries,
        })
    }
}

/// Check every requested level against the known map levels
///
/// All values are logged before the first invalid one is reported.
pub fn validate(levels: &[String]) -> Result<Vec<Level>, AppError> {
    for value in levels {
        info!("Requested level: {}", value);
    }

    levels.iter().map(|value| value.trim().parse()).collect()
}
