#![forbid(unsafe_code)]

//! Weather Briefing Map Fetcher
//!
//! This program downloads unannotated upper-air and surface analysis maps from
//! the Storm Prediction Center for one synoptic hour and, optionally, prints
//! each map with an external command such as `lpr`. Downloaded maps only live
//! in a scratch directory for the duration of the run.

use chrono::{NaiveDate, Utc};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

// Import modules
mod commands;
mod config;
mod errors;
mod maps;
mod utils;

use crate::commands::fetch::fetch_maps;
use crate::config::Config;
use crate::errors::AppError;
use crate::maps::{DEFAULT_BASE_URL, Level, SynopticHour};

#[derive(Parser, Debug)]
#[command(name = "wxbrief")]
#[command(about = "Download and print unannotated weather analysis maps from the SPC")]
struct Cli {
    /// Which analysis to grab
    #[arg(long, value_enum, default_value_t = SynopticHour::H12)]
    zulu: SynopticHour,

    /// Comma separated map levels to download
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "500,850,sfc",
        long_help = format!(
            "Comma separated map levels to download. These must be one of the following: {}",
            Level::valid_tokens()
        )
    )]
    levels: Vec<String>,

    /// Command used to print each map, e.g. /usr/bin/lpr; empty to skip printing
    #[arg(long, default_value = "")]
    print: String,

    /// Analysis date (YYYY-MM-DD), defaults to today in UTC
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Extra attempts for maps that fail with a server or network error
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Directory URL the maps are published under
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

impl Cli {
    fn into_config(self) -> Result<Config, AppError> {
        let date = self.date.unwrap_or_else(|| Utc::now().date_naive());
        Config::new(
            &self.levels,
            self.zulu,
            &self.print,
            &self.base_url,
            date,
            self.retries,
        )
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // Initialize logger, RUST_LOG still wins over -v/-q
    env_logger::init_from_env(
        env_logger::Env::default().default_filter_or(cli.verbose.log_level_filter().to_string()),
    );

    let config = cli.into_config()?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(fetch_maps(&config))?;
    Ok(())
}
