//! Map products offered by the SPC analysis archive
//!
//! Each map is identified by a pressure level, a synoptic hour and a date, and
//! lives at `{base}/{level}_{YYMMDD}_{HH}.pdf`.

use chrono::NaiveDate;
use clap::ValueEnum;
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::errors::AppError;

/// Where the unannotated analysis maps are published.
pub const DEFAULT_BASE_URL: &str = "https://www.spc.noaa.gov/obswx/maps";

/// A pressure level (or the surface analysis) with its own map product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Surface,
    Mb925,
    Mb850,
    Mb700,
    Mb500,
    Mb300,
    Mb250,
}

impl Level {
    /// All levels, in the order the server lists them.
    pub const ALL: [Level; 7] = [
        Level::Surface,
        Level::Mb925,
        Level::Mb850,
        Level::Mb700,
        Level::Mb500,
        Level::Mb300,
        Level::Mb250,
    ];

    /// The token used both on the command line and in map file names.
    pub fn token(self) -> &'static str {
        match self {
            Level::Surface => "sfc",
            Level::Mb925 => "925",
            Level::Mb850 => "850",
            Level::Mb700 => "700",
            Level::Mb500 => "500",
            Level::Mb300 => "300",
            Level::Mb250 => "250",
        }
    }

    /// Human readable label for log lines, e.g. `500mb` or `sfc`.
    pub fn label(self) -> String {
        match self {
            Level::Surface => self.token().to_string(),
            _ => format!("{}mb", self.token()),
        }
    }

    /// Comma separated list of every valid token.
    pub fn valid_tokens() -> String {
        Level::ALL
            .iter()
            .map(|level| level.token())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Level {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.token() == s)
            .ok_or_else(|| AppError::InvalidLevel {
                value: s.to_string(),
                expected: Level::valid_tokens(),
            })
    }
}

/// Analysis time of the map, one of the two daily snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SynopticHour {
    #[value(name = "00Z")]
    H00,
    #[value(name = "12Z")]
    H12,
}

impl SynopticHour {
    /// Two digit hour without the zone marker.
    pub fn token(self) -> &'static str {
        match self {
            SynopticHour::H00 => "00",
            SynopticHour::H12 => "12",
        }
    }
}

impl fmt::Display for SynopticHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Z", self.token())
    }
}

/// Build the download URL for one map
///
/// # Arguments
///
/// * `base` - Directory URL the maps are published under
/// * `date` - Analysis date, rendered as `YYMMDD`
/// * `level` - Map level
/// * `hour` - Synoptic hour, rendered as `HH`
pub fn build_url(base: &str, date: NaiveDate, level: Level, hour: SynopticHour) -> String {
    format!(
        "{}/{}_{}_{}.pdf",
        base.trim_end_matches('/'),
        level.token(),
        date.format("%y%m%d"),
        hour.token()
    )
}

/// One map to fetch: where it comes from and where it goes
#[derive(Debug, Clone)]
pub struct DownloadTarget {
    pub level: Level,
    pub url: String,
    pub path: PathBuf,
}

impl DownloadTarget {
    pub fn new(
        base: &str,
        date: NaiveDate,
        level: Level,
        hour: SynopticHour,
        dir: &Path,
    ) -> Self {
        DownloadTarget {
            level,
            url: build_url(base, date, level, hour),
            path: dir.join(format!("{}.pdf", level.token())),
        }
    }
}
