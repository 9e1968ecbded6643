//! Configuration and CLI argument handling

use crate::dial::{DEFAULT_RADIUS, MAX_RADIUS, MIN_RADIUS};
use crate::driver::DEFAULT_INTERVAL;
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::time::Duration;

static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "dial-timer")]
#[command(about = "A 60-second circular countdown timer for the terminal")]
#[command(version)]
pub struct Config {
    /// Milliseconds between countdown ticks
    #[arg(long = "interval-ms", default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,

    /// Dial radius in terminal rows
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_RADIUS,
        value_parser = RangedU64ValueParser::<usize>::new().range(MIN_RADIUS as u64..=MAX_RADIUS as u64)
    )]
    pub radius: usize,

    /// Render inline instead of on the alternate screen
    #[arg(long)]
    pub no_alt_screen: bool,

    /// Write logs to this file; logging is off without it
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// The widget settings described by these arguments
    pub fn settings(&self) -> Settings {
        Settings {
            interval: Duration::from_millis(self.interval_ms.max(1)),
            radius: self.radius.clamp(MIN_RADIUS, MAX_RADIUS),
        }
    }
}

/// Knobs read by the widget when the program starts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Time between ticks.
    pub interval: Duration,
    /// Preferred dial radius in rows.
    pub radius: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            radius: DEFAULT_RADIUS,
        }
    }
}

impl Settings {
    /// Installs the process-wide settings.
    ///
    /// `bubbletea_rs::Model::init` takes no arguments, so the widget picks
    /// these up from here. Only the first call has an effect; returns
    /// whether it was this one.
    pub fn install(self) -> bool {
        SETTINGS.set(self).is_ok()
    }

    /// The installed settings, or the defaults.
    pub fn current() -> Settings {
        SETTINGS.get().copied().unwrap_or_default()
    }
}
