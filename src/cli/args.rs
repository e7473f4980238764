//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ViewConfig;

use super::OutputFormat;

/// Replay a captured record stream through the sliding-window viewer.
#[derive(Parser, Debug)]
#[command(name = "packetview")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON-lines record file to replay (stdin if omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Frame numbers materialized for display at a time
    #[arg(long = "window-size", default_value = "50", value_parser = clap::value_parser!(u64).range(1..))]
    pub window_size: u64,

    /// Step by which the window shifts past a scroll boundary
    #[arg(long = "jump-size", default_value = "20", value_parser = clap::value_parser!(u64).range(1..))]
    pub jump_size: u64,

    /// Start with autoscroll off (the window stays on the oldest data)
    #[arg(long = "no-autoscroll")]
    pub no_autoscroll: bool,

    /// Records fed to the session per batch
    #[arg(long = "batch-size", default_value = "100", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub batch_size: usize,

    /// Output format for the final window
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Session configuration derived from the flags.
    pub fn view_config(&self) -> ViewConfig {
        ViewConfig {
            window_size: self.window_size,
            jump_size: self.jump_size,
            autoscroll: !self.no_autoscroll,
            ..ViewConfig::default()
        }
    }
}
