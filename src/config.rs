//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::state::clock_state::clamped_duration;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "chess-clock")]
#[command(about = "A two-player chess clock served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Starting minutes for each player (0-60)
    #[arg(short, long, default_value = "5")]
    pub minutes: u64,

    /// Starting seconds for each player (0-59)
    #[arg(short, long, default_value = "0")]
    pub seconds: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Starting time per player, clamped like the duration dialog
    pub fn initial_duration(&self) -> Duration {
        clamped_duration(self.minutes, self.seconds)
    }
}
