//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::{
    error::TimerError,
    timer::{parse_duration, TimerSettings},
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "pomodoro-timer")]
#[command(about = "A countdown timer daemon controlled over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20525")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Countdown duration, e.g. 25, 25m, 1h30m, 90s
    #[arg(short, long, default_value = "25m", value_parser = parse_duration_arg)]
    pub duration: Duration,

    /// Tick interval in milliseconds
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Start counting down as soon as the server is up
    #[arg(long)]
    pub auto_start: bool,

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

    /// Build validated timer settings
    pub fn timer_settings(&self) -> Result<TimerSettings, TimerError> {
        TimerSettings::new(self.duration)?.with_tick_interval(Duration::from_millis(self.tick_ms))
    }
}

fn parse_duration_arg(value: &str) -> Result<Duration, String> {
    parse_duration(value).ok_or_else(|| format!("invalid duration '{}', expected e.g. 25m or 1h30m", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["pomodoro-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20525");
        assert_eq!(config.duration, Duration::from_secs(25 * 60));
        assert_eq!(config.log_level(), "info");
        assert!(!config.auto_start);
        assert_eq!(config.timer_settings().unwrap(), TimerSettings::pomodoro());
    }

    #[test]
    fn test_custom_duration_and_tick() {
        let config = Config::try_parse_from([
            "pomodoro-timer",
            "--duration",
            "1m30s",
            "--tick-ms",
            "500",
            "--verbose",
        ])
        .unwrap();

        let settings = config.timer_settings().unwrap();
        assert_eq!(settings.total_ms(), 90_000);
        assert_eq!(settings.tick_ms(), 500);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::try_parse_from(["pomodoro-timer", "--duration", "soon"]).is_err());

        let config = Config::try_parse_from(["pomodoro-timer", "--tick-ms", "0"]).unwrap();
        assert_eq!(config.timer_settings(), Err(TimerError::ZeroTickInterval));
    }
}
