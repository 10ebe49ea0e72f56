// src/config.rs
// =============================================================================
// Validated crawl settings.
//
// The CLI collects raw values (seconds, milliseconds, strings). CrawlConfig
// holds the checked, typed form the crawler actually runs with. Defaults are
// the crawler's long-standing constants: two seeds, 10 workers, 2000 seconds.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::cli::Cli;

pub const DEFAULT_SEEDS: [&str; 2] = [
    "https://www.imdb.com/",
    "https://www.tel-aviv.gov.il/Residents/Transportation/Pages/Appeal.aspx",
];
pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_DURATION_SECS: u64 = 2000;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
pub const DEFAULT_OUTPUT: &str = "emails.json";

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seeds: Vec<String>,
    pub workers: usize,
    /// Wall-clock budget for the whole crawl
    pub duration: Duration,
    /// Upper bound on a single page download
    pub fetch_timeout: Duration,
    /// Longest a worker waits on an empty queue before re-checking the budget
    pub poll_interval: Duration,
    pub output: PathBuf,
    /// Re-queue a URL that is discovered again after it was visited
    pub allow_revisit: bool,
    /// Stop before the budget runs out once nothing is queued or in flight
    pub exit_when_idle: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seeds: DEFAULT_SEEDS.iter().map(|s| s.to_string()).collect(),
            workers: DEFAULT_WORKERS,
            duration: Duration::from_secs(DEFAULT_DURATION_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            output: PathBuf::from(DEFAULT_OUTPUT),
            allow_revisit: false,
            exit_when_idle: false,
        }
    }
}

impl CrawlConfig {
    pub fn validate(&self) -> Result<()> {
        if self.seeds.is_empty() {
            bail!("at least one seed URL is required");
        }
        if self.workers == 0 {
            bail!("worker count must be at least 1");
        }
        if self.poll_interval.is_zero() {
            bail!("poll interval must be greater than zero");
        }
        if self.fetch_timeout.is_zero() {
            bail!("fetch timeout must be greater than zero");
        }
        Ok(())
    }
}

impl TryFrom<Cli> for CrawlConfig {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        let defaults = CrawlConfig::default();
        let config = CrawlConfig {
            seeds: if cli.seeds.is_empty() {
                defaults.seeds
            } else {
                cli.seeds
            },
            workers: cli.workers,
            duration: Duration::from_secs(cli.duration),
            fetch_timeout: Duration::from_secs(cli.fetch_timeout),
            poll_interval: Duration::from_millis(cli.poll_interval_ms),
            output: cli.output,
            allow_revisit: cli.allow_revisit,
            exit_when_idle: cli.exit_when_idle,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_from_empty_command_line() {
        let cli = Cli::parse_from(["mailcrawl"]);
        let config = CrawlConfig::try_from(cli).unwrap();

        assert_eq!(config.seeds.len(), 2);
        assert_eq!(config.workers, 10);
        assert_eq!(config.duration, Duration::from_secs(2000));
        assert_eq!(config.output, PathBuf::from("emails.json"));
        assert!(!config.allow_revisit);
        assert!(!config.exit_when_idle);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "mailcrawl",
            "https://a.test/",
            "--workers",
            "3",
            "--duration",
            "0",
            "--allow-revisit",
            "--output",
            "out/found.json",
        ]);
        let config = CrawlConfig::try_from(cli).unwrap();

        assert_eq!(config.seeds, vec!["https://a.test/".to_string()]);
        assert_eq!(config.workers, 3);
        assert!(config.duration.is_zero());
        assert!(config.allow_revisit);
        assert_eq!(config.output, PathBuf::from("out/found.json"));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let cli = Cli::parse_from(["mailcrawl", "--workers", "0"]);
        assert!(CrawlConfig::try_from(cli).is_err());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let config = CrawlConfig {
            poll_interval: Duration::ZERO,
            ..CrawlConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
