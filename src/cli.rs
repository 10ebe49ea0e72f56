// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
// Every flag has a default, so `mailcrawl` with no arguments runs the crawl
// with the built-in seeds for 2000 seconds on 10 workers.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    DEFAULT_DURATION_SECS, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_OUTPUT, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WORKERS,
};

#[derive(Parser, Debug)]
#[command(
    name = "mailcrawl",
    version = "0.1.0",
    about = "Crawl the web from a set of seed URLs and collect email addresses",
    long_about = "mailcrawl fetches pages with a pool of concurrent workers, follows the links it \
                  finds, and writes every email address it sees to a JSON file. \
                  The crawl stops when its time budget runs out."
)]
pub struct Cli {
    /// Seed URLs to start from (defaults to the built-in seeds)
    pub seeds: Vec<String>,

    /// Number of concurrent workers
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Crawl time budget in seconds
    ///
    /// Workers stop taking new URLs once it has elapsed. 0 stops immediately.
    #[arg(long, default_value_t = DEFAULT_DURATION_SECS)]
    pub duration: u64,

    /// Timeout for a single page download, in seconds
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub fetch_timeout: u64,

    /// How long an idle worker waits for new URLs before re-checking the budget, in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub poll_interval_ms: u64,

    /// File the collected email addresses are written to
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Queue a URL again when it is rediscovered after being visited
    #[arg(long)]
    pub allow_revisit: bool,

    /// Stop as soon as the queue is empty and no worker is busy
    #[arg(long)]
    pub exit_when_idle: bool,

    /// Print the final crawl summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Log every URL as it is processed (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}
