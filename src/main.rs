// src/main.rs
// =============================================================================
// Entry point.
//
// What happens here:
// 1. Parse command-line arguments and build a validated CrawlConfig
// 2. Set up logging
// 3. Run the crawl until its time budget runs out
// 4. Print a summary and exit (0 = crawl ran, 2 = could not start)
// =============================================================================

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mailcrawl::cli::Cli;
use mailcrawl::config::CrawlConfig;
use mailcrawl::crawl::{run_crawl, CrawlSummary};
use mailcrawl::emails::JsonFileStore;
use mailcrawl::fetch::ReqwestFetcher;
use mailcrawl::links::HtmlLinkExtractor;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    let config = CrawlConfig::try_from(cli)?;

    let fetcher = ReqwestFetcher::new(config.fetch_timeout).context("could not build HTTP client")?;
    let store = JsonFileStore::new(&config.output);

    info!(
        seeds = config.seeds.len(),
        output = %store.path().display(),
        allow_revisit = config.allow_revisit,
        "mailcrawl starting"
    );

    let summary = run_crawl(
        &config,
        Arc::new(fetcher),
        Arc::new(HtmlLinkExtractor::new()),
        Box::new(store),
    )
    .await;

    print_summary(&summary, json)
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("mailcrawl=debug")
        } else {
            EnvFilter::new("mailcrawl=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(summary: &CrawlSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("📊 Crawl summary:");
    println!("   {:<20} {}", "Pages processed", summary.pages_processed);
    println!("   {:<20} {}", "Visited URLs", summary.visited);
    println!("   {:<20} {}", "Seen URLs", summary.seen);
    println!("   {:<20} {}", "Abandoned in queue", summary.pending);
    println!("   {:<20} {}", "Emails found", summary.emails);
    println!("   {:<20} {:.1}s", "Elapsed", summary.elapsed_secs);

    let failures = summary.failures;
    if failures.total() > 0 {
        println!();
        println!("⚠️  Failures:");
        println!("   {:<20} {}", "Fetch", failures.fetch);
        println!("   {:<20} {}", "Parse", failures.parse);
        println!("   {:<20} {}", "Persist", failures.persist);
        println!("   {:<20} {}", "Unexpected", failures.unexpected);
    }

    Ok(())
}
