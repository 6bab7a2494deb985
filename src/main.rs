//! # Ticker News
//!
//! Small news pipeline for companies and stock tickers. It queries Google
//! News RSS and MarketWatch, optionally resolves tickers to company names
//! through Alpha Vantage, and writes or serves the results as JSON.
//!
//! ## Usage
//!
//! ```sh
//! ticker_news fetch "Apple Inc" --count 8
//! ticker_news bulk --tickers AAPL,MSFT --apikey YOUR_ALPHA_VANTAGE_KEY
//! ticker_news serve --port 5000
//! ```
//!
//! ## Architecture
//!
//! Every command follows the same linear pipeline:
//! 1. **Query**: Build a provider URL from a company name or ticker
//! 2. **Fetch**: One GET with a fixed timeout and browser User-Agent
//! 3. **Parse**: RSS items or HTML headline anchors into [`models::NewsItem`]s
//! 4. **Normalize**: Trim fields and keep the first N items
//! 5. **Sink**: Pretty JSON file on disk, or a JSON HTTP response
//!
//! Logs go to stderr (filter with `RUST_LOG`); stdout only carries the
//! `Wrote N items to <path>` lines.

use clap::Parser;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod commands;
mod error;
mod http;
mod models;
mod outputs;
mod rate_limit;
mod server;
mod sources;
mod utils;

use cli::{Cli, Command};
use commands::bulk::{BulkOptions, run_bulk};
use commands::fetch::fetch_company;
use error::NewsError;
use http::HttpFetcher;
use rate_limit::RateLimit;
use server::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(timeout_secs = args.timeout_secs, "Parsed CLI arguments");

    let result = run(args).await;

    let elapsed = start_time.elapsed();
    match result {
        Ok(()) => {
            info!(?elapsed, "Execution complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(?elapsed, error = %e, "Execution failed");
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(args: Cli) -> Result<(), NewsError> {
    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs))?;

    match args.command {
        Command::Fetch(fetch) => {
            let path = fetch_company(&fetcher, &fetch.company, fetch.count, &fetch.out_dir).await?;
            info!(path = %path.display(), company = %fetch.company, "Company news written");
        }
        Command::Bulk(bulk) => {
            let opts = BulkOptions {
                tickers: bulk.tickers,
                file: bulk.file,
                apikey: bulk.apikey,
                count: bulk.count,
                out_dir: bulk.out_dir,
                rate_limit: RateLimit::new(
                    Duration::from_secs(bulk.delay_secs),
                    Duration::from_millis(bulk.jitter_ms),
                ),
            };
            let report = run_bulk(&fetcher, &opts).await?;
            for failure in &report.failures {
                warn!(
                    ticker = %failure.ticker,
                    stage = %failure.stage,
                    reason = %failure.reason,
                    "Ticker completed with a failure"
                );
            }
        }
        Command::Serve(serve) => {
            let state = AppState {
                fetcher,
                count: serve.count,
            };
            server::serve(SocketAddr::new(serve.host, serve.port), state).await?;
        }
    }

    Ok(())
}
