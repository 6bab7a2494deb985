//! Command-line interface definitions for Ticker News.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Options that are typically environment-specific (output directory, API
//! key, port) can also be provided via environment variables.

use crate::http::DEFAULT_TIMEOUT;
use crate::rate_limit::DEFAULT_INTERVAL;
use crate::sources::marketwatch::DEFAULT_COUNT;
use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Command-line arguments for the Ticker News application.
///
/// # Examples
///
/// ```sh
/// # One company, eight headlines
/// ticker_news fetch "Apple Inc" --count 8
///
/// # Many tickers, resolved through Alpha Vantage
/// ticker_news bulk --tickers AAPL,MSFT,TSLA --apikey YOUR_KEY
/// ticker_news bulk --file tickers.txt
///
/// # HTTP API on port 5000
/// ticker_news serve --port 5000
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Per-request HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch Google News for one company and write <out-dir>/<slug>.json
    Fetch(FetchArgs),
    /// Resolve tickers to company names and fetch news for each
    Bulk(BulkArgs),
    /// Serve MarketWatch headlines at GET /api/stock-news/{ticker}
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Company name or query to search
    pub company: String,

    /// Number of articles to fetch
    #[arg(long, default_value_t = 8)]
    pub count: usize,

    /// Output directory for JSON files
    #[arg(long, env = "TICKER_NEWS_OUT_DIR", default_value = "assets/news")]
    pub out_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct BulkArgs {
    /// Comma-separated tickers (e.g. AAPL,MSFT)
    #[arg(long)]
    pub tickers: Option<String>,

    /// File with one ticker per line
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Alpha Vantage API key
    #[arg(long, env = "ALPHA_VANTAGE_API_KEY", hide_env_values = true)]
    pub apikey: Option<String>,

    /// Number of articles to fetch per ticker
    #[arg(long, default_value_t = 8)]
    pub count: usize,

    /// Pause between tickers, in seconds
    #[arg(long, default_value_t = DEFAULT_INTERVAL.as_secs())]
    pub delay_secs: u64,

    /// Random extra pause between tickers, up to this many milliseconds
    #[arg(long, default_value_t = 0)]
    pub jitter_ms: u64,

    /// Output directory for JSON files
    #[arg(long, env = "TICKER_NEWS_OUT_DIR", default_value = "assets/news")]
    pub out_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Headlines returned per request
    #[arg(long, default_value_t = DEFAULT_COUNT)]
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_parsing() {
        let cli = Cli::parse_from(["ticker_news", "fetch", "Apple Inc", "--count", "3"]);

        assert_eq!(cli.timeout_secs, 20);
        let Command::Fetch(args) = cli.command else {
            panic!("expected fetch subcommand");
        };
        assert_eq!(args.company, "Apple Inc");
        assert_eq!(args.count, 3);
    }

    #[test]
    fn test_bulk_parsing() {
        let cli = Cli::parse_from([
            "ticker_news",
            "bulk",
            "--tickers",
            "AAPL,MSFT",
            "--file",
            "tickers.txt",
            "--apikey",
            "demo",
            "--delay-secs",
            "0",
            "--timeout-secs",
            "5",
        ]);

        assert_eq!(cli.timeout_secs, 5);
        let Command::Bulk(args) = cli.command else {
            panic!("expected bulk subcommand");
        };
        assert_eq!(args.tickers.as_deref(), Some("AAPL,MSFT"));
        assert_eq!(args.file, Some(PathBuf::from("tickers.txt")));
        assert_eq!(args.apikey.as_deref(), Some("demo"));
        assert_eq!(args.count, 8);
        assert_eq!(args.delay_secs, 0);
        assert_eq!(args.jitter_ms, 0);
    }

    #[test]
    fn test_serve_parsing() {
        let cli = Cli::parse_from(["ticker_news", "serve", "--host", "0.0.0.0", "--count", "10"]);

        let Command::Serve(args) = cli.command else {
            panic!("expected serve subcommand");
        };
        assert_eq!(args.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(args.count, 10);
    }

    #[test]
    fn test_fetch_requires_company() {
        assert!(Cli::try_parse_from(["ticker_news", "fetch"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
