//! Bulk fetch: resolve each ticker to a company name, fetch its feed and
//! write the result twice.
//!
//! Per ticker the run writes `{ticker}.json` and `{company-slug}.json`
//! with the same envelope. Tickers are processed one at a time with a
//! [`RateLimit`] pause in between. A failed name lookup or feed fetch only
//! affects that ticker: the lookup falls back to the ticker, the feed to an
//! empty item list, and the batch carries on. File system errors still
//! abort the run.

use crate::error::NewsError;
use crate::http::Fetch;
use crate::models::NewsEnvelope;
use crate::outputs::json::write_envelope;
use crate::rate_limit::RateLimit;
use crate::sources::alpha_vantage::resolve_company_name;
use crate::sources::fetch_news;
use crate::sources::google_news::GoogleNews;
use crate::utils::{slugify, ticker_key};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument, warn};

/// Everything a bulk run needs, already merged from flags and environment.
#[derive(Debug, Clone)]
pub struct BulkOptions {
    /// Comma-separated tickers.
    pub tickers: Option<String>,
    /// File with one ticker per line.
    pub file: Option<PathBuf>,
    pub apikey: Option<String>,
    pub count: usize,
    pub out_dir: PathBuf,
    pub rate_limit: RateLimit,
}

/// Which step failed for a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Feed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Resolve => f.write_str("resolve"),
            Stage::Feed => f.write_str("feed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerFailure {
    pub ticker: String,
    pub stage: Stage,
    pub reason: String,
}

/// Outcome of a bulk run.
#[derive(Debug, Default)]
pub struct BulkReport {
    pub processed: usize,
    pub written: Vec<PathBuf>,
    pub failures: Vec<TickerFailure>,
}

/// Split a comma-separated ticker list, dropping blanks.
pub fn parse_ticker_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Gather tickers from the comma list first, then the file, keeping order.
pub async fn collect_tickers(
    list: Option<&str>,
    file: Option<&Path>,
) -> Result<Vec<String>, NewsError> {
    let mut tickers = list.map(parse_ticker_list).unwrap_or_default();

    if let Some(path) = file {
        let contents = fs::read_to_string(path).await?;
        tickers.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
    }

    Ok(tickers)
}

/// Run the whole batch.
///
/// # Errors
///
/// [`NewsError::MissingApiKey`] when no key is configured,
/// [`NewsError::NoTickers`] when both sources yield nothing, and I/O errors
/// from reading the ticker file or writing output.
#[instrument(level = "info", skip_all, fields(out_dir = %opts.out_dir.display()))]
pub async fn run_bulk<F>(fetcher: &F, opts: &BulkOptions) -> Result<BulkReport, NewsError>
where
    F: Fetch + Sync,
{
    let apikey = opts
        .apikey
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(NewsError::MissingApiKey)?;

    let tickers = collect_tickers(opts.tickers.as_deref(), opts.file.as_deref()).await?;
    if tickers.is_empty() {
        return Err(NewsError::NoTickers);
    }
    info!(count = tickers.len(), "Starting bulk fetch");

    let mut report = BulkReport::default();
    for (i, ticker) in tickers.iter().enumerate() {
        process_ticker(fetcher, ticker, apikey, opts, &mut report).await?;
        if i + 1 < tickers.len() {
            opts.rate_limit.wait().await;
        }
    }

    info!(
        processed = report.processed,
        files = report.written.len(),
        failures = report.failures.len(),
        "Bulk fetch complete"
    );
    Ok(report)
}

#[instrument(level = "info", skip(fetcher, apikey, opts, report))]
async fn process_ticker<F>(
    fetcher: &F,
    ticker: &str,
    apikey: &str,
    opts: &BulkOptions,
    report: &mut BulkReport,
) -> Result<(), NewsError>
where
    F: Fetch + Sync,
{
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Ok(());
    }
    info!("Processing ticker");

    let company = match resolve_company_name(fetcher, ticker, apikey).await {
        Ok(name) => name,
        Err(e) => {
            warn!(error = %e, "Failed to resolve company name; using ticker");
            report.failures.push(TickerFailure {
                ticker: ticker.to_string(),
                stage: Stage::Resolve,
                reason: e.to_string(),
            });
            ticker.to_string()
        }
    };

    let (fetched, items) = match fetch_news(fetcher, &GoogleNews, &company, opts.count).await {
        Ok(items) => (true, items),
        Err(e) => {
            error!(%company, error = %e, "Failed to fetch feed; writing empty result");
            report.failures.push(TickerFailure {
                ticker: ticker.to_string(),
                stage: Stage::Feed,
                reason: e.to_string(),
            });
            (false, Vec::new())
        }
    };

    let envelope = NewsEnvelope::for_ticker(ticker, company.as_str(), fetched, items);
    let ticker_file = ticker_key(ticker);
    let company_file = slugify(&company);
    // A company name that slugs to the ticker (e.g. the ticker fallback)
    // shares one file.
    let keys = if company_file == ticker_file {
        vec![ticker_file]
    } else {
        vec![ticker_file, company_file]
    };
    for key in keys {
        let path = write_envelope(&envelope, &opts.out_dir, &key).await?;
        println!("Wrote {} items to {}", envelope.count, path.display());
        report.written.push(path);
    }
    report.processed += 1;

    Ok(())
}
