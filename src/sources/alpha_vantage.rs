//! Ticker → company name resolution via Alpha Vantage `SYMBOL_SEARCH`.
//!
//! Google News matches company names far better than bare tickers, so the
//! bulk command resolves each ticker first. Resolution is best effort: when
//! the search comes back empty (or throttled) the ticker itself is used as
//! the name.

use crate::error::NewsError;
use crate::http::Fetch;
use crate::models::SymbolSearch;
use crate::utils::truncate_for_log;
use tracing::{debug, info, instrument, warn};
use url::Url;

const API_BASE: &str = "https://www.alphavantage.co/query";

/// `SYMBOL_SEARCH` URL for `ticker`.
pub fn symbol_search_url(ticker: &str, apikey: &str) -> Result<Url, NewsError> {
    Ok(Url::parse_with_params(
        API_BASE,
        &[
            ("function", "SYMBOL_SEARCH"),
            ("keywords", ticker.trim()),
            ("apikey", apikey),
        ],
    )?)
}

/// Look up the company name for `ticker`.
///
/// Prefers a match whose symbol equals the ticker (case-insensitive), then
/// the first match, then the ticker itself. Fails only when the request
/// fails or the body is not JSON.
#[instrument(level = "info", skip(fetcher, apikey))]
pub async fn resolve_company_name<F>(
    fetcher: &F,
    ticker: &str,
    apikey: &str,
) -> Result<String, NewsError>
where
    F: Fetch + Sync,
{
    let ticker = ticker.trim();
    let url = symbol_search_url(ticker, apikey)?;
    let body = fetcher.get_text(&url).await?;

    let search: SymbolSearch = serde_json::from_str(&body).map_err(|e| {
        NewsError::Parse(format!(
            "symbol search for {ticker}: {e} (body: {})",
            truncate_for_log(&body, 200)
        ))
    })?;

    if let Some(message) = search.note.as_deref().or(search.information.as_deref()) {
        warn!(%ticker, %message, "Alpha Vantage returned a notice instead of matches");
    }

    let name = pick_company_name(&search, ticker);
    info!(%ticker, company = %name, matches = search.best_matches.len(), "Resolved company name");
    Ok(name)
}

fn pick_company_name(search: &SymbolSearch, ticker: &str) -> String {
    let chosen = search
        .best_matches
        .iter()
        .find(|m| m.symbol.trim().eq_ignore_ascii_case(ticker))
        .or_else(|| search.best_matches.first());

    match chosen {
        Some(m) if !m.name.trim().is_empty() => m.name.trim().to_string(),
        Some(m) => {
            debug!(symbol = %m.symbol, "Match has no name; using ticker");
            ticker.to_string()
        }
        None => ticker.to_string(),
    }
}
