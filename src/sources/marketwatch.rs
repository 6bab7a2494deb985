//! MarketWatch quote-page headline scraper.
//!
//! Scrapes `https://www.marketwatch.com/investing/stock/<ticker>` and pulls
//! the headline anchors out of each `div.article__content` block. Links on
//! the page are mostly site-relative and are resolved against
//! `https://www.marketwatch.com`.
//!
//! Blocks without a `a.link` anchor (or whose anchor has no `href`) are
//! skipped silently. That hides layout changes on MarketWatch's side; the
//! skip count is logged at debug level so it can at least be spotted.

use super::NewsSource;
use crate::error::NewsError;
use crate::models::NewsItem;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};
use url::Url;

const BASE_URL: &str = "https://www.marketwatch.com";

/// Headlines returned by the HTTP API when no count is configured.
pub const DEFAULT_COUNT: usize = 5;

static ARTICLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.article__content").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a.link").unwrap());

/// MarketWatch stock page, one query per ticker.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketWatch;

impl NewsSource for MarketWatch {
    fn name(&self) -> &'static str {
        "marketwatch"
    }

    fn url(&self, ticker: &str) -> Result<Url, NewsError> {
        let mut url = Url::parse(BASE_URL)?;
        url.path_segments_mut()
            .map_err(|_| NewsError::Parse(format!("{BASE_URL} cannot be a base URL")))?
            .extend(["investing", "stock", ticker.trim()]);
        Ok(url)
    }

    fn parse(&self, body: &str, count: usize) -> Result<Vec<NewsItem>, NewsError> {
        parse_headlines(body, count)
    }
}

/// Extract at most `count` headlines from a MarketWatch page.
///
/// Only `title` and `link` are populated; the page carries no date or
/// summary next to the anchor.
#[instrument(level = "debug", skip(html), fields(bytes = html.len()))]
pub fn parse_headlines(html: &str, count: usize) -> Result<Vec<NewsItem>, NewsError> {
    let base = Url::parse(BASE_URL)?;
    let document = Html::parse_document(html);

    let mut items = Vec::new();
    let mut skipped = 0usize;
    for element in document.select(&ARTICLE_SELECTOR).take(count) {
        let Some(anchor) = element.select(&LINK_SELECTOR).next() else {
            skipped += 1;
            continue;
        };
        let Some(link) = anchor
            .value()
            .attr("href")
            .and_then(|href| base.join(href.trim()).ok())
        else {
            skipped += 1;
            continue;
        };

        items.push(NewsItem {
            title: anchor.text().collect::<String>().trim().to_string(),
            link: link.to_string(),
            ..Default::default()
        });
    }

    debug!(count = items.len(), skipped, "Parsed MarketWatch headlines");
    Ok(items)
}
