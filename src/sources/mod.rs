//! News sources and the shared fetch → parse → normalize pipeline.
//!
//! Each source is a small adapter implementing [`NewsSource`]: it knows how
//! to turn a query into a URL and how to turn the response body into
//! [`NewsItem`]s. [`fetch_news`] drives any adapter through the same steps.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Google News | [`google_news`] | RSS feed | Free-text company queries |
//! | MarketWatch | [`marketwatch`] | HTML scraping | Ticker quote page headlines |
//! | Alpha Vantage | [`alpha_vantage`] | JSON API | Ticker → company name only |

pub mod alpha_vantage;
pub mod google_news;
pub mod marketwatch;

use crate::error::NewsError;
use crate::http::Fetch;
use crate::models::NewsItem;
use tracing::{debug, info, instrument};
use url::Url;

/// A pluggable news provider.
pub trait NewsSource {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Endpoint URL for `query`. The query is trimmed but not validated.
    fn url(&self, query: &str) -> Result<Url, NewsError>;

    /// Extract at most `count` records from a response body, in document
    /// order.
    fn parse(&self, body: &str, count: usize) -> Result<Vec<NewsItem>, NewsError>;
}

/// Run one query through `source`: build the URL, fetch it, parse the body
/// and normalize the result.
#[instrument(level = "info", skip(fetcher, source), fields(source = source.name()))]
pub async fn fetch_news<F, S>(
    fetcher: &F,
    source: &S,
    query: &str,
    count: usize,
) -> Result<Vec<NewsItem>, NewsError>
where
    F: Fetch + Sync,
    S: NewsSource + Sync,
{
    let url = source.url(query)?;
    debug!(%url, "Built query URL");

    let body = fetcher.get_text(&url).await?;
    let items = normalize(source.parse(&body, count)?, count);

    info!(count = items.len(), "Fetched news items");
    Ok(items)
}

/// Trim every field and keep the first `count` items in source order.
pub fn normalize(items: Vec<NewsItem>, count: usize) -> Vec<NewsItem> {
    items
        .into_iter()
        .take(count)
        .map(NewsItem::trimmed)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::google_news::GoogleNews;
    use super::marketwatch::MarketWatch;
    use super::*;
    use crate::http::testing::FakeFetcher;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"Apple Inc" - Google News</title>
    <item>
      <title>  Apple unveils new chip  </title>
      <link>https://news.google.com/articles/one</link>
      <pubDate>Tue, 06 May 2025 14:30:00 GMT</pubDate>
      <description>first</description>
    </item>
    <item>
      <title>Apple shares climb</title>
      <link>https://news.google.com/articles/two</link>
      <pubDate>Tue, 06 May 2025 12:00:00 GMT</pubDate>
      <description>second</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_normalize_trims_and_truncates() {
        let items = vec![
            NewsItem {
                title: " a ".to_string(),
                ..Default::default()
            },
            NewsItem {
                title: "b\n".to_string(),
                ..Default::default()
            },
            NewsItem {
                title: "c".to_string(),
                ..Default::default()
            },
        ];

        let out = normalize(items, 2);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "a");
        assert_eq!(out[1].title, "b");
    }

    #[test]
    fn test_normalize_count_larger_than_input() {
        let out = normalize(vec![NewsItem::default()], 10);
        assert_eq!(out.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_news_feed_source() {
        let fetcher = FakeFetcher::new().respond("news.google.com/rss/search", FEED);

        let items = fetch_news(&fetcher, &GoogleNews, "Apple Inc", 8).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Apple unveils new chip");
        assert_eq!(items[1].link, "https://news.google.com/articles/two");
        assert_eq!(
            fetcher.requested(),
            vec!["https://news.google.com/rss/search?q=Apple%20Inc&hl=en-US&gl=US&ceid=US:en"]
        );
    }

    #[tokio::test]
    async fn test_fetch_news_markup_source() {
        let page = r#"<html><body>
            <div class="article__content"><a class="link" href="/story/one">One</a></div>
            <div class="article__content"><a class="link" href="https://www.marketwatch.com/story/two">Two</a></div>
        </body></html>"#;
        let fetcher = FakeFetcher::new().respond("marketwatch.com/investing/stock/aapl", page);

        let items = fetch_news(&fetcher, &MarketWatch, "aapl", 5).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].link, "https://www.marketwatch.com/story/one");
        assert_eq!(items[1].title, "Two");
    }

    #[tokio::test]
    async fn test_fetch_news_propagates_fetch_failure() {
        let fetcher = FakeFetcher::new().fail("news.google.com", "timed out");

        let err = fetch_news(&fetcher, &GoogleNews, "Apple", 8).await.unwrap_err();
        assert!(matches!(err, NewsError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_fetch_news_propagates_parse_failure() {
        let fetcher =
            FakeFetcher::new().respond("news.google.com", "<rss><channel><item></channel>");

        let err = fetch_news(&fetcher, &GoogleNews, "Apple", 8).await.unwrap_err();
        assert!(matches!(err, NewsError::Parse(_)));
    }
}
