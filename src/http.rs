//! HTTP fetching behind a small trait seam.
//!
//! - [`Fetch`]: one GET, body as text, any failure collapsed into
//!   [`NewsError::Fetch`]
//! - [`HttpFetcher`]: the `reqwest` implementation with a fixed timeout and
//!   a browser `User-Agent` so sources don't reject the request outright
//!
//! Nothing here retries. A failed request is reported once and the caller
//! decides whether that aborts the run or just one item.

use crate::error::NewsError;
use reqwest::Client;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

/// Browser identifier sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Something that can GET a URL and hand back the body.
///
/// Implementations must treat transport errors, timeouts and non-2xx
/// statuses alike: all of them become [`NewsError::Fetch`].
pub trait Fetch {
    fn get_text(&self, url: &Url) -> impl Future<Output = Result<String, NewsError>> + Send;
}

/// [`Fetch`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with the given timeout and [`USER_AGENT`].
    pub fn new(timeout: Duration) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NewsError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn get_text(&self, url: &Url) -> Result<String, NewsError> {
        let t0 = Instant::now();
        let fail = |reason: String| NewsError::Fetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, elapsed_ms = t0.elapsed().as_millis() as u64, "Non-success status");
            return Err(fail(format!("HTTP status {status}")));
        }

        let body = response.text().await.map_err(|e| fail(e.to_string()))?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched body"
        );
        Ok(body)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Canned [`Fetch`] for tests: the first route whose needle occurs in
    /// the requested URL answers with its body; unmatched URLs fail.
    #[derive(Debug, Default)]
    pub struct FakeFetcher {
        routes: Vec<(String, Result<String, String>)>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, needle: &str, body: &str) -> Self {
            self.routes.push((needle.to_string(), Ok(body.to_string())));
            self
        }

        pub fn fail(mut self, needle: &str, reason: &str) -> Self {
            self.routes.push((needle.to_string(), Err(reason.to_string())));
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl Fetch for FakeFetcher {
        async fn get_text(&self, url: &Url) -> Result<String, NewsError> {
            let url = url.to_string();
            self.requested.lock().unwrap().push(url.clone());

            match self.routes.iter().find(|(needle, _)| url.contains(needle.as_str())) {
                Some((_, Ok(body))) => Ok(body.clone()),
                Some((_, Err(reason))) => Err(NewsError::Fetch {
                    url,
                    reason: reason.clone(),
                }),
                None => Err(NewsError::Fetch {
                    url,
                    reason: "no route".to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeFetcher;
    use super::*;

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new(DEFAULT_TIMEOUT).is_ok());
    }

    #[tokio::test]
    async fn test_fake_fetcher_routes() {
        let fetcher = FakeFetcher::new()
            .respond("news.google.com", "<rss/>")
            .fail("alphavantage", "HTTP status 500");

        let ok = Url::parse("https://news.google.com/rss/search?q=x").unwrap();
        assert_eq!(fetcher.get_text(&ok).await.unwrap(), "<rss/>");

        let bad = Url::parse("https://www.alphavantage.co/query").unwrap();
        let err = fetcher.get_text(&bad).await.unwrap_err();
        assert!(matches!(err, NewsError::Fetch { .. }));

        let unknown = Url::parse("https://example.com/").unwrap();
        assert!(fetcher.get_text(&unknown).await.is_err());
        assert_eq!(fetcher.requested().len(), 3);
    }
}
