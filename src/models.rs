//! Data models for fetched news and the JSON shapes written to disk or
//! returned over HTTP.
//!
//! - [`NewsItem`]: one flat news record, every field a possibly empty string
//! - [`NewsEnvelope`]: the persisted wrapper around a batch of items
//! - [`Headline`] / [`ApiResponse`]: the HTTP API body
//! - [`SymbolSearch`]: the Alpha Vantage `SYMBOL_SEARCH` response

use serde::{Deserialize, Serialize};

/// A single news record as extracted from a feed or an HTML page.
///
/// All fields are optional at the source and default to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    /// Free text as published by the source, usually an RFC 822 date.
    pub published: String,
    /// May carry HTML markup from the feed.
    pub summary: String,
}

impl NewsItem {
    /// Copy of this item with leading/trailing whitespace removed from
    /// every field.
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            link: self.link.trim().to_string(),
            published: self.published.trim().to_string(),
            summary: self.summary.trim().to_string(),
        }
    }
}

/// Top-level JSON object written once per query.
///
/// The single-company command leaves `ticker` unset, which drops the key
/// from the output entirely.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewsEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    pub company: String,
    pub fetched: bool,
    pub count: usize,
    pub items: Vec<NewsItem>,
}

impl NewsEnvelope {
    /// Envelope for a free-text company query.
    pub fn for_company(company: impl Into<String>, items: Vec<NewsItem>) -> Self {
        Self {
            ticker: None,
            company: company.into(),
            fetched: true,
            count: items.len(),
            items,
        }
    }

    /// Envelope for a ticker that was resolved to `company`.
    pub fn for_ticker(
        ticker: impl Into<String>,
        company: impl Into<String>,
        fetched: bool,
        items: Vec<NewsItem>,
    ) -> Self {
        Self {
            ticker: Some(ticker.into()),
            company: company.into(),
            fetched,
            count: items.len(),
            items,
        }
    }
}

/// Title and absolute URL of a scraped headline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Headline {
    pub title: String,
    pub url: String,
}

impl From<NewsItem> for Headline {
    fn from(item: NewsItem) -> Self {
        Self {
            title: item.title,
            url: item.link,
        }
    }
}

/// Body of `GET /api/stock-news/{ticker}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub data: Vec<Headline>,
}

impl ApiResponse {
    pub fn success(data: Vec<Headline>) -> Self {
        Self {
            status: "success".to_string(),
            data,
        }
    }
}

/// Alpha Vantage `SYMBOL_SEARCH` response.
///
/// When the free tier is throttled the API answers 200 with a `Note` or
/// `Information` message instead of `bestMatches`.
#[derive(Debug, Default, Deserialize)]
pub struct SymbolSearch {
    #[serde(rename = "bestMatches", default)]
    pub best_matches: Vec<SymbolMatch>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

/// One entry of `bestMatches`. Alpha Vantage prefixes its keys with a
/// column number.
#[derive(Debug, Default, Deserialize)]
pub struct SymbolMatch {
    #[serde(rename = "1. symbol", default)]
    pub symbol: String,
    #[serde(rename = "2. name", default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_item_trimmed() {
        let item = NewsItem {
            title: "  Apple beats estimates \n".to_string(),
            link: "\thttps://example.com/a ".to_string(),
            published: " Mon, 06 May 2025 14:30:00 GMT".to_string(),
            summary: "".to_string(),
        };

        let item = item.trimmed();
        assert_eq!(item.title, "Apple beats estimates");
        assert_eq!(item.link, "https://example.com/a");
        assert_eq!(item.published, "Mon, 06 May 2025 14:30:00 GMT");
        assert_eq!(item.summary, "");
    }

    #[test]
    fn test_company_envelope_omits_ticker() {
        let envelope = NewsEnvelope::for_company("Apple Inc", vec![NewsItem::default()]);
        let json = serde_json::to_value(&envelope).unwrap();

        assert!(json.get("ticker").is_none());
        assert_eq!(json["company"], "Apple Inc");
        assert_eq!(json["fetched"], true);
        assert_eq!(json["count"], 1);
        assert_eq!(json["items"][0]["title"], "");
    }

    #[test]
    fn test_ticker_envelope_includes_ticker() {
        let envelope = NewsEnvelope::for_ticker("MSFT", "Microsoft Corporation", false, vec![]);
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["ticker"], "MSFT");
        assert_eq!(json["company"], "Microsoft Corporation");
        assert_eq!(json["fetched"], false);
        assert_eq!(json["count"], 0);
    }

    #[test]
    fn test_api_response_shape() {
        let item = NewsItem {
            title: "Stocks rally".to_string(),
            link: "https://www.marketwatch.com/story/stocks-rally".to_string(),
            ..Default::default()
        };
        let body = ApiResponse::success(vec![item.into()]);
        let json = serde_json::to_string(&body).unwrap();

        assert_eq!(
            json,
            r#"{"status":"success","data":[{"title":"Stocks rally","url":"https://www.marketwatch.com/story/stocks-rally"}]}"#
        );
    }

    #[test]
    fn test_symbol_search_deserialization() {
        let json = r#"{
            "bestMatches": [
                {"1. symbol": "AAPL", "2. name": "Apple Inc", "3. type": "Equity"},
                {"1. symbol": "AAPL34.SAO", "2. name": "Apple Inc"}
            ]
        }"#;

        let search: SymbolSearch = serde_json::from_str(json).unwrap();
        assert_eq!(search.best_matches.len(), 2);
        assert_eq!(search.best_matches[0].symbol, "AAPL");
        assert_eq!(search.best_matches[0].name, "Apple Inc");
        assert!(search.note.is_none());
    }

    #[test]
    fn test_symbol_search_throttled() {
        let json = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#;

        let search: SymbolSearch = serde_json::from_str(json).unwrap();
        assert!(search.best_matches.is_empty());
        assert!(search.note.unwrap().starts_with("Thank you"));
    }
}
