//! Google News RSS search.
//!
//! Queries `https://news.google.com/rss/search` and walks the RSS 2.0
//! response with `quick-xml`'s pull reader. Only `rss/channel/item` and
//! the handful of item fields we persist are looked at; everything else in
//! the feed (`guid`, `source`, channel metadata, namespaced extras) is
//! skipped.
//!
//! A field's value is its leading text: the text and CDATA before its first
//! child element. Inline markup inside a field (`<description>lead
//! <b>bold</b></description>`) therefore yields `"lead"` instead of failing
//! the feed.

use super::NewsSource;
use crate::error::NewsError;
use crate::models::NewsItem;
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use std::fmt::Display;
use tracing::{debug, instrument};
use url::Url;

const SEARCH_ENDPOINT: &str = "https://news.google.com/rss/search";

// Element depth, counting the root element as 1.
const CHANNEL_DEPTH: usize = 2;
const ITEM_DEPTH: usize = 3;
const FIELD_DEPTH: usize = 4;

/// Google News search feed, one query per company name.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleNews;

impl NewsSource for GoogleNews {
    fn name(&self) -> &'static str {
        "google_news"
    }

    fn url(&self, query: &str) -> Result<Url, NewsError> {
        let q = urlencoding::encode(query.trim());
        Ok(Url::parse(&format!(
            "{SEARCH_ENDPOINT}?q={q}&hl=en-US&gl=US&ceid=US:en"
        ))?)
    }

    fn parse(&self, body: &str, count: usize) -> Result<Vec<NewsItem>, NewsError> {
        parse_feed(body, count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    PubDate,
    Published,
    Description,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"pubDate" => Some(Field::PubDate),
            b"published" => Some(Field::Published),
            b"description" => Some(Field::Description),
            _ => None,
        }
    }
}

/// Item fields as found; `None` means the element never appeared.
#[derive(Debug, Default)]
struct FeedEntry {
    title: Option<String>,
    link: Option<String>,
    pub_date: Option<String>,
    published: Option<String>,
    description: Option<String>,
}

impl FeedEntry {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::PubDate => &mut self.pub_date,
            Field::Published => &mut self.published,
            Field::Description => &mut self.description,
        }
    }
}

impl From<FeedEntry> for NewsItem {
    fn from(entry: FeedEntry) -> Self {
        let published = entry
            .pub_date
            .filter(|d| !d.trim().is_empty())
            .or(entry.published)
            .unwrap_or_default();

        NewsItem {
            title: entry.title.unwrap_or_default(),
            link: entry.link.unwrap_or_default(),
            published,
            summary: entry.description.unwrap_or_default(),
        }
        .trimmed()
    }
}

/// Where the reader currently is inside `rss/channel/item/<field>`.
#[derive(Debug, Default)]
struct FeedCursor {
    depth: usize,
    /// Set while inside the first `<channel>` under the root.
    in_channel: bool,
    channel_seen: bool,
    /// Item being filled; `None` outside items and past `count`.
    entry: Option<FeedEntry>,
    /// Field being filled and whether its leading text has ended.
    field: Option<(Field, bool)>,
}

impl FeedCursor {
    /// An element opened at `self.depth + 1`.
    fn open(&mut self, name: &[u8], wanted: bool) {
        self.depth += 1;
        match self.depth {
            CHANNEL_DEPTH if name == b"channel" && !self.channel_seen => {
                self.in_channel = true;
                self.channel_seen = true;
            }
            ITEM_DEPTH if self.in_channel && name == b"item" && wanted => {
                self.entry = Some(FeedEntry::default());
            }
            FIELD_DEPTH => {
                if let (Some(entry), Some(field)) = (self.entry.as_mut(), Field::from_name(name)) {
                    let slot = entry.slot(field);
                    // First occurrence wins.
                    if slot.is_none() {
                        *slot = Some(String::new());
                        self.field = Some((field, false));
                    }
                }
            }
            d if d == FIELD_DEPTH + 1 => {
                if let Some((_, leading_done)) = self.field.as_mut() {
                    *leading_done = true;
                }
            }
            _ => {}
        }
    }

    /// The element at `self.depth` closed. Returns a finished item.
    fn close(&mut self) -> Option<FeedEntry> {
        let closed = self.depth;
        self.depth = closed.saturating_sub(1);
        match closed {
            FIELD_DEPTH => {
                self.field = None;
                None
            }
            ITEM_DEPTH => self.entry.take(),
            CHANNEL_DEPTH => {
                self.in_channel = false;
                None
            }
            _ => None,
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.depth != FIELD_DEPTH {
            return;
        }
        if let (Some(entry), Some((field, false))) = (self.entry.as_mut(), self.field) {
            if let Some(value) = entry.slot(field).as_mut() {
                value.push_str(text);
            }
        }
    }
}

fn malformed(e: impl Display) -> NewsError {
    NewsError::Parse(format!("RSS feed: {e}"))
}

fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, NewsError> {
    if let Some(ch) = reference.resolve_char_ref().map_err(malformed)? {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(malformed)?;
    match resolve_predefined_entity(&name) {
        Some(resolved) => Ok(resolved.to_string()),
        None => {
            debug!(entity = %name, "Unknown entity kept verbatim");
            Ok(format!("&{name};"))
        }
    }
}

/// Parse an RSS document into at most `count` items.
///
/// A document without a `<channel>` yields no items. Malformed XML
/// (mismatched or missing end tags, bad references) fails the whole parse;
/// nothing is salvaged from a broken feed. The whole document is read even
/// once `count` items are collected.
#[instrument(level = "debug", skip(xml), fields(bytes = xml.len()))]
pub fn parse_feed(xml: &str, count: usize) -> Result<Vec<NewsItem>, NewsError> {
    let mut reader = Reader::from_str(xml);
    let mut cursor = FeedCursor::default();
    let mut items = Vec::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => cursor.open(e.name().as_ref(), items.len() < count),
            Event::Empty(e) => {
                cursor.open(e.name().as_ref(), items.len() < count);
                if let Some(entry) = cursor.close() {
                    items.push(NewsItem::from(entry));
                }
            }
            Event::End(_) => {
                if let Some(entry) = cursor.close() {
                    items.push(NewsItem::from(entry));
                }
            }
            Event::Text(e) => cursor.push_text(&e.xml_content().map_err(malformed)?),
            Event::CData(e) => cursor.push_text(&e.xml_content().map_err(malformed)?),
            Event::GeneralRef(e) => cursor.push_text(&resolve_reference(&e)?),
            Event::Eof => break,
            _ => {}
        }
    }

    if cursor.depth != 0 {
        return Err(malformed("unexpected end of document"));
    }
    if !cursor.channel_seen {
        debug!("Feed has no channel");
    }
    Ok(items)
}
