// src/services/news.rs
use chrono::{DateTime, NaiveDate, Utc};
use encoding_rs::{Encoding, UTF_8};
use log::{debug, info, warn};
use reqwest::Client;
use roxmltree::{Document, Node};

use super::error::{FeedError, FeedResult};
use crate::models::{AssetClass, NewsItem};

pub const PROVIDER: &str = "google_news";

/// Headlines kept per symbol.
pub const HEADLINE_LIMIT: usize = 4;

const DEFAULT_SOURCE: &str = "Google News";

/// One `<item>` of the RSS feed, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<String>,
    pub source: Option<String>,
}

impl FeedEntry {
    /// Entries without a title or link are not worth showing.
    pub fn to_news_item(&self) -> Option<NewsItem> {
        let title = self.title.clone().filter(|t| !t.is_empty())?;
        let link = self.link.clone().filter(|l| !l.is_empty())?;
        Some(NewsItem {
            title,
            link,
            published_at: self.pub_date.clone().unwrap_or_default(),
            source: self
                .source
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        })
    }
}

pub fn build_query(asset_type: &str, symbol: &str) -> String {
    match AssetClass::parse(asset_type) {
        AssetClass::Crypto => format!("{} crypto", symbol),
        AssetClass::Stock | AssetClass::Fund => format!("{} stock", symbol),
        AssetClass::RealEstate => format!("{} real estate market", symbol),
        _ => format!("{} finance", symbol),
    }
}

/// Search the news feed and keep today's headlines, falling back to the
/// newest entries of the feed when nothing was published today.
pub async fn fetch_headlines(
    client: &Client,
    base_url: &str,
    query: &str,
    limit: usize,
) -> FeedResult<Vec<NewsItem>> {
    info!("Fetching news feed for query: {}", query);

    let body = client
        .get(base_url)
        .query(&[("q", query), ("hl", "en-US"), ("gl", "US"), ("ceid", "US:en")])
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(FeedError::transport(PROVIDER))?
        .bytes()
        .await
        .map_err(FeedError::transport(PROVIDER))?;

    let entries = parse_feed(&decode_feed(&body))?;
    let headlines = select_headlines(&entries, Utc::now().date_naive(), limit);
    debug!("Kept {} of {} news items for '{}'", headlines.len(), entries.len(), query);
    Ok(headlines)
}

/// Decodes a feed body using the encoding named in its XML declaration.
/// A byte order mark wins over the declaration; UTF-8 is the default.
pub fn decode_feed(bytes: &[u8]) -> String {
    let encoding = declared_encoding(bytes)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!("News feed is not valid {}, replaced undecodable bytes", used.name());
    }
    text.into_owned()
}

fn declared_encoding(bytes: &[u8]) -> Option<&str> {
    let head = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if !head.starts_with(b"<?xml") {
        return None;
    }
    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = std::str::from_utf8(&head[..end]).ok()?;
    let rest = &decl[decl.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    value.find(quote).map(|i| &value[..i])
}

/// Collects every `item` element in document order, wherever it is nested.
pub fn parse_feed(xml: &str) -> FeedResult<Vec<FeedEntry>> {
    let doc = Document::parse(xml).map_err(|e| FeedError::malformed(PROVIDER, e.to_string()))?;

    let entries = doc
        .descendants()
        .filter(|node| is_plain_element(*node, "item"))
        .map(|item| FeedEntry {
            title: child_text(item, "title"),
            link: child_text(item, "link"),
            pub_date: child_text(item, "pubDate"),
            source: child_text(item, "source"),
        })
        .collect();
    Ok(entries)
}

/// RSS elements carry no namespace; `media:title` and friends are extensions.
fn is_plain_element(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace().is_none()
}

fn child_text(node: Node, name: &str) -> Option<String> {
    node.children()
        .find(|child| is_plain_element(*child, name))
        .and_then(|child| child.text())
        .map(str::to_string)
}

/// Calendar date (UTC) of an RFC 2822 `pubDate`.
pub fn published_on(pub_date: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc2822(pub_date.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

/// Up to `limit` valid entries published on `today`, in feed order. When none
/// match, the valid entries among the first `limit` of the feed are used.
pub fn select_headlines(entries: &[FeedEntry], today: NaiveDate, limit: usize) -> Vec<NewsItem> {
    let same_day: Vec<NewsItem> = entries
        .iter()
        .filter_map(|entry| {
            let item = entry.to_news_item()?;
            (published_on(&item.published_at)? == today).then_some(item)
        })
        .take(limit)
        .collect();

    if !same_day.is_empty() {
        return same_day;
    }

    entries
        .iter()
        .take(limit)
        .filter_map(FeedEntry::to_news_item)
        .collect()
}
