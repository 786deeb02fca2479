//! Headline sources.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;
use tracing::warn;
use url::Url;

use crate::error::FetchError;
use crate::models::context::NewsItem;

pub const MAX_HEADLINES: usize = 5;
pub const NEWS_TIMEOUT: Duration = Duration::from_secs(3);

#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// At most [`MAX_HEADLINES`] items, possibly none.
    async fn fetch_headlines(&self, ticker: &str) -> Result<Vec<NewsItem>, FetchError>;
}

/// Google News RSS search.
pub struct GoogleNewsProvider {
    base_url: String,
    client: reqwest::Client,
}

impl GoogleNewsProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(NEWS_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "news client without timeout");
                reqwest::Client::default()
            });
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn search_url(&self, ticker: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)?.join("rss/search")?;
        url.query_pairs_mut()
            .append_pair("q", &format!("{} stock finance", ticker))
            .append_pair("hl", "en-US")
            .append_pair("gl", "US")
            .append_pair("ceid", "US:en");
        Ok(url)
    }
}

#[async_trait]
impl NewsProvider for GoogleNewsProvider {
    async fn fetch_headlines(&self, ticker: &str) -> Result<Vec<NewsItem>, FetchError> {
        let url = self.search_url(ticker)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                source_name: "google news",
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        Ok(parse_rss_items(&body, MAX_HEADLINES))
    }
}

static ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<item\b[^>]*>(.*?)</item>").expect("item regex"));
static TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<title\b[^>]*>(.*?)</title>").expect("title regex"));
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<link\b[^>]*>(.*?)</link>").expect("link regex"));

/// Extract `channel/item` title and link pairs from an RSS document.
pub fn parse_rss_items(xml: &str, limit: usize) -> Vec<NewsItem> {
    ITEM.captures_iter(xml)
        .take(limit)
        .map(|item| {
            let body = item.get(1).map_or("", |m| m.as_str());
            NewsItem {
                title: element_text(&TITLE, body).unwrap_or_else(|| "No Title".to_string()),
                url: element_text(&LINK, body).unwrap_or_else(|| "#".to_string()),
            }
        })
        .collect()
}

fn element_text(pattern: &Regex, body: &str) -> Option<String> {
    let raw = pattern.captures(body)?.get(1)?.as_str().trim();
    let raw = raw
        .strip_prefix("<![CDATA[")
        .and_then(|s| s.strip_suffix("]]>"))
        .unwrap_or(raw);
    let text = decode_entities(raw.trim());
    (!text.is_empty()).then_some(text)
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
