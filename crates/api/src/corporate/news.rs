//! Top headlines from NewsAPI, with the Google News RSS feed as a keyless
//! fallback.

use serde::Deserialize;
use serde_json::{json, Value};

pub const HEADLINES_URL: &str = "https://newsapi.org/v2/top-headlines";

/// Google News front page for Brazil. Needs no API key.
pub const RSS_URL: &str = "https://news.google.com/rss";

const PAGE_SIZE: &str = "10";
const MAX_HEADLINES: usize = 10;
const RSS_SOURCE: &str = "Google News";

#[derive(Debug, Deserialize)]
pub struct HeadlinesResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: Option<String>,
    pub description: Option<String>,
    pub source: Option<ArticleSource>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleSource {
    pub name: Option<String>,
}

pub async fn fetch(
    client: &reqwest::Client,
    api_key: &str,
    country: &str,
) -> Result<HeadlinesResponse, super::FeedError> {
    let response = client
        .get(HEADLINES_URL)
        .query(&[
            ("country", country),
            ("pageSize", PAGE_SIZE),
            ("apiKey", api_key),
        ])
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(super::FeedError::HttpStatus(response.status().as_u16()));
    }
    let body: HeadlinesResponse = response.json().await?;
    if body.status != "ok" {
        return Err(super::FeedError::Provider(
            body.message.unwrap_or_else(|| body.status.clone()),
        ));
    }
    Ok(body)
}

/// Device-facing headline list. Articles without a title are dropped.
pub fn summarize(response: &HeadlinesResponse) -> Value {
    let headlines: Vec<Value> = response
        .articles
        .iter()
        .filter(|a| a.title.as_deref().is_some_and(|t| !t.trim().is_empty()))
        .map(|a| {
            json!({
                "title": a.title,
                "description": a.description,
                "source": a.source.as_ref().and_then(|s| s.name.clone()),
                "image_url": a.url_to_image,
                "published_at": a.published_at,
            })
        })
        .collect();
    json!({ "headlines": headlines })
}

// ---------------------------------------------------------------------------
// RSS fallback
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RssFeed {
    pub channel: RssChannel,
}

#[derive(Debug, Deserialize)]
pub struct RssChannel {
    #[serde(rename = "item", default)]
    pub items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
pub struct RssItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "pubDate", default)]
    pub pub_date: String,
}

pub async fn fetch_rss(client: &reqwest::Client) -> Result<RssFeed, super::FeedError> {
    let response = client
        .get(RSS_URL)
        .query(&[("hl", "pt-BR"), ("gl", "BR"), ("ceid", "BR:pt-419")])
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(super::FeedError::HttpStatus(response.status().as_u16()));
    }
    let body = response.text().await?;
    parse_rss(&body)
}

pub fn parse_rss(body: &str) -> Result<RssFeed, super::FeedError> {
    Ok(quick_xml::de::from_str(body)?)
}

/// Same shape as [`summarize`]. Google News appends the outlet to the title
/// as `"Headline - Outlet"`; it is split off into `source`.
pub fn summarize_rss(feed: &RssFeed) -> Value {
    let headlines: Vec<Value> = feed
        .channel
        .items
        .iter()
        .filter(|item| !item.title.trim().is_empty())
        .take(MAX_HEADLINES)
        .map(|item| {
            let (title, source) = item
                .title
                .rsplit_once(" - ")
                .unwrap_or((item.title.as_str(), RSS_SOURCE));
            json!({
                "title": title.trim(),
                "description": item.description,
                "source": source.trim(),
                "image_url": Value::Null,
                "published_at": item.pub_date,
            })
        })
        .collect();
    json!({ "headlines": headlines })
}
