//! Corporate panel resolution backed by external data feeds.
//!
//! [`FeedResolver`] turns a corporate content reference into a payload.
//! Weather, quotes and news are fetched from public APIs, cached in
//! process and counted against a per-provider daily budget stored in
//! `api_quotas`. Custom designs point at a pre-rendered asset.

pub mod cache;
pub mod news;
pub mod quotes;
pub mod weather;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{FixedOffset, Utc};
use serde_json::Value;
use sqlx::PgPool;
use vitrine_core::content::AssetUrls;
use vitrine_core::corporate::{
    CorporateContent, CorporateContentResolver, CorporateKind, CorporatePayload, VenueContext,
};
use vitrine_core::error::CoreError;
use vitrine_core::feeds::quote_pairs;
use vitrine_core::quota::{PROVIDER_NEWS, PROVIDER_QUOTES, PROVIDER_WEATHER};
use vitrine_db::repositories::ApiQuotaRepo;

use crate::config::FeedConfig;
use cache::FeedCache;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Why a corporate panel could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The underlying HTTP request failed (network, DNS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider returned HTTP {0}")]
    HttpStatus(u16),

    /// The provider answered but reported an error in its body.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Malformed feed document: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    #[error("Daily request limit reached for {0}")]
    QuotaExhausted(&'static str),

    #[error("Venue has no coordinates")]
    MissingCoordinates,

    #[error("Custom design has no asset configured")]
    MissingAsset,

    #[error("Quota bookkeeping failed: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<FeedError> for CoreError {
    fn from(err: FeedError) -> Self {
        CoreError::DegradedContent(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// FeedResolver
// ---------------------------------------------------------------------------

/// Resolves corporate panels against the live feeds.
pub struct FeedResolver {
    pool: PgPool,
    client: reqwest::Client,
    config: FeedConfig,
    urls: AssetUrls,
    /// Offset used to decide which day a quota counter belongs to.
    offset: FixedOffset,
    cache: FeedCache,
}

impl FeedResolver {
    pub fn new(pool: PgPool, config: FeedConfig, urls: AssetUrls, offset: FixedOffset) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            pool,
            client,
            config,
            urls,
            offset,
            cache: FeedCache::new(),
        }
    }

    /// Serve from cache, else spend one request of `provider`'s daily budget
    /// on `fetch` and cache the result.
    async fn guarded<F, Fut>(
        &self,
        provider: &'static str,
        daily_limit: i32,
        cache_mins: u64,
        key: String,
        fetch: F,
    ) -> Result<Value, FeedError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, FeedError>>,
    {
        let ttl = Duration::from_secs(cache_mins * 60);
        self.cache
            .get_or_fill(&key, ttl, move || async move {
                self.reserve_request(provider, daily_limit).await?;
                fetch().await
            })
            .await
    }

    /// Count one request against the provider's budget for the local day.
    async fn reserve_request(&self, provider: &'static str, daily_limit: i32) -> Result<(), FeedError> {
        let today = Utc::now().with_timezone(&self.offset).date_naive();
        let mut quota = ApiQuotaRepo::find_or_create(&self.pool, provider, daily_limit, today)
            .await?
            .to_domain();
        if quota.reset_if_stale(today) {
            ApiQuotaRepo::reset_if_stale(&self.pool, provider, today).await?;
            tracing::info!(provider, %today, "Daily feed quota reset");
        }
        if !quota.can_request() {
            return Err(FeedError::QuotaExhausted(provider));
        }
        match ApiQuotaRepo::record_request(&self.pool, provider).await? {
            Some(updated) => {
                tracing::debug!(
                    provider,
                    remaining = updated.to_domain().remaining(),
                    "Feed request counted"
                );
                Ok(())
            }
            None => Err(FeedError::QuotaExhausted(provider)),
        }
    }

    async fn weather(&self, venue: &VenueContext) -> Result<Value, FeedError> {
        let (latitude, longitude) = venue.coordinates().ok_or(FeedError::MissingCoordinates)?;
        let key = format!("{PROVIDER_WEATHER}:{latitude:.3},{longitude:.3}");
        let forecast = self
            .guarded(
                PROVIDER_WEATHER,
                self.config.weather_daily_limit,
                self.config.weather_cache_mins,
                key,
                || async {
                    let forecast = weather::fetch(&self.client, latitude, longitude).await?;
                    Ok(weather::summarize("", &forecast))
                },
            )
            .await?;
        Ok(with_venue(forecast, &venue.name))
    }

    async fn quotes(&self, content: &CorporateContent) -> Result<Value, FeedError> {
        let pairs = quote_pairs(&content.filter.currencies, &content.filter.crypto);
        let key = format!("{PROVIDER_QUOTES}:{}", quotes::pair_list(&pairs));
        self.guarded(
            PROVIDER_QUOTES,
            self.config.quotes_daily_limit,
            self.config.quotes_cache_mins,
            key,
            || async {
                let response = quotes::fetch(&self.client, &pairs).await?;
                Ok(quotes::summarize(&pairs, &response))
            },
        )
        .await
    }

    /// NewsAPI headlines, or the Google News RSS feed when no key is
    /// configured or NewsAPI fails. An exhausted budget is not retried
    /// through RSS.
    async fn news(&self) -> Result<Value, FeedError> {
        let Some(api_key) = self.config.news_api_key.as_deref() else {
            tracing::debug!("No NewsAPI key configured, using RSS headlines");
            return self.rss_news().await;
        };
        let country = self.config.news_country.as_str();
        let key = format!("{PROVIDER_NEWS}:{country}");
        let result = self
            .guarded(
                PROVIDER_NEWS,
                self.config.news_daily_limit,
                self.config.news_cache_mins,
                key,
                || async {
                    let response = news::fetch(&self.client, api_key, country).await?;
                    Ok(news::summarize(&response))
                },
            )
            .await;
        match result {
            Err(err) if falls_back_to_rss(&err) => {
                tracing::warn!(error = %err, "NewsAPI failed, using RSS headlines");
                self.rss_news().await
            }
            other => other,
        }
    }

    async fn rss_news(&self) -> Result<Value, FeedError> {
        let ttl = Duration::from_secs(self.config.news_cache_mins * 60);
        self.cache
            .get_or_fill(&format!("{PROVIDER_NEWS}:rss"), ttl, move || async move {
                let feed = news::fetch_rss(&self.client).await?;
                Ok(news::summarize_rss(&feed))
            })
            .await
    }
}

/// Upstream failures switch to RSS; budget and bookkeeping failures do not.
fn falls_back_to_rss(err: &FeedError) -> bool {
    matches!(
        err,
        FeedError::Request(_) | FeedError::HttpStatus(_) | FeedError::Provider(_) | FeedError::Xml(_)
    )
}

/// Weather payloads are cached per coordinate; the venue name is stamped on
/// after the cache so nearby venues can share an entry.
fn with_venue(mut payload: Value, venue_name: &str) -> Value {
    if let Some(obj) = payload.as_object_mut() {
        obj.insert("venue".to_string(), Value::String(venue_name.to_string()));
    }
    payload
}

/// The render reference for a custom design panel.
pub fn custom_design(content: &CorporateContent, urls: &AssetUrls) -> Result<CorporatePayload, FeedError> {
    let path = content
        .filter
        .asset_path
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or(FeedError::MissingAsset)?;
    Ok(CorporatePayload::RenderRef {
        url: urls.asset_url(path),
    })
}

#[async_trait]
impl CorporateContentResolver for FeedResolver {
    async fn resolve(
        &self,
        content: &CorporateContent,
        venue: &VenueContext,
    ) -> Result<CorporatePayload, CoreError> {
        let data = match content.kind {
            CorporateKind::CustomDesign => return Ok(custom_design(content, &self.urls)?),
            CorporateKind::Weather => self.weather(venue).await?,
            CorporateKind::Quotes => self.quotes(content).await?,
            CorporateKind::News => self.news().await?,
        };
        Ok(CorporatePayload::Inline { data })
    }
}
