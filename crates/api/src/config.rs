use chrono::FixedOffset;
use vitrine_core::content::AssetUrls;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Venue-local offset used for weekday and time-of-day matching, read
    /// from `DISPLAY_UTC_OFFSET_MINUTES` (default: `-180`).
    pub display_offset: FixedOffset,
    /// Prefix for media asset URLs.
    pub media_base_url: String,
    /// Prefix for QR tracking URLs.
    pub public_base_url: String,
    /// Key required in `x-api-key` by the monitoring routes. Unset disables them.
    pub monitor_api_key: Option<String>,
    /// External data feed settings.
    pub feeds: FeedConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                       |
    /// |------------------------------|-------------------------------|
    /// | `HOST`                       | `0.0.0.0`                     |
    /// | `PORT`                       | `3000`                        |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`       |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                          |
    /// | `DISPLAY_UTC_OFFSET_MINUTES` | `-180`                        |
    /// | `MEDIA_BASE_URL`             | `http://localhost:3000/media` |
    /// | `PUBLIC_BASE_URL`            | `http://localhost:3000`       |
    /// | `MONITOR_API_KEY`            | unset                         |
    ///
    /// Feed settings are documented on [`FeedConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let display_offset = parse_display_offset(
            &std::env::var("DISPLAY_UTC_OFFSET_MINUTES").unwrap_or_else(|_| "-180".into()),
        )
        .unwrap_or_else(|e| panic!("DISPLAY_UTC_OFFSET_MINUTES {e}"));

        let media_base_url = std::env::var("MEDIA_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/media".into());
        let public_base_url =
            std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        let monitor_api_key = non_empty_var("MONITOR_API_KEY");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            display_offset,
            media_base_url,
            public_base_url,
            monitor_api_key,
            feeds: FeedConfig::from_env(),
        }
    }

    pub fn asset_urls(&self) -> AssetUrls {
        AssetUrls::new(&self.media_base_url, &self.public_base_url)
    }
}

/// Cache lifetimes, daily budgets and credentials for the external feeds.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub news_api_key: Option<String>,
    /// Two-letter country code for news headlines.
    pub news_country: String,
    pub weather_cache_mins: u64,
    pub quotes_cache_mins: u64,
    pub news_cache_mins: u64,
    pub weather_daily_limit: i32,
    pub quotes_daily_limit: i32,
    pub news_daily_limit: i32,
    /// Per-call HTTP timeout.
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            news_country: "br".to_string(),
            weather_cache_mins: 30,
            quotes_cache_mins: 30,
            news_cache_mins: 60,
            weather_daily_limit: 1000,
            quotes_daily_limit: 1000,
            news_daily_limit: 100,
            timeout_secs: 10,
        }
    }
}

impl FeedConfig {
    /// Load feed settings from environment variables with defaults.
    ///
    /// | Env Var                    | Default |
    /// |----------------------------|---------|
    /// | `NEWS_API_KEY`             | unset   |
    /// | `NEWS_COUNTRY`             | `br`    |
    /// | `FEED_CACHE_WEATHER_MINS`  | `30`    |
    /// | `FEED_CACHE_QUOTES_MINS`   | `30`    |
    /// | `FEED_CACHE_NEWS_MINS`     | `60`    |
    /// | `FEED_DAILY_LIMIT_WEATHER` | `1000`  |
    /// | `FEED_DAILY_LIMIT_QUOTES`  | `1000`  |
    /// | `FEED_DAILY_LIMIT_NEWS`    | `100`   |
    /// | `FEED_TIMEOUT_SECS`        | `10`    |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            news_api_key: non_empty_var("NEWS_API_KEY"),
            news_country: non_empty_var("NEWS_COUNTRY").unwrap_or(defaults.news_country),
            weather_cache_mins: parsed_var("FEED_CACHE_WEATHER_MINS", defaults.weather_cache_mins),
            quotes_cache_mins: parsed_var("FEED_CACHE_QUOTES_MINS", defaults.quotes_cache_mins),
            news_cache_mins: parsed_var("FEED_CACHE_NEWS_MINS", defaults.news_cache_mins),
            weather_daily_limit: parsed_var("FEED_DAILY_LIMIT_WEATHER", defaults.weather_daily_limit),
            quotes_daily_limit: parsed_var("FEED_DAILY_LIMIT_QUOTES", defaults.quotes_daily_limit),
            news_daily_limit: parsed_var("FEED_DAILY_LIMIT_NEWS", defaults.news_daily_limit),
            timeout_secs: parsed_var("FEED_TIMEOUT_SECS", defaults.timeout_secs),
        }
    }
}

/// Parse a UTC offset given in minutes. Values beyond +/- 24 hours are
/// rejected.
fn parse_display_offset(raw: &str) -> Result<FixedOffset, String> {
    let minutes: i32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("must be a whole number of minutes, got {raw:?}"))?;
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| format!("must be within +/- 24 hours, got {minutes}"))
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse `name` if set; panics at startup on an unparseable value.
fn parsed_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid number")),
        Err(_) => default,
    }
}
