//! Static lookup tables for the external data feeds: WMO weather codes,
//! weather backgrounds and the currency/crypto pairs quoted against BRL.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Coarse sky condition used to pick the panel background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Storm,
}

/// Description used for codes missing from the table.
pub const UNKNOWN_WEATHER: &str = "Unknown";

/// Map a WMO weather interpretation code to a description and condition.
/// Unknown codes map to cloudy.
pub fn describe_wmo_code(code: i64) -> (&'static str, WeatherCondition) {
    use WeatherCondition::*;
    match code {
        0 => ("Clear sky", Sunny),
        1 => ("Mainly clear", Sunny),
        2 => ("Partly cloudy", Cloudy),
        3 => ("Overcast", Cloudy),
        45 => ("Fog", Cloudy),
        48 => ("Depositing rime fog", Cloudy),
        51 => ("Light drizzle", Rainy),
        53 => ("Moderate drizzle", Rainy),
        55 => ("Dense drizzle", Rainy),
        56 => ("Light freezing drizzle", Rainy),
        57 => ("Dense freezing drizzle", Rainy),
        61 => ("Slight rain", Rainy),
        63 => ("Moderate rain", Rainy),
        65 => ("Heavy rain", Rainy),
        66 => ("Light freezing rain", Rainy),
        67 => ("Heavy freezing rain", Rainy),
        71 => ("Slight snow fall", Rainy),
        73 => ("Moderate snow fall", Rainy),
        75 => ("Heavy snow fall", Rainy),
        77 => ("Snow grains", Rainy),
        80 => ("Slight rain showers", Rainy),
        81 => ("Moderate rain showers", Rainy),
        82 => ("Violent rain showers", Rainy),
        85 => ("Slight snow showers", Rainy),
        86 => ("Heavy snow showers", Rainy),
        95 => ("Thunderstorm", Storm),
        96 => ("Thunderstorm with slight hail", Storm),
        99 => ("Thunderstorm with heavy hail", Storm),
        _ => (UNKNOWN_WEATHER, Cloudy),
    }
}

/// Gradient and icon the device draws behind a weather panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherBackground {
    pub gradient_start: &'static str,
    pub gradient_end: &'static str,
    pub icon: &'static str,
}

impl WeatherCondition {
    pub fn background(&self) -> WeatherBackground {
        let (gradient_start, gradient_end, icon) = match self {
            Self::Sunny => ("#FF8C00", "#FFD700", "sun"),
            Self::Cloudy => ("#636FA4", "#E8CBC0", "cloud"),
            Self::Rainy => ("#2C3E50", "#3498DB", "rain"),
            Self::Storm => ("#0F2027", "#2C5364", "storm"),
        };
        WeatherBackground {
            gradient_start,
            gradient_end,
            icon,
        }
    }
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// A quotable asset: code, display name and the provider's pair symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotePair {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub crypto: bool,
}

const fn fiat(code: &'static str, name: &'static str, symbol: &'static str) -> QuotePair {
    QuotePair {
        code,
        name,
        symbol,
        crypto: false,
    }
}

const fn coin(code: &'static str, name: &'static str, symbol: &'static str) -> QuotePair {
    QuotePair {
        code,
        name,
        symbol,
        crypto: true,
    }
}

pub const CURRENCY_PAIRS: &[QuotePair] = &[
    fiat("USD", "US Dollar", "USDBRL"),
    fiat("EUR", "Euro", "EURBRL"),
    fiat("GBP", "Pound Sterling", "GBPBRL"),
    fiat("ARS", "Argentine Peso", "ARSBRL"),
    fiat("JPY", "Japanese Yen", "JPYBRL"),
];

pub const CRYPTO_PAIRS: &[QuotePair] = &[
    coin("BTC", "Bitcoin", "BTCBRL"),
    coin("ETH", "Ethereum", "ETHBRL"),
    coin("USDT", "Tether", "USDTBRL"),
    coin("XRP", "Ripple", "XRPBRL"),
    coin("ADA", "Cardano", "ADABRL"),
];

pub const DEFAULT_CURRENCIES: &[&str] = &["USD", "EUR"];
pub const DEFAULT_CRYPTO: &[&str] = &["BTC"];

fn lookup(table: &'static [QuotePair], code: &str) -> Option<QuotePair> {
    table
        .iter()
        .find(|p| p.code.eq_ignore_ascii_case(code.trim()))
        .copied()
}

/// Select the pairs to quote. Unknown codes are ignored. The defaults of both
/// groups are used when nothing was selected or nothing valid remains.
pub fn quote_pairs(currencies: &[String], crypto: &[String]) -> Vec<QuotePair> {
    let mut pairs: Vec<QuotePair> = currencies
        .iter()
        .filter_map(|c| lookup(CURRENCY_PAIRS, c))
        .chain(crypto.iter().filter_map(|c| lookup(CRYPTO_PAIRS, c)))
        .collect();

    if pairs.is_empty() {
        pairs = DEFAULT_CURRENCIES
            .iter()
            .filter_map(|c| lookup(CURRENCY_PAIRS, c))
            .chain(DEFAULT_CRYPTO.iter().filter_map(|c| lookup(CRYPTO_PAIRS, c)))
            .collect();
    }
    pairs
}

/// Direction of a percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

pub fn trend(pct_change: f64) -> Trend {
    if pct_change > 0.0 {
        Trend::Up
    } else if pct_change < 0.0 {
        Trend::Down
    } else {
        Trend::Stable
    }
}
