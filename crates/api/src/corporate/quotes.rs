//! Currency and crypto quotes against BRL from AwesomeAPI.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{json, Value};
use vitrine_core::feeds::{trend, QuotePair};

pub const QUOTES_URL: &str = "https://economia.awesomeapi.com.br/json/last";

/// One pair as returned by the provider. Numbers arrive as strings.
#[derive(Debug, Deserialize)]
pub struct RawQuote {
    pub bid: String,
    #[serde(rename = "pctChange", default)]
    pub pct_change: Option<String>,
}

/// Response keyed by pair symbol, e.g. `USDBRL`.
pub type QuotesResponse = HashMap<String, RawQuote>;

/// The path segment listing requested pairs, e.g. `USD-BRL,BTC-BRL`.
pub fn pair_list(pairs: &[QuotePair]) -> String {
    pairs
        .iter()
        .map(|p| format!("{}-BRL", p.code))
        .collect::<Vec<_>>()
        .join(",")
}

pub async fn fetch(
    client: &reqwest::Client,
    pairs: &[QuotePair],
) -> Result<QuotesResponse, super::FeedError> {
    let url = format!("{QUOTES_URL}/{}", pair_list(pairs));
    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(super::FeedError::HttpStatus(response.status().as_u16()));
    }
    Ok(response.json().await?)
}

/// Device-facing quote panel data, in `pairs` order. Pairs the provider did
/// not return, or returned unparseable, are left out.
pub fn summarize(pairs: &[QuotePair], response: &QuotesResponse) -> Value {
    let entry = |pair: &QuotePair| {
        let raw = response.get(pair.symbol)?;
        let value: f64 = raw.bid.trim().parse().ok()?;
        let change_pct: f64 = raw
            .pct_change
            .as_deref()
            .and_then(|c| c.trim().parse().ok())
            .unwrap_or(0.0);
        Some(json!({
            "code": pair.code,
            "name": pair.name,
            "value": value,
            "change_pct": change_pct,
            "trend": trend(change_pct),
        }))
    };

    let currencies: Vec<Value> = pairs.iter().filter(|p| !p.crypto).filter_map(entry).collect();
    let crypto: Vec<Value> = pairs.iter().filter(|p| p.crypto).filter_map(entry).collect();

    json!({
        "base": "BRL",
        "currencies": currencies,
        "crypto": crypto,
    })
}
