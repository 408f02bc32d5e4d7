//! Current conditions and a short forecast from Open-Meteo.

use serde::Deserialize;
use serde_json::{json, Value};
use vitrine_core::feeds::describe_wmo_code;

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const FORECAST_DAYS: &str = "3";

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: CurrentConditions,
    pub daily: DailyForecast,
}

#[derive(Debug, Deserialize)]
pub struct CurrentConditions {
    pub temperature_2m: f64,
    pub relative_humidity_2m: Option<f64>,
    pub weather_code: i64,
    pub wind_speed_10m: Option<f64>,
}

/// Column-oriented daily series, one value per forecast day.
#[derive(Debug, Deserialize)]
pub struct DailyForecast {
    pub time: Vec<String>,
    pub weather_code: Vec<i64>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    #[serde(default)]
    pub precipitation_probability_max: Vec<Option<f64>>,
}

pub async fn fetch(
    client: &reqwest::Client,
    latitude: f64,
    longitude: f64,
) -> Result<ForecastResponse, super::FeedError> {
    let response = client
        .get(FORECAST_URL)
        .query(&[
            ("latitude", latitude.to_string().as_str()),
            ("longitude", longitude.to_string().as_str()),
            (
                "current",
                "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m",
            ),
            (
                "daily",
                "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max",
            ),
            ("timezone", "auto"),
            ("forecast_days", FORECAST_DAYS),
        ])
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(super::FeedError::HttpStatus(response.status().as_u16()));
    }
    Ok(response.json().await?)
}

/// Device-facing weather panel data.
pub fn summarize(venue_name: &str, forecast: &ForecastResponse) -> Value {
    let (description, condition) = describe_wmo_code(forecast.current.weather_code);
    let background = condition.background();

    let daily = &forecast.daily;
    let days: Vec<Value> = daily
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let code = daily.weather_code.get(i).copied().unwrap_or(-1);
            let (day_description, day_condition) = describe_wmo_code(code);
            json!({
                "date": date,
                "description": day_description,
                "condition": day_condition,
                "max": daily.temperature_2m_max.get(i).map(|t| t.round()),
                "min": daily.temperature_2m_min.get(i).map(|t| t.round()),
                "precipitation_pct": daily.precipitation_probability_max.get(i).copied().flatten(),
            })
        })
        .collect();

    json!({
        "venue": venue_name,
        "temperature": forecast.current.temperature_2m.round(),
        "humidity": forecast.current.relative_humidity_2m,
        "wind_speed": forecast.current.wind_speed_10m,
        "description": description,
        "condition": condition,
        "background": background,
        "forecast": days,
    })
}
