//! `OpenWeather` current weather client.
//!
//! Needs an API key, read from `OPENWEATHER_API_KEY` or `OWM_API_KEY`.
//!
//! See <https://openweathermap.org/current>

use smart_spray_recommendation_models::WeatherReading;

use crate::{WeatherError, normalize_reading};

/// Environment variables checked, in order, for an `OpenWeather` key.
pub const API_KEY_VARS: &[&str] = &["OPENWEATHER_API_KEY", "OWM_API_KEY"];

/// Reads the `OpenWeather` API key from the environment.
///
/// Returns the first of [`API_KEY_VARS`] that is set and non-empty.
#[must_use]
pub fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|key| !key.trim().is_empty())
}

/// Fetches the current weather for a city by name.
///
/// # Errors
///
/// Returns [`WeatherError`] if the request fails, the server answers with
/// a non-success status, or the body is not JSON.
pub async fn fetch_current(
    client: &reqwest::Client,
    base_url: &str,
    units: &str,
    api_key: &str,
    city: &str,
) -> Result<WeatherReading, WeatherError> {
    let resp = client
        .get(base_url)
        .query(&[("q", city), ("appid", api_key), ("units", units)])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(WeatherError::Status {
            provider: "open_weather",
            status: status.as_u16(),
        });
    }

    let body: serde_json::Value = resp.json().await?;
    Ok(parse_response(&body))
}

/// Parses an `OpenWeather` response. Absent fields read as zero.
fn parse_response(body: &serde_json::Value) -> WeatherReading {
    let temp_c = body["main"]["temp"].as_f64().unwrap_or(0.0);
    let humidity = body["main"]["humidity"].as_f64().unwrap_or(0.0);
    let rain_1h = body["rain"]["1h"].as_f64().unwrap_or(0.0);
    let wind = body["wind"]["speed"].as_f64().unwrap_or(0.0);

    normalize_reading(temp_c, humidity, rain_1h, wind)
}
