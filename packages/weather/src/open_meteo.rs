//! Open-Meteo client.
//!
//! Used as the fallback when `OpenWeather` is unavailable or no key is
//! configured. Resolves the city with the geocoding API, then asks the
//! forecast API for current conditions at the first match. No API key.
//!
//! See <https://open-meteo.com/en/docs> and
//! <https://open-meteo.com/en/docs/geocoding-api>

use smart_spray_recommendation_models::WeatherReading;

use crate::{WeatherError, normalize_reading};

/// Current-condition variables requested from the forecast API.
const CURRENT_VARIABLES: &str = "temperature_2m,relative_humidity_2m,precipitation,wind_speed_10m";

/// Coordinates of a geocoded place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

/// Geocodes `city` and fetches its current weather.
///
/// # Errors
///
/// Returns [`WeatherError::CityNotFound`] if geocoding yields no results,
/// or another [`WeatherError`] if either request fails.
pub async fn fetch_current(
    client: &reqwest::Client,
    geocoding_url: &str,
    forecast_url: &str,
    city: &str,
) -> Result<WeatherReading, WeatherError> {
    let coords = geocode(client, geocoding_url, city).await?;
    log::debug!(
        "Open-Meteo geocoded {city:?} to ({}, {})",
        coords.latitude,
        coords.longitude
    );
    forecast(client, forecast_url, coords).await
}

/// Resolves a city name to coordinates using the first geocoding match.
///
/// # Errors
///
/// Returns [`WeatherError`] if the request fails, the status is not a
/// success, or the city is unknown.
pub async fn geocode(
    client: &reqwest::Client,
    geocoding_url: &str,
    city: &str,
) -> Result<Coordinates, WeatherError> {
    let resp = client
        .get(geocoding_url)
        .query(&[
            ("name", city),
            ("count", "1"),
            ("language", "en"),
            ("format", "json"),
        ])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(WeatherError::Status {
            provider: "open_meteo_geocoding",
            status: status.as_u16(),
        });
    }

    let body: serde_json::Value = resp.json().await?;
    parse_geocoding(&body, city)
}

/// Fetches current conditions at the given coordinates.
///
/// # Errors
///
/// Returns [`WeatherError`] if the request fails or the status is not a
/// success.
pub async fn forecast(
    client: &reqwest::Client,
    forecast_url: &str,
    coords: Coordinates,
) -> Result<WeatherReading, WeatherError> {
    let resp = client
        .get(forecast_url)
        .query(&[
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("current", CURRENT_VARIABLES.to_string()),
            ("wind_speed_unit", "ms".to_string()),
        ])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(WeatherError::Status {
            provider: "open_meteo_forecast",
            status: status.as_u16(),
        });
    }

    let body: serde_json::Value = resp.json().await?;
    Ok(parse_forecast(&body))
}

/// Parses the geocoding response, taking the first result.
fn parse_geocoding(body: &serde_json::Value, city: &str) -> Result<Coordinates, WeatherError> {
    let Some(first) = body["results"].as_array().and_then(|r| r.first()) else {
        return Err(WeatherError::CityNotFound {
            city: city.to_string(),
        });
    };

    let latitude = first["latitude"]
        .as_f64()
        .ok_or_else(|| WeatherError::Parse {
            message: "Missing latitude in Open-Meteo geocoding response".to_string(),
        })?;

    let longitude = first["longitude"]
        .as_f64()
        .ok_or_else(|| WeatherError::Parse {
            message: "Missing longitude in Open-Meteo geocoding response".to_string(),
        })?;

    Ok(Coordinates {
        latitude,
        longitude,
    })
}

/// Parses the `current` block of a forecast response. Absent fields read
/// as zero.
fn parse_forecast(body: &serde_json::Value) -> WeatherReading {
    let current = &body["current"];
    normalize_reading(
        current["temperature_2m"].as_f64().unwrap_or(0.0),
        current["relative_humidity_2m"].as_f64().unwrap_or(0.0),
        current["precipitation"].as_f64().unwrap_or(0.0),
        current["wind_speed_10m"].as_f64().unwrap_or(0.0),
    )
}
