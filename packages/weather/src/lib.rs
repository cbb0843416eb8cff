#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Current weather lookup by city name.
//!
//! Produces a normalized [`WeatherReading`] using a multi-provider
//! strategy configured via TOML files in `services/`:
//!
//! 1. **`OpenWeather`** (priority 1): needs `OPENWEATHER_API_KEY` (or
//!    `OWM_API_KEY`). Skipped when no key is configured.
//! 2. **Open-Meteo** (priority 2): free, no API key. Geocodes the city
//!    first, then reads current conditions at the first match.
//!
//! Providers are loaded from the [`service_registry`] and tried in
//! priority order. A provider that errors (network failure, timeout,
//! non-success status, unknown city) hands over to the next one. When
//! every provider fails the caller gets [`WeatherError::Unavailable`];
//! a reading is never made up.

pub mod open_meteo;
pub mod open_weather;
pub mod service_registry;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use smart_spray_recommendation_models::WeatherReading;

use crate::service_registry::{ProviderConfig, WeatherService};

/// Per-request timeout for every provider call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from weather lookups.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed (connection, timeout, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("{provider} returned HTTP {status}")]
    Status {
        /// Provider or endpoint that failed.
        provider: &'static str,
        /// HTTP status code.
        status: u16,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Geocoding returned no match for the city.
    #[error("City not found: {city}")]
    CityNotFound {
        /// The city that was searched for.
        city: String,
    },

    /// The provider needs an API key and none is configured.
    #[error("No API key configured for {provider}")]
    MissingApiKey {
        /// Provider that needs the key.
        provider: String,
    },

    /// Every configured provider failed.
    #[error("All weather providers failed: {}", format_attempts(.attempts))]
    Unavailable {
        /// One entry per provider tried, in order.
        attempts: Vec<ProviderFailure>,
    },
}

/// Why a single provider failed during a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    /// Service ID from the registry.
    pub service_id: String,
    /// Rendered error message.
    pub message: String,
}

fn format_attempts(attempts: &[ProviderFailure]) -> String {
    if attempts.is_empty() {
        return "no providers enabled".to_string();
    }
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.service_id, a.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Anything that can resolve a city to a current weather reading.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Returns the current weather at `city`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError`] if no reading can be obtained.
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReading, WeatherError>;
}

/// Weather provider backed by the service registry.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: reqwest::Client,
    services: Vec<WeatherService>,
    api_key: Option<String>,
}

impl WeatherProvider {
    /// Creates a provider using the enabled registry services and the
    /// `OpenWeather` key from the environment, if any.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, WeatherError> {
        let api_key = open_weather::api_key_from_env();
        if api_key.is_none() {
            log::info!("No OpenWeather API key set; using Open-Meteo only");
        }
        Self::new(service_registry::enabled_services(), api_key)
    }

    /// Creates a provider for an explicit list of services, tried in the
    /// order given.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the HTTP client cannot be built.
    pub fn new(
        services: Vec<WeatherService>,
        api_key: Option<String>,
    ) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("smart-spray/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            services,
            api_key,
        })
    }

    /// The services this provider tries, in order.
    #[must_use]
    pub fn services(&self) -> &[WeatherService] {
        &self.services
    }

    async fn fetch_from(
        &self,
        service: &WeatherService,
        city: &str,
    ) -> Result<WeatherReading, WeatherError> {
        match &service.provider {
            ProviderConfig::OpenWeather { base_url, units } => {
                let api_key = self
                    .api_key
                    .as_deref()
                    .ok_or_else(|| WeatherError::MissingApiKey {
                        provider: service.id.clone(),
                    })?;
                open_weather::fetch_current(&self.client, base_url, units, api_key, city).await
            }
            ProviderConfig::OpenMeteo {
                geocoding_url,
                forecast_url,
            } => open_meteo::fetch_current(&self.client, geocoding_url, forecast_url, city).await,
        }
    }
}

#[async_trait]
impl WeatherSource for WeatherProvider {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReading, WeatherError> {
        let mut attempts = Vec::new();

        for service in &self.services {
            match self.fetch_from(service, city).await {
                Ok(reading) => {
                    log::info!("Weather for {city:?} from {}: {reading:?}", service.id);
                    return Ok(reading);
                }
                Err(e) => {
                    if matches!(e, WeatherError::MissingApiKey { .. }) {
                        log::debug!("Skipping {}: {e}", service.id);
                    } else {
                        log::warn!("Weather provider {} failed for {city:?}: {e}", service.id);
                    }
                    attempts.push(ProviderFailure {
                        service_id: service.id.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Err(WeatherError::Unavailable { attempts })
    }
}

/// A source that always returns the same reading.
///
/// Used when the caller already knows the conditions (CLI flags, tests).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWeather(pub WeatherReading);

#[async_trait]
impl WeatherSource for FixedWeather {
    async fn fetch_weather(&self, _city: &str) -> Result<WeatherReading, WeatherError> {
        Ok(self.0)
    }
}

/// Builds a reading from raw provider values.
///
/// Humidity is rounded and clamped to 0-100; negative rain or wind is
/// clamped to zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn normalize_reading(
    temp_c: f64,
    humidity_pct: f64,
    rain_mm_1h: f64,
    wind_speed_ms: f64,
) -> WeatherReading {
    let humidity = humidity_pct.round().clamp(0.0, 100.0) as u8;
    WeatherReading::new(temp_c, humidity, rain_mm_1h.max(0.0))
        .with_wind_speed(wind_speed_ms.max(0.0))
}

#[cfg(test)]
mod tests {
    use std::io::{Read as _, Write as _};
    use std::net::TcpListener;

    use super::*;

    /// Serves one canned HTTP response per accepted connection on a local
    /// port and returns the base URL.
    fn serve(status_line: &'static str, body: &'static str, connections: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            for stream in listener.incoming().take(connections) {
                let mut stream = stream.unwrap();
                let mut buf = [0u8; 4096];
                let mut request = Vec::new();
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).unwrap();
            }
        });
        format!("http://{addr}/")
    }

    fn open_weather_service(base_url: String) -> WeatherService {
        WeatherService {
            id: "open_weather".to_string(),
            name: "OpenWeather".to_string(),
            enabled: true,
            priority: 1,
            provider: ProviderConfig::OpenWeather {
                base_url,
                units: "metric".to_string(),
            },
        }
    }

    fn open_meteo_service(geocoding_url: String, forecast_url: String) -> WeatherService {
        WeatherService {
            id: "open_meteo".to_string(),
            name: "Open-Meteo".to_string(),
            enabled: true,
            priority: 2,
            provider: ProviderConfig::OpenMeteo {
                geocoding_url,
                forecast_url,
            },
        }
    }

    #[test]
    fn normalizes_raw_values() {
        let reading = normalize_reading(21.5, 84.6, -0.1, -2.0);
        assert_eq!(reading.humidity_pct, 85);
        assert!(reading.rain_mm_1h.abs() < f64::EPSILON);
        assert!(reading.wind_speed_ms.abs() < f64::EPSILON);

        assert_eq!(normalize_reading(10.0, 140.0, 0.0, 0.0).humidity_pct, 100);
        assert_eq!(normalize_reading(10.0, -5.0, 0.0, 0.0).humidity_pct, 0);
    }

    #[test]
    fn unavailable_lists_every_attempt() {
        let err = WeatherError::Unavailable {
            attempts: vec![
                ProviderFailure {
                    service_id: "open_weather".to_string(),
                    message: "open_weather returned HTTP 401".to_string(),
                },
                ProviderFailure {
                    service_id: "open_meteo".to_string(),
                    message: "City not found: Atlantis".to_string(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "All weather providers failed: open_weather: open_weather returned HTTP 401; \
             open_meteo: City not found: Atlantis"
        );
    }

    #[tokio::test]
    async fn fixed_weather_ignores_city() {
        let reading = WeatherReading::new(28.0, 85, 0.0);
        let source = FixedWeather(reading);
        assert_eq!(source.fetch_weather("anywhere").await.unwrap(), reading);
    }

    #[tokio::test]
    async fn missing_key_skips_to_unavailable() {
        let provider = WeatherProvider::new(
            vec![open_weather_service("http://127.0.0.1:9/".to_string())],
            None,
        )
        .unwrap();
        let err = provider.fetch_weather("Pune").await.unwrap_err();
        let WeatherError::Unavailable { attempts } = err else {
            panic!("expected Unavailable");
        };
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].service_id, "open_weather");
        assert!(attempts[0].message.contains("No API key"));
    }

    #[tokio::test]
    async fn no_services_is_unavailable() {
        let provider = WeatherProvider::new(Vec::new(), None).unwrap();
        let err = provider.fetch_weather("Pune").await.unwrap_err();
        assert!(matches!(err, WeatherError::Unavailable { ref attempts } if attempts.is_empty()));
    }

    #[tokio::test]
    async fn open_weather_success_short_circuits() {
        let ow = serve(
            "200 OK",
            r#"{"main":{"temp":28.0,"humidity":85},"rain":{"1h":0.0}}"#,
            1,
        );
        let provider = WeatherProvider::new(
            vec![
                open_weather_service(ow),
                open_meteo_service(
                    "http://127.0.0.1:9/".to_string(),
                    "http://127.0.0.1:9/".to_string(),
                ),
            ],
            Some("key".to_string()),
        )
        .unwrap();
        let reading = provider.fetch_weather("Pune").await.unwrap();
        assert_eq!(reading, WeatherReading::new(28.0, 85, 0.0));
    }

    #[tokio::test]
    async fn falls_back_to_open_meteo_on_error_status() {
        let ow = serve("500 Internal Server Error", r#"{"cod":500}"#, 1);
        let geo = serve(
            "200 OK",
            r#"{"results":[{"latitude":18.52,"longitude":73.86}]}"#,
            1,
        );
        let forecast = serve(
            "200 OK",
            r#"{"current":{"temperature_2m":24.0,"relative_humidity_2m":91,"precipitation":1.5,"wind_speed_10m":2.0}}"#,
            1,
        );
        let provider = WeatherProvider::new(
            vec![open_weather_service(ow), open_meteo_service(geo, forecast)],
            Some("key".to_string()),
        )
        .unwrap();
        let reading = provider.fetch_weather("Pune").await.unwrap();
        assert_eq!(
            reading,
            WeatherReading::new(24.0, 91, 1.5).with_wind_speed(2.0)
        );
    }

    #[tokio::test]
    async fn unknown_city_on_last_provider_is_unavailable() {
        let geo = serve("200 OK", r#"{"results":[]}"#, 1);
        let provider = WeatherProvider::new(
            vec![open_meteo_service(geo, "http://127.0.0.1:9/".to_string())],
            None,
        )
        .unwrap();
        let err = provider.fetch_weather("Atlantis").await.unwrap_err();
        let WeatherError::Unavailable { attempts } = err else {
            panic!("expected Unavailable");
        };
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].message, "City not found: Atlantis");
    }

    #[tokio::test]
    async fn geocoding_error_status_is_reported() {
        let geo = serve("503 Service Unavailable", "{}", 1);
        let provider = WeatherProvider::new(
            vec![open_meteo_service(geo, "http://127.0.0.1:9/".to_string())],
            None,
        )
        .unwrap();
        let err = provider.fetch_weather("Pune").await.unwrap_err();
        let WeatherError::Unavailable { attempts } = err else {
            panic!("expected Unavailable");
        };
        assert_eq!(
            attempts[0].message,
            "open_meteo_geocoding returned HTTP 503"
        );
    }
}
