//! Compile-time registry of weather service configurations.
//!
//! Each weather provider is defined in a TOML file under `services/`.
//! The registry embeds these at compile time and exposes them via
//! [`all_services`] and [`enabled_services`].

use serde::Deserialize;

/// A weather service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherService {
    /// Unique identifier (e.g., `"open_weather"`, `"open_meteo"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this service takes part in the fallback chain.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Execution order; lower values run first.
    pub priority: u32,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// `OpenWeather` current weather API. Requires an API key.
    OpenWeather {
        /// Endpoint URL (e.g., `"https://api.openweathermap.org/data/2.5/weather"`).
        base_url: String,
        /// Unit system passed as `units`.
        #[serde(default = "default_units")]
        units: String,
    },
    /// Open-Meteo geocoding followed by a current-conditions forecast.
    /// No API key.
    OpenMeteo {
        /// Geocoding search endpoint.
        geocoding_url: String,
        /// Forecast endpoint.
        forecast_url: String,
    },
}

const fn default_true() -> bool {
    true
}

fn default_units() -> String {
    "metric".to_string()
}

impl WeatherService {
    /// Returns the first URL this provider contacts.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match &self.provider {
            ProviderConfig::OpenWeather { base_url, .. } => base_url,
            ProviderConfig::OpenMeteo { geocoding_url, .. } => geocoding_url,
        }
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[
    ("open_weather", include_str!("../services/open_weather.toml")),
    ("open_meteo", include_str!("../services/open_meteo.toml")),
];

#[cfg(test)]
const EXPECTED_SERVICE_COUNT: usize = 2;

/// Returns all weather service configurations (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_services() -> Vec<WeatherService> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse weather service '{name}': {e}"))
        })
        .collect()
}

/// Returns only enabled services, sorted by priority (ascending).
#[must_use]
pub fn enabled_services() -> Vec<WeatherService> {
    let mut services: Vec<WeatherService> =
        all_services().into_iter().filter(|s| s.enabled).collect();
    services.sort_by_key(|s| s.priority);
    services
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_services() {
        let services = all_services();
        assert_eq!(services.len(), EXPECTED_SERVICE_COUNT);
    }

    #[test]
    fn service_ids_are_unique() {
        let services = all_services();
        let mut seen = BTreeSet::new();
        for svc in &services {
            assert!(seen.insert(&svc.id), "Duplicate service ID: {}", svc.id);
        }
    }

    #[test]
    fn all_services_have_required_fields() {
        for svc in &all_services() {
            assert!(!svc.id.is_empty(), "Service has empty id");
            assert!(!svc.name.is_empty(), "Service {} has empty name", svc.id);
            assert!(
                !svc.base_url().is_empty(),
                "Service {} has empty base_url",
                svc.id
            );
        }
    }

    #[test]
    fn keyed_provider_runs_before_fallback() {
        let ids: Vec<String> = enabled_services().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["open_weather", "open_meteo"]);
    }

    #[test]
    fn open_weather_defaults_to_metric() {
        let svc: WeatherService = toml::de::from_str(
            r#"
            id = "ow"
            name = "OW"
            priority = 1

            [provider]
            type = "open_weather"
            base_url = "http://localhost"
            "#,
        )
        .unwrap();
        assert!(svc.enabled);
        assert!(matches!(
            svc.provider,
            ProviderConfig::OpenWeather { ref units, .. } if units == "metric"
        ));
    }
}
