#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for smart spray recommendations.
//!
//! Exposes `POST /smart-spray` (spray recommendation for a crop, disease,
//! soil moisture and city), `POST /weather-risk` (per-crop weather risk)
//! and `GET /health`. Weather comes from the [`smart_spray_weather`]
//! provider chain; decisions come from the
//! [`smart_spray_recommendation`] engine.

pub mod error;
mod handlers;
pub mod interactive;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use smart_spray_recommendation::{CropFungicideTable, RecommendationEngine};
use smart_spray_weather::{WeatherProvider, WeatherSource};

use crate::error::ApiError;

/// Default bind address when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
/// Default port when `PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 5000;

/// Shared application state.
pub struct AppState {
    /// Recommendation engine with its crop table.
    pub engine: Arc<RecommendationEngine>,
    /// Weather lookup used by every request.
    pub weather: Arc<dyn WeatherSource>,
}

/// Server settings, usually read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind_addr: String,
    /// Port to bind.
    pub port: u16,
    /// Optional alternate crop table; the built-in table is used when
    /// `None`.
    pub crop_table_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            crop_table_path: None,
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT` and `CROP_TABLE_PATH`, falling back to
    /// defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = lookup("BIND_ADDR")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let crop_table_path = lookup("CROP_TABLE_PATH")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self {
            bind_addr,
            port,
            crop_table_path,
        }
    }
}

/// Registers the API routes and JSON extractor settings.
///
/// Bodies are parsed as JSON whatever their content type; parse failures
/// are reported as [`ApiError::InvalidJson`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json = web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| ApiError::InvalidJson(err.to_string()).into());

    cfg.app_data(json)
        .route("/health", web::get().to(handlers::health))
        .route("/smart-spray", web::post().to(handlers::smart_spray))
        .route("/weather-risk", web::post().to(handlers::weather_risk));
}

/// Builds the engine from the configured crop table.
///
/// # Errors
///
/// Returns an error if the configured crop table cannot be loaded.
pub fn build_engine(
    config: &ServerConfig,
) -> Result<RecommendationEngine, smart_spray_recommendation::CropTableError> {
    let table = match &config.crop_table_path {
        Some(path) => CropFungicideTable::load(path)?,
        None => CropFungicideTable::builtin(),
    };
    Ok(RecommendationEngine::new(table))
}

/// Starts the smart spray API server.
///
/// Loads the crop table, builds the weather provider chain from the
/// environment, and starts the Actix-Web HTTP server. This is a regular
/// async function. The caller is responsible for providing the async
/// runtime (e.g. via `#[actix_web::main]`) and for initializing logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the crop table cannot be loaded,
/// the HTTP client cannot be built, or the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!("Loading crop table...");
    let engine = build_engine(&config).map_err(std::io::Error::other)?;
    log::info!("Crop table has {} crops", engine.crop_table().len());

    log::info!("Building weather provider chain...");
    let weather = WeatherProvider::from_env().map_err(std::io::Error::other)?;
    for svc in weather.services() {
        log::info!("  {} (priority {})", svc.name, svc.priority);
    }

    let state = web::Data::new(AppState {
        engine: Arc::new(engine),
        weather: Arc::new(weather),
    });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1"),
            ("PORT", "8081"),
            ("CROP_TABLE_PATH", "/etc/smart-spray/crops.toml"),
        ]);
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8081);
        assert_eq!(
            config.crop_table_path,
            Some(PathBuf::from("/etc/smart-spray/crops.toml"))
        );
    }

    #[test]
    fn invalid_port_falls_back() {
        assert_eq!(config_from(&[("PORT", "http")]).port, DEFAULT_PORT);
    }

    #[test]
    fn builtin_engine_without_table_path() {
        let engine = build_engine(&ServerConfig::default()).unwrap();
        assert_eq!(engine.crop_table(), &CropFungicideTable::builtin());
    }

    #[test]
    fn missing_table_path_is_an_error() {
        let config = ServerConfig {
            crop_table_path: Some(PathBuf::from("/nonexistent/smart-spray/crops.toml")),
            ..ServerConfig::default()
        };
        assert!(build_engine(&config).is_err());
    }
}
