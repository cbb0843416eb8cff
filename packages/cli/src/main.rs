#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for smart spray.
//!
//! Runs one-off recommendations and risk assessments against live or
//! explicitly supplied weather, and starts the API server.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use smart_spray_recommendation::{
    CropFungicideTable, CropRisk, DiseaseCategory, Recommendation, RecommendationEngine,
    WeatherReading, assess_crop_risk, classify,
};
use smart_spray_server::ServerConfig;
use smart_spray_weather::{FixedWeather, WeatherProvider, WeatherSource};

#[derive(Parser)]
#[command(name = "smart_spray", about = "Weather-aware spray recommendations")]
struct Cli {
    /// Alternate crop fungicide table (TOML). Defaults to `CROP_TABLE_PATH`
    /// or the built-in table.
    #[arg(long, global = true)]
    crop_table: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a spray for a crop and disease
    Recommend {
        /// Crop name (e.g., "tomato")
        #[arg(long)]
        crop: String,
        /// Disease or pest name (e.g., "Early Blight")
        #[arg(long)]
        disease: String,
        /// Soil moisture percentage
        #[arg(long)]
        soil: f64,
        #[command(flatten)]
        weather: WeatherArgs,
    },
    /// Show the current weather for a city
    Weather {
        /// City name
        #[arg(long)]
        city: String,
    },
    /// Assess the weather risk for a crop
    Risk {
        /// Crop name (e.g., "rice")
        #[arg(long)]
        crop: String,
        #[command(flatten)]
        weather: WeatherArgs,
    },
    /// Start the API server
    Serve {
        /// Prompt for bind address and port
        #[arg(long)]
        interactive: bool,
    },
}

/// Where the weather comes from: a live lookup by city, or explicit values.
#[derive(Args, Debug, Clone, PartialEq)]
struct WeatherArgs {
    /// City to fetch live weather for
    #[arg(long, conflicts_with_all = ["temp", "humidity"])]
    city: Option<String>,
    /// Temperature in °C (instead of --city)
    #[arg(long)]
    temp: Option<f64>,
    /// Relative humidity 0-100 (instead of --city)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    humidity: Option<u8>,
    /// Rain in the last hour, mm
    #[arg(long, default_value = "0")]
    rain: f64,
    /// Wind speed, m/s
    #[arg(long, default_value = "0")]
    wind: f64,
}

/// Errors surfaced by the CLI.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Neither a city nor explicit weather values were given.
    #[error("either --city or both --temp and --humidity are required")]
    NoWeather,
}

impl WeatherArgs {
    /// Builds the weather source these arguments describe.
    fn source(&self) -> Result<Box<dyn WeatherSource>, Box<dyn std::error::Error>> {
        if self.city.is_some() {
            return Ok(Box::new(WeatherProvider::from_env()?));
        }
        match (self.temp, self.humidity) {
            (Some(temp), Some(humidity)) => Ok(Box::new(FixedWeather(
                WeatherReading::new(temp, humidity, self.rain.max(0.0))
                    .with_wind_speed(self.wind.max(0.0)),
            ))),
            _ => Err(CliError::NoWeather.into()),
        }
    }

    async fn fetch(&self) -> Result<WeatherReading, Box<dyn std::error::Error>> {
        let source = self.source()?;
        let city = self.city.as_deref().unwrap_or_default();
        Ok(source.fetch_weather(city).await?)
    }
}

#[derive(Serialize)]
struct RecommendOutput {
    category: DiseaseCategory,
    #[serde(flatten)]
    recommendation: Recommendation,
    weather: WeatherReading,
}

#[derive(Serialize)]
struct RiskOutput {
    crop: String,
    #[serde(flatten)]
    risk: CropRisk,
    weather: WeatherReading,
}

fn load_table(path: Option<PathBuf>) -> Result<CropFungicideTable, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(CropFungicideTable::load(&path)?),
        None => {
            log::debug!("Using built-in crop table");
            Ok(CropFungicideTable::builtin())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();
    let crop_table = cli
        .crop_table
        .or_else(|| ServerConfig::from_env().crop_table_path);

    match cli.command {
        Commands::Recommend {
            crop,
            disease,
            soil,
            weather,
        } => {
            let engine = RecommendationEngine::new(load_table(crop_table)?);
            let reading = weather.fetch().await?;
            let output = RecommendOutput {
                category: classify(&disease),
                recommendation: engine.recommend(&crop, &disease, soil, &reading),
                weather: reading,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Weather { city } => {
            let provider = WeatherProvider::from_env()?;
            let reading = provider.fetch_weather(&city).await?;
            println!("{}", serde_json::to_string_pretty(&reading)?);
        }
        Commands::Risk { crop, weather } => {
            let reading = weather.fetch().await?;
            let output = RiskOutput {
                risk: assess_crop_risk(&crop, &reading),
                crop,
                weather: reading,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Serve { interactive } => {
            let config = ServerConfig {
                crop_table_path: crop_table,
                ..ServerConfig::from_env()
            };
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new().block_on(async move {
                    if interactive {
                        smart_spray_server::interactive::run(config).await
                    } else {
                        smart_spray_server::run_server(config).await
                    }
                })
            })
            .await??;
        }
    }

    Ok(())
}
