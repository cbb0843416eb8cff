#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the smart spray server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the engine's value types so the wire contract can evolve on its
//! own. Request fields are kept as raw JSON values so they can be echoed
//! back exactly as sent.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smart_spray_recommendation_models::{
    CropRisk, CropRiskLevel, Recommendation, SprayInputs, WeatherReading,
};
use thiserror::Error;

/// Boundary validation failures. Reported as HTTP 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields were absent, `null`, or empty.
    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A numeric field held something that is not a number.
    #[error("Invalid number for {field}: {value}")]
    InvalidNumber {
        /// Name of the offending field.
        field: &'static str,
        /// The value as received.
        value: String,
    },
}

/// Body of `POST /smart-spray`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmartSprayRequest {
    /// Crop name.
    #[serde(default)]
    pub crop_type: Option<Value>,
    /// Free-text disease or pest name.
    #[serde(default)]
    pub disease_name: Option<Value>,
    /// Soil moisture percentage, as a number or numeric string.
    #[serde(default)]
    pub soil_moisture: Option<Value>,
    /// City whose current weather is used.
    #[serde(default)]
    pub city: Option<Value>,
}

/// A validated `POST /smart-spray` request.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSprayRequest {
    /// Engine inputs.
    pub inputs: SprayInputs,
    /// City to fetch weather for.
    pub city: String,
}

impl SmartSprayRequest {
    /// Checks required fields and converts them into engine inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] listing every missing
    /// field in declaration order, or [`ValidationError::InvalidNumber`]
    /// if `soil_moisture` is not numeric.
    pub fn validate(&self) -> Result<ValidatedSprayRequest, ValidationError> {
        check_required(&[
            ("crop_type", &self.crop_type),
            ("disease_name", &self.disease_name),
            ("soil_moisture", &self.soil_moisture),
            ("city", &self.city),
        ])?;

        let soil_moisture_pct = parse_number("soil_moisture", self.soil_moisture.as_ref())?;

        Ok(ValidatedSprayRequest {
            inputs: SprayInputs {
                crop: value_to_string(self.crop_type.as_ref()),
                disease_name: value_to_string(self.disease_name.as_ref()),
                soil_moisture_pct,
            },
            city: value_to_string(self.city.as_ref()),
        })
    }
}

/// Body of `POST /weather-risk`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherRiskRequest {
    /// Crop name.
    #[serde(default)]
    pub crop_type: Option<Value>,
    /// City whose current weather is used.
    #[serde(default)]
    pub city: Option<Value>,
}

impl WeatherRiskRequest {
    /// Checks required fields and returns `(crop, city)`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] if either field is
    /// missing.
    pub fn validate(&self) -> Result<(String, String), ValidationError> {
        check_required(&[("crop_type", &self.crop_type), ("city", &self.city)])?;
        Ok((
            value_to_string(self.crop_type.as_ref()),
            value_to_string(self.city.as_ref()),
        ))
    }
}

/// A field counts as missing when absent, `null`, or an empty string.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn check_required(fields: &[(&'static str, &Option<Value>)]) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| is_missing(value.as_ref()))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

/// Renders a JSON value as plain text. Strings are taken verbatim.
fn value_to_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn parse_number(field: &'static str, value: Option<&Value>) -> Result<f64, ValidationError> {
    let invalid = || ValidationError::InvalidNumber {
        field,
        value: value_to_string(value),
    };
    match value {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(invalid),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Weather as echoed in API responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApiWeather {
    /// Temperature in °C.
    pub temp_c: f64,
    /// Relative humidity, 0-100.
    pub humidity: u8,
    /// Precipitation over the last hour in mm.
    pub rain_1h: f64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
}

impl From<WeatherReading> for ApiWeather {
    fn from(reading: WeatherReading) -> Self {
        Self {
            temp_c: reading.temp_c,
            humidity: reading.humidity_pct,
            rain_1h: reading.rain_mm_1h,
            wind_speed: reading.wind_speed_ms,
        }
    }
}

/// The raw request inputs, echoed back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSprayInputs {
    /// Crop name as sent.
    pub crop_type: Value,
    /// Disease name as sent.
    pub disease_name: Value,
    /// Soil moisture as sent.
    pub soil_moisture: Value,
    /// City as sent.
    pub city: Value,
}

impl From<&SmartSprayRequest> for ApiSprayInputs {
    fn from(req: &SmartSprayRequest) -> Self {
        Self {
            crop_type: req.crop_type.clone().unwrap_or(Value::Null),
            disease_name: req.disease_name.clone().unwrap_or(Value::Null),
            soil_moisture: req.soil_moisture.clone().unwrap_or(Value::Null),
            city: req.city.clone().unwrap_or(Value::Null),
        }
    }
}

/// Successful `POST /smart-spray` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSprayRecommendation {
    /// Product name and formulation.
    pub recommended_pesticide: String,
    /// Dose and unit.
    pub quantity: String,
    /// Spray window.
    pub best_time: String,
    /// Why this product was chosen.
    pub reason: String,
    /// Safety and application precautions.
    pub precautions: String,
    /// The reading the recommendation was based on.
    pub weather: ApiWeather,
    /// The request inputs.
    pub inputs: ApiSprayInputs,
}

impl ApiSprayRecommendation {
    /// Merges a recommendation with the weather and echoed inputs.
    #[must_use]
    pub fn new(rec: Recommendation, weather: WeatherReading, inputs: ApiSprayInputs) -> Self {
        Self {
            recommended_pesticide: rec.pesticide,
            quantity: rec.quantity,
            best_time: rec.best_time,
            reason: rec.reason,
            precautions: rec.precautions,
            weather: weather.into(),
            inputs,
        }
    }
}

/// Successful `POST /weather-risk` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCropRisk {
    /// Crop the risk was assessed for.
    pub crop_type: String,
    /// Overall level.
    pub level: CropRiskLevel,
    /// Additive score behind `level`.
    pub score: u32,
    /// One line per rule that fired.
    pub reasons: Vec<String>,
    /// The reading the assessment was based on.
    pub weather: ApiWeather,
}

impl ApiCropRisk {
    /// Builds the response from an assessment.
    #[must_use]
    pub fn new(crop_type: String, risk: CropRisk, weather: WeatherReading) -> Self {
        Self {
            crop_type,
            level: risk.level,
            score: risk.score,
            reasons: risk.reasons,
            weather: weather.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Always `"ok"` when the server answers.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Short error summary.
    pub error: String,
    /// Underlying cause, when there is one worth showing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
