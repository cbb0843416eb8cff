#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Value types shared by the smart spray recommendation engine, the
//! weather providers, and the API server.
//!
//! Everything here is an immutable per-request value: a normalized
//! [`WeatherReading`], the caller's [`SprayInputs`], the derived
//! [`DiseaseCategory`] and [`Regimes`], and the resulting
//! [`Recommendation`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A normalized current-conditions weather reading.
///
/// Providers with different response shapes all produce this type. Units
/// are fixed: degrees Celsius, percent, millimetres, metres per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Air temperature in °C.
    pub temp_c: f64,
    /// Relative humidity, 0-100.
    pub humidity_pct: u8,
    /// Precipitation over the last hour in mm.
    pub rain_mm_1h: f64,
    /// Wind speed in m/s. Only used by the crop risk assessment.
    #[serde(default)]
    pub wind_speed_ms: f64,
}

impl WeatherReading {
    /// Creates a reading with no wind.
    #[must_use]
    pub const fn new(temp_c: f64, humidity_pct: u8, rain_mm_1h: f64) -> Self {
        Self {
            temp_c,
            humidity_pct,
            rain_mm_1h,
            wind_speed_ms: 0.0,
        }
    }

    /// Returns a copy of this reading with the given wind speed.
    #[must_use]
    pub const fn with_wind_speed(mut self, wind_speed_ms: f64) -> Self {
        self.wind_speed_ms = wind_speed_ms;
        self
    }
}

/// The caller-supplied inputs for a single recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprayInputs {
    /// Crop name, e.g. `"tomato"`. Matched case-insensitively.
    pub crop: String,
    /// Free-text disease or pest name as reported by the grower.
    pub disease_name: String,
    /// Soil moisture percentage (expected 0-100, not enforced).
    pub soil_moisture_pct: f64,
}

/// Coarse pathogen class inferred from a disease name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DiseaseCategory {
    /// Blights, mildews, molds, rusts and leaf spots
    Fungal,
    /// Bacterial wilts, cankers and spots named as bacterial
    Bacterial,
    /// Sap-sucking and chewing pests
    Insect,
    /// Virus-borne diseases, controlled through their vectors
    Viral,
    /// No known keyword matched
    Unknown,
}

impl DiseaseCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Fungal,
            Self::Bacterial,
            Self::Insect,
            Self::Viral,
            Self::Unknown,
        ]
    }
}

/// Threshold-derived weather and soil conditions for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Regimes {
    /// Humidity at or above 80%.
    pub high_humidity: bool,
    /// Temperature in the closed range 20-34 °C.
    pub warm: bool,
    /// Temperature above 34 °C.
    pub very_hot: bool,
    /// Soil moisture at or above 60%.
    pub wet_soil: bool,
    /// Soil moisture at or below 30%.
    pub dry_soil: bool,
    /// Any precipitation in the last hour.
    pub raining: bool,
}

impl Regimes {
    /// Whether the weather favors both fungal growth and insect activity.
    #[must_use]
    pub const fn humid_and_warm(&self) -> bool {
        self.high_humidity && self.warm
    }
}

/// A spray recommendation.
///
/// Built by successive refinement: each `with_*` method consumes the value
/// and returns the amended copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Product name and formulation.
    pub pesticide: String,
    /// Dose and unit, e.g. `"3 ml per liter"`.
    pub quantity: String,
    /// Human-readable spray window.
    pub best_time: String,
    /// Why this product was chosen, with any soil clauses appended.
    pub reason: String,
    /// Safety and application precautions.
    pub precautions: String,
}

impl Recommendation {
    /// Creates a recommendation from its five fields.
    #[must_use]
    pub fn new(
        pesticide: impl Into<String>,
        quantity: impl Into<String>,
        best_time: impl Into<String>,
        reason: impl Into<String>,
        precautions: impl Into<String>,
    ) -> Self {
        Self {
            pesticide: pesticide.into(),
            quantity: quantity.into(),
            best_time: best_time.into(),
            reason: reason.into(),
            precautions: precautions.into(),
        }
    }

    /// Appends a sentence to the reason, separated by a single space.
    #[must_use]
    pub fn with_reason_clause(mut self, clause: &str) -> Self {
        self.reason.push(' ');
        self.reason.push_str(clause);
        self
    }

    /// Replaces the spray window.
    #[must_use]
    pub fn with_best_time(mut self, best_time: impl Into<String>) -> Self {
        self.best_time = best_time.into();
        self
    }

    /// Replaces the precautions.
    #[must_use]
    pub fn with_precautions(mut self, precautions: impl Into<String>) -> Self {
        self.precautions = precautions.into();
        self
    }
}

/// Overall weather risk for a crop.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum CropRiskLevel {
    /// Score of 0 or 1
    Low,
    /// Score of exactly 2
    Moderate,
    /// Score of 3 or more
    High,
}

impl CropRiskLevel {
    /// Maps an additive risk score to a level.
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        match score {
            0 | 1 => Self::Low,
            2 => Self::Moderate,
            _ => Self::High,
        }
    }
}

/// Result of a crop weather risk assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRisk {
    /// Overall level derived from `score`.
    pub level: CropRiskLevel,
    /// Sum of the weights of every rule that fired.
    pub score: u32,
    /// One line per rule that fired, in evaluation order.
    pub reasons: Vec<String>,
}
