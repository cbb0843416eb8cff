#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Spray recommendation rule engine.
//!
//! Given a crop, a free-text disease name, a soil moisture percentage, and
//! a normalized [`WeatherReading`], the [`RecommendationEngine`] produces a
//! [`Recommendation`] in four steps:
//!
//! 1. **Classify** the disease name into a [`DiseaseCategory`] with
//!    ordered keyword rules ([`classifier`]).
//! 2. **Derive regimes** (humid, warm, very hot, wet/dry soil, raining)
//!    from fixed thresholds ([`regime`]).
//! 3. **Select one primary branch** by category and regime. The fungal
//!    branch consults the injected [`CropFungicideTable`].
//! 4. **Apply modifiers**: soil clauses are appended to the reason, then
//!    rain overrides the spray window and precautions.
//!
//! The engine is a pure function of its inputs and never fails.
//!
//! The [`risk`] module adds a separate per-crop weather risk assessment.

pub mod classifier;
pub mod crop_table;
pub mod engine;
pub mod regime;
pub mod risk;

pub use classifier::classify;
pub use crop_table::{CropFungicideTable, CropTableError};
pub use engine::{RecommendationEngine, default_recommendation};
pub use regime::classify_regimes;
pub use risk::assess_crop_risk;

pub use smart_spray_recommendation_models::{
    CropRisk, CropRiskLevel, DiseaseCategory, Recommendation, Regimes, SprayInputs,
    WeatherReading,
};
