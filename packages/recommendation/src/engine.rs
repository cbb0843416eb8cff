//! Recommendation builder.
//!
//! Selects exactly one primary branch from the disease category, then
//! applies the soil modifiers and finally the rain override. Each step
//! returns a new [`Recommendation`]; nothing is mutated once returned.

use smart_spray_recommendation_models::{
    DiseaseCategory, Recommendation, Regimes, SprayInputs, WeatherReading,
};

use crate::classifier::classify;
use crate::crop_table::CropFungicideTable;
use crate::regime::classify_regimes;

const MORNING: &str = "Morning (6-9 AM)";
const EVENING: &str = "Evening (5-7 PM)";
const AFTER_RAIN: &str = "After rain stops (leaves dry)";
const RAIN_PRECAUTIONS: &str = "Do not spray during rain; wait for foliage to dry.";
const WET_SOIL_CLAUSE: &str = "Soil moisture is high; avoid over-irrigation.";
const DRY_SOIL_CLAUSE: &str = "Soil moisture is low; lightly irrigate before spray.";

/// The safe organic recommendation used when no disease branch fires.
#[must_use]
pub fn default_recommendation() -> Recommendation {
    Recommendation::new(
        "Neem Oil (Azadirachtin 0.3%)",
        "3 ml per liter",
        EVENING,
        "Default safe organic recommendation.",
        "Wear gloves and mask. Avoid direct sun and rain.",
    )
}

/// Deterministic spray recommendation engine.
///
/// Holds only a read-only crop table, so a single engine can be shared
/// across threads and requests.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    crop_table: CropFungicideTable,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(CropFungicideTable::builtin())
    }
}

impl RecommendationEngine {
    /// Creates an engine that uses `crop_table` for fungicide overrides.
    #[must_use]
    pub const fn new(crop_table: CropFungicideTable) -> Self {
        Self { crop_table }
    }

    /// The crop table this engine was built with.
    #[must_use]
    pub const fn crop_table(&self) -> &CropFungicideTable {
        &self.crop_table
    }

    /// Produces a recommendation for the given crop, disease, soil
    /// moisture, and weather.
    ///
    /// Never fails: unrecognized diseases get the default recommendation
    /// and unrecognized crops get the generic fungicide.
    #[must_use]
    pub fn recommend(
        &self,
        crop: &str,
        disease_name: &str,
        soil_moisture_pct: f64,
        weather: &WeatherReading,
    ) -> Recommendation {
        let category = classify(disease_name);
        let regimes = classify_regimes(weather, soil_moisture_pct);

        log::debug!(
            "recommend: crop={crop:?} disease={disease_name:?} category={category} regimes={regimes:?}"
        );

        let rec = self.primary_branch(crop, category, &regimes);
        let rec = apply_soil_modifiers(rec, &regimes);
        apply_rain_override(rec, &regimes)
    }

    /// Convenience wrapper over [`Self::recommend`] for a [`SprayInputs`].
    #[must_use]
    pub fn recommend_for(&self, inputs: &SprayInputs, weather: &WeatherReading) -> Recommendation {
        self.recommend(
            &inputs.crop,
            &inputs.disease_name,
            inputs.soil_moisture_pct,
            weather,
        )
    }

    fn primary_branch(
        &self,
        crop: &str,
        category: DiseaseCategory,
        regimes: &Regimes,
    ) -> Recommendation {
        match category {
            DiseaseCategory::Fungal if regimes.humid_and_warm() => {
                let (pesticide, quantity) = self.crop_table.fungicide_or_generic(crop);
                Recommendation::new(
                    pesticide,
                    quantity,
                    if regimes.very_hot { EVENING } else { MORNING },
                    "High humidity with warm conditions favor fungal growth.",
                    "Avoid spraying during rain. Wear gloves and eye protection.",
                )
            }
            DiseaseCategory::Fungal => Recommendation::new(
                "Neem Oil (Azadirachtin 0.3%)",
                "3 ml per liter",
                EVENING,
                "Mild fungal pressure expected; organic spray sufficient.",
                "Ensure uniform coverage on both leaf surfaces.",
            ),
            DiseaseCategory::Bacterial => Recommendation::new(
                "Copper Hydroxide 77% WP",
                "2 g per liter",
                MORNING,
                "Copper compounds effective against bacterial diseases.",
                "Do not mix with strong alkalis; avoid spraying before rain.",
            ),
            DiseaseCategory::Insect if regimes.humid_and_warm() => Recommendation::new(
                "Spinosad 45% SC",
                "0.3 ml per liter",
                EVENING,
                "Warm, humid weather usually increases insect activity.",
                "Avoid drift; protect pollinators (spray at dusk).",
            ),
            DiseaseCategory::Insect => Recommendation::new(
                "Neem Oil (Azadirachtin 0.15%)",
                "3 ml per liter",
                EVENING,
                "Moderate insect pressure; organic control recommended.",
                "Cover the undersides of leaves thoroughly.",
            ),
            DiseaseCategory::Viral => Recommendation::new(
                "Insect vector control (Imidacloprid 17.8% SL)",
                "0.3 ml per liter",
                EVENING,
                "Viral diseases require vector control (aphids/whiteflies).",
                "Remove infected plants; use sticky traps.",
            ),
            DiseaseCategory::Unknown => default_recommendation(),
        }
    }
}

/// Appends soil clauses to the reason. Each predicate is applied on its own.
fn apply_soil_modifiers(rec: Recommendation, regimes: &Regimes) -> Recommendation {
    let rec = if regimes.wet_soil {
        rec.with_reason_clause(WET_SOIL_CLAUSE)
    } else {
        rec
    };
    if regimes.dry_soil {
        rec.with_reason_clause(DRY_SOIL_CLAUSE)
    } else {
        rec
    }
}

/// Rain overwrites the spray window and precautions whatever branch fired.
fn apply_rain_override(rec: Recommendation, regimes: &Regimes) -> Recommendation {
    if regimes.raining {
        rec.with_best_time(AFTER_RAIN)
            .with_precautions(RAIN_PRECAUTIONS)
    } else {
        rec
    }
}
