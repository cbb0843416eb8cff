//! Crop-specific product overrides.
//!
//! The built-in table is embedded at compile time from
//! `tables/crops.toml`. An alternate table with the same layout can be
//! loaded from disk with [`CropFungicideTable::load`] and injected into
//! [`crate::RecommendationEngine::new`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Product used by the fungal branch when a crop has no override.
pub const GENERIC_FUNGICIDE: (&str, &str) = ("Copper Oxychloride", "2.5 g per liter");

const BUILTIN_TABLE: &str = include_str!("../tables/crops.toml");

/// Errors from loading a crop table.
#[derive(Debug, Error)]
pub enum CropTableError {
    /// The table file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The table is not valid TOML or has the wrong shape.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A product and its dose.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Treatment {
    /// Product name and formulation.
    pub pesticide: String,
    /// Dose and unit.
    pub quantity: String,
}

/// Per-crop overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CropTreatments {
    /// Fungicide used under high-humidity warm conditions.
    pub fungicide: Option<Treatment>,
    /// Insecticide for the crop. Not consulted by the engine.
    pub insecticide: Option<Treatment>,
}

#[derive(Debug, Deserialize)]
struct CropTableFile {
    #[serde(default)]
    crops: BTreeMap<String, CropTreatments>,
}

/// Read-only lookup from lower-case crop name to its overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CropFungicideTable {
    crops: BTreeMap<String, CropTreatments>,
}

impl CropFungicideTable {
    /// Returns the table embedded in the binary.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (this is a compile-time
    /// guarantee since the table is embedded).
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_TABLE)
            .unwrap_or_else(|e| panic!("Failed to parse built-in crop table: {e}"))
    }

    /// Parses a table from TOML text. Crop names are lower-cased.
    ///
    /// # Errors
    ///
    /// Returns [`CropTableError::Parse`] if the text is not a valid table.
    pub fn from_toml_str(text: &str) -> Result<Self, CropTableError> {
        let file: CropTableFile = toml::de::from_str(text)?;
        Ok(Self::from_entries(file.crops))
    }

    /// Reads and parses a table from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CropTableError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CropTableError> {
        let text = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&text)?;
        log::info!(
            "Loaded crop table from {} ({} crops)",
            path.display(),
            table.len()
        );
        Ok(table)
    }

    /// Builds a table from crop name/override pairs.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, CropTreatments)>) -> Self {
        Self {
            crops: entries
                .into_iter()
                .map(|(crop, treatments)| (crop.trim().to_lowercase(), treatments))
                .collect(),
        }
    }

    /// Returns the overrides for a crop, if any.
    #[must_use]
    pub fn get(&self, crop: &str) -> Option<&CropTreatments> {
        self.crops.get(&crop.trim().to_lowercase())
    }

    /// Returns the fungicide override for a crop, if any.
    #[must_use]
    pub fn fungicide(&self, crop: &str) -> Option<&Treatment> {
        self.get(crop).and_then(|t| t.fungicide.as_ref())
    }

    /// Returns the crop's fungicide as `(pesticide, quantity)`, falling
    /// back to [`GENERIC_FUNGICIDE`].
    #[must_use]
    pub fn fungicide_or_generic(&self, crop: &str) -> (&str, &str) {
        self.fungicide(crop).map_or(GENERIC_FUNGICIDE, |t| {
            (t.pesticide.as_str(), t.quantity.as_str())
        })
    }

    /// Number of crops in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.crops.len()
    }

    /// Whether the table has no crops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    /// Iterates crop names in sorted order.
    pub fn crops(&self) -> impl Iterator<Item = &str> {
        self.crops.keys().map(String::as_str)
    }
}
