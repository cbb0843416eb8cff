//! Disease name classification.
//!
//! Maps a free-text disease or pest name to a [`DiseaseCategory`] using
//! ordered keyword rules. Rules are tested top to bottom and the first
//! match wins, so a name such as "blight virus" is [`DiseaseCategory::Fungal`].

use smart_spray_recommendation_models::DiseaseCategory;

/// Ordered `(category, keywords)` rules. Order is significant.
const DISEASE_RULES: &[(DiseaseCategory, &[&str])] = &[
    (
        DiseaseCategory::Fungal,
        &["blight", "mildew", "mold", "rust", "spot"],
    ),
    (DiseaseCategory::Bacterial, &["bacterial"]),
    (
        DiseaseCategory::Insect,
        &["aphid", "whitefly", "borer", "thrip", "caterpillar"],
    ),
    (DiseaseCategory::Viral, &["virus", "viral"]),
];

/// Classifies a disease name into a pathogen category.
///
/// The name is trimmed and lower-cased; keywords match as plain
/// substrings. Returns [`DiseaseCategory::Unknown`] when no rule matches.
#[must_use]
pub fn classify(disease_name: &str) -> DiseaseCategory {
    let lower = disease_name.trim().to_lowercase();

    DISEASE_RULES
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map_or(DiseaseCategory::Unknown, |(category, _)| *category)
}

/// Checks if `haystack` contains any of the given `needles`.
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fungal_keywords() {
        assert_eq!(classify("Early Blight"), DiseaseCategory::Fungal);
        assert_eq!(classify("Powdery Mildew"), DiseaseCategory::Fungal);
        assert_eq!(classify("Leaf Mold"), DiseaseCategory::Fungal);
        assert_eq!(classify("Wheat Rust"), DiseaseCategory::Fungal);
        assert_eq!(classify("Septoria leaf spot"), DiseaseCategory::Fungal);
    }

    #[test]
    fn bacterial_keyword() {
        assert_eq!(classify("Bacterial Wilt"), DiseaseCategory::Bacterial);
    }

    #[test]
    fn insect_keywords() {
        assert_eq!(classify("Aphids"), DiseaseCategory::Insect);
        assert_eq!(classify("whitefly infestation"), DiseaseCategory::Insect);
        assert_eq!(classify("Stem Borer"), DiseaseCategory::Insect);
        assert_eq!(classify("Thrips"), DiseaseCategory::Insect);
        assert_eq!(classify("Fruit caterpillar"), DiseaseCategory::Insect);
    }

    #[test]
    fn viral_keywords() {
        assert_eq!(classify("Mosaic Virus"), DiseaseCategory::Viral);
        assert_eq!(classify("viral leaf curl"), DiseaseCategory::Viral);
    }

    #[test]
    fn unmatched_is_unknown() {
        assert_eq!(classify("Unknown Disease"), DiseaseCategory::Unknown);
        assert_eq!(classify(""), DiseaseCategory::Unknown);
        assert_eq!(classify("   "), DiseaseCategory::Unknown);
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        assert_eq!(classify("  LATE BLIGHT  "), DiseaseCategory::Fungal);
        assert_eq!(classify("BaCtErIaL spot"), DiseaseCategory::Fungal);
    }

    #[test]
    fn fungal_beats_viral() {
        for name in [
            "blight virus",
            "viral mildew",
            "Rust and Mosaic Virus",
            "spotted viral wilt",
        ] {
            assert_eq!(classify(name), DiseaseCategory::Fungal, "{name}");
        }
    }

    #[test]
    fn earlier_rules_win_over_later_ones() {
        // bacterial before insect, insect before viral
        assert_eq!(classify("bacterial aphid"), DiseaseCategory::Bacterial);
        assert_eq!(classify("whitefly virus"), DiseaseCategory::Insect);
    }

    #[test]
    fn substring_matching_has_no_word_boundaries() {
        // "rust" inside "frustration" still counts.
        assert_eq!(classify("frustration"), DiseaseCategory::Fungal);
    }
}
