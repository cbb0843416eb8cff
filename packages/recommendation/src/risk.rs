//! Crop weather risk assessment.
//!
//! Additive per-crop scoring over the current reading. Each rule that
//! fires adds its weight and a one-line reason; the total maps to a
//! [`CropRiskLevel`]. Crops without rules always score zero.

use smart_spray_recommendation_models::{CropRisk, CropRiskLevel, WeatherReading};

/// Assesses the weather risk to `crop` under the given reading.
#[must_use]
pub fn assess_crop_risk(crop: &str, weather: &WeatherReading) -> CropRisk {
    let temp = weather.temp_c;
    let hum = weather.humidity_pct;
    let rain = weather.rain_mm_1h;
    let wind = weather.wind_speed_ms;

    let mut score = 0;
    let mut reasons = Vec::new();
    let mut add = |weight: u32, reason: &str| {
        score += weight;
        reasons.push(reason.to_string());
    };

    match crop.trim().to_lowercase().as_str() {
        "tomato" => {
            if hum > 85 && (12.0..=25.0).contains(&temp) && rain > 0.0 {
                add(3, "High humidity + rain in 12-25°C → blight risk");
            } else if hum > 75 && rain > 0.0 {
                add(2, "Humid with rain → fungal risk");
            }
            if temp > 35.0 {
                add(1, "Heat stress possible");
            }
        }
        "rice" => {
            if rain >= 10.0 {
                add(3, "Heavy rain → disease/lodging risk");
            }
            if hum > 85 && (20.0..=30.0).contains(&temp) {
                add(2, "Warm and very humid → blast risk");
            }
            if wind > 12.0 {
                add(1, "Strong wind → lodging risk");
            }
        }
        "wheat" => {
            if (5.0..=15.0).contains(&temp) && hum > 70 {
                add(2, "Cool and humid → rust risk");
            }
            if rain > 0.0 {
                add(1, "Leaf wetness → fungal risk");
            }
        }
        "cotton" => {
            if temp > 35.0 && hum < 30 {
                add(2, "Hot and dry → heat stress");
            }
            if wind > 10.0 {
                add(1, "Windy → pest/dust stress");
            }
            if rain >= 10.0 {
                add(1, "Heavy rain → waterlogging risk");
            }
        }
        other => log::debug!("No risk rules for crop {other:?}"),
    }

    CropRisk {
        level: CropRiskLevel::from_score(score),
        score,
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tomato_blight_weather_is_high() {
        let risk = assess_crop_risk("tomato", &WeatherReading::new(20.0, 90, 1.0));
        assert_eq!(risk.level, CropRiskLevel::High);
        assert_eq!(risk.score, 3);
        assert_eq!(risk.reasons.len(), 1);
    }

    #[test]
    fn tomato_humid_rain_outside_band_is_moderate() {
        let risk = assess_crop_risk("Tomato", &WeatherReading::new(28.0, 80, 1.0));
        assert_eq!(risk.level, CropRiskLevel::Moderate);
        assert_eq!(risk.reasons, ["Humid with rain → fungal risk"]);
    }

    #[test]
    fn tomato_heat_only_is_low() {
        let risk = assess_crop_risk("tomato", &WeatherReading::new(38.0, 40, 0.0));
        assert_eq!(risk.level, CropRiskLevel::Low);
        assert_eq!(risk.score, 1);
    }

    #[test]
    fn rice_scores_accumulate() {
        let weather = WeatherReading::new(25.0, 90, 12.0).with_wind_speed(13.0);
        let risk = assess_crop_risk("rice", &weather);
        assert_eq!(risk.score, 6);
        assert_eq!(risk.level, CropRiskLevel::High);
        assert_eq!(risk.reasons.len(), 3);
    }

    #[test]
    fn wheat_cool_humid_is_moderate() {
        let risk = assess_crop_risk("wheat", &WeatherReading::new(10.0, 75, 0.0));
        assert_eq!(risk.level, CropRiskLevel::Moderate);
        assert_eq!(risk.reasons, ["Cool and humid → rust risk"]);
    }

    #[test]
    fn cotton_thresholds_are_strict() {
        let calm = WeatherReading::new(35.0, 29, 9.9).with_wind_speed(10.0);
        assert_eq!(assess_crop_risk("cotton", &calm).score, 0);

        let rough = WeatherReading::new(36.0, 20, 10.0).with_wind_speed(11.0);
        let risk = assess_crop_risk("cotton", &rough);
        assert_eq!(risk.score, 4);
        assert_eq!(risk.level, CropRiskLevel::High);
    }

    #[test]
    fn unknown_crop_is_low() {
        let risk = assess_crop_risk("mango", &WeatherReading::new(40.0, 95, 50.0));
        assert_eq!(risk.level, CropRiskLevel::Low);
        assert_eq!(risk.score, 0);
        assert!(risk.reasons.is_empty());
    }
}
