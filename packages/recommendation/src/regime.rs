//! Weather and soil regime thresholds.

use smart_spray_recommendation_models::{Regimes, WeatherReading};

/// Humidity (%) at or above which conditions count as highly humid.
pub const HIGH_HUMIDITY_PCT: u8 = 80;
/// Lower bound (inclusive, °C) of the warm band.
pub const WARM_MIN_C: f64 = 20.0;
/// Upper bound (inclusive, °C) of the warm band. Anything hotter is very hot.
pub const WARM_MAX_C: f64 = 34.0;
/// Soil moisture (%) at or above which soil is wet.
pub const WET_SOIL_PCT: f64 = 60.0;
/// Soil moisture (%) at or below which soil is dry.
pub const DRY_SOIL_PCT: f64 = 30.0;

/// Derives the boolean regimes for a reading and soil moisture value.
///
/// Temperatures below [`WARM_MIN_C`] are neither warm nor very hot, and
/// soil moisture strictly between [`DRY_SOIL_PCT`] and [`WET_SOIL_PCT`]
/// is neither wet nor dry.
#[must_use]
pub fn classify_regimes(weather: &WeatherReading, soil_moisture_pct: f64) -> Regimes {
    Regimes {
        high_humidity: weather.humidity_pct >= HIGH_HUMIDITY_PCT,
        warm: (WARM_MIN_C..=WARM_MAX_C).contains(&weather.temp_c),
        very_hot: weather.temp_c > WARM_MAX_C,
        wet_soil: soil_moisture_pct >= WET_SOIL_PCT,
        dry_soil: soil_moisture_pct <= DRY_SOIL_PCT,
        raining: weather.rain_mm_1h > 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regimes(temp_c: f64, humidity_pct: u8, rain: f64, soil: f64) -> Regimes {
        classify_regimes(&WeatherReading::new(temp_c, humidity_pct, rain), soil)
    }

    #[test]
    fn humidity_threshold_is_inclusive() {
        assert!(!regimes(25.0, 79, 0.0, 45.0).high_humidity);
        assert!(regimes(25.0, 80, 0.0, 45.0).high_humidity);
    }

    #[test]
    fn humidity_flips_exactly_once() {
        let flags: Vec<bool> = (0..=100u8)
            .map(|h| regimes(25.0, h, 0.0, 45.0).high_humidity)
            .collect();
        let flips = flags.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(flips, 1);
        assert!(!flags[0]);
        assert!(flags[100]);
    }

    #[test]
    fn temperature_bands() {
        let cold = regimes(19.9, 50, 0.0, 45.0);
        assert!(!cold.warm && !cold.very_hot);

        let low_edge = regimes(20.0, 50, 0.0, 45.0);
        assert!(low_edge.warm && !low_edge.very_hot);

        let high_edge = regimes(34.0, 50, 0.0, 45.0);
        assert!(high_edge.warm && !high_edge.very_hot);

        let hot = regimes(34.1, 50, 0.0, 45.0);
        assert!(!hot.warm && hot.very_hot);
    }

    #[test]
    fn soil_bands_leave_a_normal_gap() {
        let dry = regimes(25.0, 50, 0.0, 30.0);
        assert!(dry.dry_soil && !dry.wet_soil);

        let normal = regimes(25.0, 50, 0.0, 45.0);
        assert!(!normal.dry_soil && !normal.wet_soil);

        let wet = regimes(25.0, 50, 0.0, 60.0);
        assert!(wet.wet_soil && !wet.dry_soil);
    }

    #[test]
    fn any_rain_counts() {
        assert!(!regimes(25.0, 50, 0.0, 45.0).raining);
        assert!(regimes(25.0, 50, 0.1, 45.0).raining);
    }
}
