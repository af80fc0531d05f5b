//! Maps current conditions to a decorative effect theme.
//!
//! The matching is deliberately naive: case-insensitive substring checks
//! against both the free-text condition and the icon code, evaluated as a
//! fixed-priority decision list where the first match wins. The wind
//! thresholds are display tuning, not meteorology; changing them changes
//! what users see, so they are kept as named constants.

/// Decorative theme vocabulary. `Wind` is the extra overlay layer added on
/// top of the base category when the classification is windy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectCategory {
    None,
    Rain,
    Storm,
    Snow,
    Fog,
    Cloud,
    Sun,
    Wind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: EffectCategory,
    pub windy: bool,
}

/// Wind speed above which a cloudy sky also reads as windy.
pub const CLOUD_WINDY_THRESHOLD: f64 = 15.0;
/// Wind speed above which a clear sky also reads as windy.
pub const SUN_WINDY_THRESHOLD: f64 = 10.0;
/// Wind speed at which wind dominates an otherwise unmatched condition.
pub const WIND_DOMINANT_THRESHOLD: f64 = 20.0;

/// Classify current conditions into an effect theme.
pub fn classify(condition_text: &str, icon_code: &str, wind_speed: f64) -> Classification {
    let text = condition_text.to_lowercase();
    let icon = icon_code.to_lowercase();
    let has = |needle: &str| text.contains(needle) || icon.contains(needle);

    if has("rain") || has("drizzle") {
        // Storms escalate rain: same drops, plus lightning.
        let category = if has("thunder") || has("storm") {
            EffectCategory::Storm
        } else {
            EffectCategory::Rain
        };
        return Classification { category, windy: false };
    }

    if has("snow") {
        return Classification { category: EffectCategory::Snow, windy: false };
    }

    if has("fog") || has("mist") {
        return Classification { category: EffectCategory::Fog, windy: false };
    }

    if has("cloud") {
        return Classification {
            category: EffectCategory::Cloud,
            windy: wind_speed > CLOUD_WINDY_THRESHOLD,
        };
    }

    if has("clear") || has("sunny") {
        return Classification {
            category: EffectCategory::Sun,
            windy: wind_speed > SUN_WINDY_THRESHOLD,
        };
    }

    if wind_speed > WIND_DOMINANT_THRESHOLD {
        return Classification { category: EffectCategory::Cloud, windy: true };
    }

    Classification { category: EffectCategory::None, windy: false }
}
