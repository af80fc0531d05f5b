//! Decorative overlay generation.
//!
//! Each classified theme expands into a batch of overlay nodes (a CSS class
//! plus randomized inline style). The randomness is cosmetic; only the
//! documented ranges matter, so the source is pluggable and a seeded RNG
//! works fine in tests.

use std::ops::Range;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::classify::{Classification, EffectCategory};

/// One decorative node of the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectNode {
    pub class: &'static str,
    pub style: String,
}

pub const RAIN_DROP_COUNT: usize = 60;
pub const RAIN_DURATION_SECS: Range<f64> = 0.5..1.0;
pub const RAIN_DELAY_SECS: Range<f64> = 0.0..2.0;

pub const LIGHTNING_FLASH_COUNT: usize = 3;
pub const LIGHTNING_LEFT_PCT: Range<f64> = 10.0..90.0;
pub const LIGHTNING_DELAY_SECS: Range<f64> = 0.0..4.0;

pub const SNOW_FLAKE_COUNT: usize = 40;
pub const SNOW_DURATION_SECS: Range<f64> = 3.0..8.0;
pub const SNOW_DELAY_SECS: Range<f64> = 0.0..5.0;

pub const FOG_BANK_COUNT: usize = 3;
pub const FOG_TOP_PCT: Range<f64> = 10.0..60.0;
pub const FOG_DURATION_SECS: Range<f64> = 20.0..40.0;

pub const CLOUD_PUFF_COUNT: usize = 4;
pub const CLOUD_TOP_PCT: Range<f64> = 5.0..30.0;
pub const CLOUD_DURATION_SECS: Range<f64> = 30.0..60.0;
pub const CLOUD_DELAY_SECS: Range<f64> = 0.0..10.0;

pub const WIND_STREAK_COUNT: usize = 8;
pub const WIND_TOP_PCT: Range<f64> = 0.0..100.0;
pub const WIND_DURATION_SECS: Range<f64> = 1.0..3.0;
pub const WIND_DELAY_SECS: Range<f64> = 0.0..3.0;

const FULL_WIDTH_PCT: Range<f64> = 0.0..100.0;

fn falling_style(left: f64, duration: f64, delay: f64) -> String {
    format!("left:{left:.2}%;animation-duration:{duration:.2}s;animation-delay:{delay:.2}s")
}

fn drifting_style(top: f64, duration: f64, delay: f64) -> String {
    format!("top:{top:.2}%;animation-duration:{duration:.2}s;animation-delay:{delay:.2}s")
}

/// Builds the overlay for one classified request.
///
/// The previous overlay is torn down by replacement: the dashboard swaps
/// the whole node list on every request.
#[derive(Debug)]
pub struct EffectStage<R: Rng> {
    rng: R,
}

impl EffectStage<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for EffectStage<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> EffectStage<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Expand a classification into overlay nodes.
    pub fn build(&mut self, classification: Classification) -> Vec<EffectNode> {
        let mut nodes = Vec::new();

        match classification.category {
            EffectCategory::None => {}
            EffectCategory::Rain => self.rain(&mut nodes),
            EffectCategory::Storm => {
                // Storm keeps the rain layer and adds lightning on top.
                self.rain(&mut nodes);
                self.lightning(&mut nodes);
            }
            EffectCategory::Snow => self.snow(&mut nodes),
            EffectCategory::Fog => self.fog(&mut nodes),
            EffectCategory::Cloud => self.clouds(&mut nodes),
            EffectCategory::Sun => self.sun(&mut nodes),
            EffectCategory::Wind => self.wind(&mut nodes),
        }

        if classification.windy {
            self.wind(&mut nodes);
        }

        nodes
    }

    fn rain(&mut self, nodes: &mut Vec<EffectNode>) {
        for _ in 0..RAIN_DROP_COUNT {
            let left = self.rng.random_range(FULL_WIDTH_PCT);
            let duration = self.rng.random_range(RAIN_DURATION_SECS);
            let delay = self.rng.random_range(RAIN_DELAY_SECS);
            let style = falling_style(left, duration, delay);
            nodes.push(EffectNode { class: "rain-drop", style });
        }
    }

    fn lightning(&mut self, nodes: &mut Vec<EffectNode>) {
        for _ in 0..LIGHTNING_FLASH_COUNT {
            let left = self.rng.random_range(LIGHTNING_LEFT_PCT);
            let delay = self.rng.random_range(LIGHTNING_DELAY_SECS);
            nodes.push(EffectNode {
                class: "lightning-flash",
                style: format!("left:{left:.2}%;animation-delay:{delay:.2}s"),
            });
        }
    }

    fn snow(&mut self, nodes: &mut Vec<EffectNode>) {
        for _ in 0..SNOW_FLAKE_COUNT {
            let left = self.rng.random_range(FULL_WIDTH_PCT);
            let duration = self.rng.random_range(SNOW_DURATION_SECS);
            let delay = self.rng.random_range(SNOW_DELAY_SECS);
            let style = falling_style(left, duration, delay);
            nodes.push(EffectNode { class: "snow-flake", style });
        }
    }

    fn fog(&mut self, nodes: &mut Vec<EffectNode>) {
        for _ in 0..FOG_BANK_COUNT {
            let top = self.rng.random_range(FOG_TOP_PCT);
            let duration = self.rng.random_range(FOG_DURATION_SECS);
            let style = drifting_style(top, duration, 0.0);
            nodes.push(EffectNode { class: "fog-bank", style });
        }
    }

    fn clouds(&mut self, nodes: &mut Vec<EffectNode>) {
        for _ in 0..CLOUD_PUFF_COUNT {
            let top = self.rng.random_range(CLOUD_TOP_PCT);
            let duration = self.rng.random_range(CLOUD_DURATION_SECS);
            let delay = self.rng.random_range(CLOUD_DELAY_SECS);
            let style = drifting_style(top, duration, delay);
            nodes.push(EffectNode { class: "cloud-puff", style });
        }
    }

    fn sun(&mut self, nodes: &mut Vec<EffectNode>) {
        nodes.push(EffectNode { class: "sun-disc", style: String::new() });
    }

    fn wind(&mut self, nodes: &mut Vec<EffectNode>) {
        for _ in 0..WIND_STREAK_COUNT {
            let top = self.rng.random_range(WIND_TOP_PCT);
            let duration = self.rng.random_range(WIND_DURATION_SECS);
            let delay = self.rng.random_range(WIND_DELAY_SECS);
            let style = drifting_style(top, duration, delay);
            nodes.push(EffectNode { class: "wind-streak", style });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn stage() -> EffectStage<StdRng> {
        EffectStage::with_rng(StdRng::seed_from_u64(42))
    }

    fn styles_of<'a>(nodes: &'a [EffectNode], class: &str) -> Vec<&'a str> {
        nodes.iter().filter(|n| n.class == class).map(|n| n.style.as_str()).collect()
    }

    fn style_value(style: &str, key: &str) -> f64 {
        style
            .split(';')
            .find_map(|part| part.strip_prefix(&format!("{key}:")))
            .and_then(|v| v.trim_end_matches(['%', 's']).parse().ok())
            .unwrap_or_else(|| panic!("style {style:?} missing {key}"))
    }

    #[test]
    fn none_builds_empty_overlay() {
        let nodes = stage().build(Classification { category: EffectCategory::None, windy: false });
        assert!(nodes.is_empty());
    }

    #[test]
    fn rain_parameters_stay_in_bounds() {
        let nodes = stage().build(classify("Light rain", "rain", 5.0));
        let drops = styles_of(&nodes, "rain-drop");
        assert_eq!(drops.len(), RAIN_DROP_COUNT);

        // Styles carry two decimals, so allow for rounding at the edges.
        const SLACK: f64 = 0.005;
        for style in drops {
            let duration = style_value(style, "animation-duration");
            let delay = style_value(style, "animation-delay");
            assert!(
                duration >= RAIN_DURATION_SECS.start - SLACK
                    && duration < RAIN_DURATION_SECS.end + SLACK,
                "duration out of range: {duration}"
            );
            assert!(
                delay >= RAIN_DELAY_SECS.start - SLACK && delay < RAIN_DELAY_SECS.end + SLACK,
                "delay out of range: {delay}"
            );
        }
    }

    #[test]
    fn storm_adds_lightning_on_top_of_rain() {
        let nodes = stage().build(classify("Thunderstorm with rain", "rain", 5.0));
        assert_eq!(styles_of(&nodes, "rain-drop").len(), RAIN_DROP_COUNT);
        assert_eq!(styles_of(&nodes, "lightning-flash").len(), LIGHTNING_FLASH_COUNT);
    }

    #[test]
    fn windy_classification_adds_wind_layer() {
        let nodes = stage().build(classify("Clear", "clear-day", 25.0));
        assert_eq!(styles_of(&nodes, "sun-disc").len(), 1);
        assert_eq!(styles_of(&nodes, "wind-streak").len(), WIND_STREAK_COUNT);

        let calm = stage().build(classify("Clear", "clear-day", 5.0));
        assert!(styles_of(&calm, "wind-streak").is_empty());
    }

    #[test]
    fn seeded_stage_is_reproducible() {
        let a = stage().build(classify("Snow", "snow", 0.0));
        let b = stage().build(classify("Snow", "snow", 0.0));
        assert_eq!(a, b);
    }
}
