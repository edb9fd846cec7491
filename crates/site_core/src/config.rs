use serde::Deserialize;

use crate::scheduler::Millis;

/// Tunables for the page controller. Every field has a default, so a TOML
/// override only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub theme_storage_key: String,
    pub theme_pulse_half_ms: Millis,
    pub announcement_ttl_ms: Millis,
    pub scrolled_threshold_px: f64,
    pub hide_nav_after_px: f64,
    pub scroll_debounce_ms: Millis,
    pub reveal_threshold: f64,
    pub reveal_bottom_margin_px: f64,
    pub hero_first_reveal_ms: Millis,
    pub hero_stagger_ms: Millis,
    pub stats_threshold: f64,
    pub counter_start_delay_ms: Millis,
    pub counter_fallback_delay_ms: Millis,
    pub counter_duration_ms: Millis,
    pub frame_interval_ms: Millis,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            theme_storage_key: "theme".into(),
            theme_pulse_half_ms: 150,
            announcement_ttl_ms: 1000,
            scrolled_threshold_px: 50.0,
            hide_nav_after_px: 100.0,
            scroll_debounce_ms: 10,
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: 50.0,
            hero_first_reveal_ms: 100,
            hero_stagger_ms: 150,
            stats_threshold: 0.5,
            counter_start_delay_ms: 500,
            counter_fallback_delay_ms: 1000,
            counter_duration_ms: 2000,
            frame_interval_ms: crate::scheduler::DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
