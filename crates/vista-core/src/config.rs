//! Stage configuration.
//!
//! Defaults reproduce the portfolio page the orchestrator was built for; a
//! page with different markup or pacing overrides fields from JSON. Every
//! struct is `#[serde(default)]`, so a config only names what it changes.

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::animation::{AnimationSpec, Easing};
use crate::error::StageError;
use crate::host::{MinHeight, ScrollBehavior, StyleProp, TriggerStart};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub selectors: Selectors,
    pub pin: PinConfig,
    pub snap: SnapConfig,
    pub pointer: PointerConfig,
    pub layout: LayoutConfig,
    pub parallax: ParallaxConfig,
    pub cues: Vec<CueConfig>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            pin: PinConfig::default(),
            snap: SnapConfig::default(),
            pointer: PointerConfig::default(),
            layout: LayoutConfig::default(),
            parallax: ParallaxConfig::default(),
            cues: CueConfig::portfolio(),
        }
    }
}

impl StageConfig {
    pub fn from_json(src: &str) -> Result<Self, StageError> {
        let config: Self = serde_json::from_str(src)?;
        config.snap.validate()?;
        log::debug!("stage config parsed: {} entrance cues", config.cues.len());
        Ok(config)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub track: String,
    pub gallery: String,
    pub section: String,
    pub filters: String,
    pub grids: String,
    /// `{id}` is replaced by the filter id.
    pub grid_pattern: String,
    pub filter_attribute: String,
    pub active_flag: String,
    pub snap_section: String,
    pub cursor: String,
    pub interactive: String,
    pub parallax_layer: String,
    pub parallax_container: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            track: ".gallery-track".into(),
            gallery: ".work-gallery".into(),
            section: ".work".into(),
            filters: ".filter".into(),
            grids: ".grid-category".into(),
            grid_pattern: ".{id}-grid".into(),
            filter_attribute: "data-filter".into(),
            active_flag: "active".into(),
            snap_section: ".editorial-feature".into(),
            cursor: ".cursor".into(),
            interactive: "a, button".into(),
            parallax_layer: ".parallax-layer".into(),
            parallax_container: ".container".into(),
        }
    }
}

impl Selectors {
    pub fn grid_for(&self, filter_id: &str) -> String {
        self.grid_pattern.replace("{id}", filter_id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinConfig {
    pub start: TriggerStart,
    pub scrub_ms: u64,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            start: TriggerStart {
                element: 0.7,
                viewport: 0.7,
            },
            scrub_ms: 1000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// How long scrolling must pause before the section position is checked.
    pub debounce_ms: u64,
    /// How long snapping stays suppressed after a corrective scroll.
    pub cooldown_ms: u64,
    /// Snap when the section center is within `viewport_height / band_divisor`.
    /// Must be positive.
    pub band_divisor: f32,
    pub behavior: ScrollBehavior,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            cooldown_ms: 1000,
            band_divisor: 3.0,
            behavior: ScrollBehavior::Smooth,
        }
    }
}

impl SnapConfig {
    pub fn validate(&self) -> Result<(), StageError> {
        if self.band_divisor.is_finite() && self.band_divisor > 0.0 {
            return Ok(());
        }
        Err(StageError::OutOfRange {
            field: "snap.band_divisor",
            reason: format!("must be a positive number, got {}", self.band_divisor),
        })
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    pub follow_ms: u64,
    pub easing: Easing,
    pub hover_scale: f32,
    pub rest_scale: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            follow_ms: 300,
            easing: Easing::EaseOut,
            hover_scale: 2.0,
            rest_scale: 1.0,
        }
    }
}

impl PointerConfig {
    pub fn spec(&self) -> AnimationSpec {
        AnimationSpec::tween(Duration::from_millis(self.follow_ms), self.easing)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub continuous_min_height: MinHeight,
    pub filtered_min_height: MinHeight,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            continuous_min_height: MinHeight::Auto,
            filtered_min_height: MinHeight::Vh(150.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Vertical travel over the container's range, in percent of layer height.
    pub travel_percent: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            travel_percent: 30.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "on", rename_all = "snake_case")]
pub enum CueTriggerConfig {
    Load,
    Viewport { region: String, start: TriggerStart },
}

/// One entrance animation, applied to every element matching `targets`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CueConfig {
    pub targets: String,
    pub trigger: CueTriggerConfig,
    /// Values the targets start from before animating back to rest.
    pub from: Vec<(StyleProp, f32)>,
    #[serde(default = "CueConfig::default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(default)]
    pub stagger_ms: u64,
    #[serde(default = "CueConfig::default_easing")]
    pub easing: Easing,
}

impl CueConfig {
    fn default_duration_ms() -> u64 {
        1000
    }

    fn default_easing() -> Easing {
        Easing::EaseOut
    }

    pub fn spec(&self) -> AnimationSpec {
        AnimationSpec::tween(Duration::from_millis(self.duration_ms), self.easing)
            .delayed(Duration::from_millis(self.delay_ms))
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }

    pub fn portfolio() -> Vec<CueConfig> {
        let top_80 = TriggerStart {
            element: 0.0,
            viewport: 0.8,
        };
        vec![
            CueConfig {
                targets: ".hero-title .line".into(),
                trigger: CueTriggerConfig::Load,
                from: vec![(StyleProp::YPercent, 100.0)],
                duration_ms: 1000,
                delay_ms: 0,
                stagger_ms: 100,
                easing: Easing::Power3Out,
            },
            CueConfig {
                targets: ".hero-subtitle".into(),
                trigger: CueTriggerConfig::Load,
                from: vec![(StyleProp::Opacity, 0.0), (StyleProp::Y, 20.0)],
                duration_ms: 1000,
                delay_ms: 500,
                stagger_ms: 0,
                easing: Easing::Power3Out,
            },
            CueConfig {
                targets: ".about-image".into(),
                trigger: CueTriggerConfig::Viewport {
                    region: ".about".into(),
                    start: top_80,
                },
                from: vec![(StyleProp::X, -100.0), (StyleProp::Opacity, 0.0)],
                duration_ms: 1000,
                delay_ms: 0,
                stagger_ms: 0,
                easing: Easing::EaseOut,
            },
            CueConfig {
                targets: ".about-content".into(),
                trigger: CueTriggerConfig::Viewport {
                    region: ".about".into(),
                    start: top_80,
                },
                from: vec![(StyleProp::X, 100.0), (StyleProp::Opacity, 0.0)],
                duration_ms: 1000,
                delay_ms: 0,
                stagger_ms: 0,
                easing: Easing::EaseOut,
            },
            CueConfig {
                targets: ".contact-form".into(),
                trigger: CueTriggerConfig::Viewport {
                    region: ".contact".into(),
                    start: top_80,
                },
                from: vec![(StyleProp::Y, 50.0), (StyleProp::Opacity, 0.0)],
                duration_ms: 1000,
                delay_ms: 0,
                stagger_ms: 100,
                easing: Easing::EaseOut,
            },
        ]
    }
}
