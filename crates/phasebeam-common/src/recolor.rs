//! User-facing recolor settings.
//!
//! The settings screen exposes an enable toggle and three sliders. The
//! kernel only ever sees the resulting adjust vector, where a negative `x`
//! means "render in full color".

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Hue slider range.
pub const HUE_RANGE: (f32, f32) = (0.0, 1.0);

/// Saturation slider range.
pub const SATURATION_RANGE: (f32, f32) = (0.0, 1.0);

/// Brightness slider range.
pub const BRIGHTNESS_RANGE: (f32, f32) = (0.5, 1.5);

/// Adjust `x` value meaning "no recolor".
pub const ADJUST_DISABLED: f32 = -1.0;

/// Adjust vector used before any settings are applied.
pub const DEFAULT_ADJUST: Vec3 = Vec3::new(ADJUST_DISABLED, 1.0, 1.0);

/// Recolor preferences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecolorSettings {
    /// Whether recoloring is enabled
    pub enabled: bool,
    /// Hue (0.0-1.0)
    pub hue: f32,
    /// Saturation (0.0-1.0)
    pub saturation: f32,
    /// Brightness (0.5-1.5)
    pub brightness: f32,
}

impl Default for RecolorSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            hue: 0.0,
            saturation: 1.0,
            brightness: 1.0,
        }
    }
}

impl RecolorSettings {
    /// Builds the adjust vector consumed by the frame update.
    #[must_use]
    pub fn adjust(&self) -> Vec3 {
        let x = if self.enabled { self.hue } else { ADJUST_DISABLED };
        Vec3::new(x, self.saturation, self.brightness)
    }

    /// Clamps every slider into its range. Non-finite values reset to defaults.
    pub fn validate(&mut self) {
        let defaults = Self::default();
        self.hue = clamp_or(self.hue, HUE_RANGE, defaults.hue);
        self.saturation = clamp_or(self.saturation, SATURATION_RANGE, defaults.saturation);
        self.brightness = clamp_or(self.brightness, BRIGHTNESS_RANGE, defaults.brightness);
    }
}

fn clamp_or(value: f32, (min, max): (f32, f32), fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// Maps a slider position to a value in `range`.
#[must_use]
pub fn value_from_progress(progress: u32, max_progress: u32, (min, max): (f32, f32)) -> f32 {
    if max_progress == 0 {
        return min;
    }
    (max - min) * progress as f32 / max_progress as f32 + min
}

/// Maps a value in `range` back to a slider position.
#[must_use]
pub fn progress_from_value(value: f32, max_progress: u32, (min, max): (f32, f32)) -> u32 {
    let progress = (value - min) * max_progress as f32 / (max - min);
    progress.clamp(0.0, max_progress as f32) as u32
}
