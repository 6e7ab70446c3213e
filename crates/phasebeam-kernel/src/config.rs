//! Kernel tuning parameters.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::motion::BEAM_WRAP_Y;
use crate::store::DEFAULT_PARTICLE_COUNT;

/// Base pacing interval in milliseconds.
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 66;

/// Upper bound accepted for either pool.
pub const MAX_POOL_SIZE: usize = 4096;

/// Which depth drives a dot's horizontal advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DotDepthSource {
    /// The dot's own depth.
    #[default]
    Own,
    /// The depth of the beam at the same index (wrapping), matching the
    /// shipped wallpaper's look. Falls back to the dot's own depth when there
    /// are no beams.
    PairedBeam,
}

/// How the background is produced each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundStyle {
    /// Clear to black, then draw the vertex-colored background mesh with
    /// gated recoloring.
    #[default]
    VertexMesh,
    /// Skip the clear and draw a parallax-shifted textured rectangle.
    Textured,
}

/// Kernel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Number of dot particles
    pub dot_count: usize,
    /// Number of beam particles
    pub beam_count: usize,
    /// Base pacing interval, scaled by the speedbump
    pub frame_interval_ms: u32,
    /// Beam vertical wrap threshold
    pub beam_wrap_y: f32,
    /// Depth used for a dot's horizontal advance
    pub dot_depth_source: DotDepthSource,
    /// Background style
    pub background: BackgroundStyle,
    /// Random seed (None = random)
    pub seed: Option<u64>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            dot_count: DEFAULT_PARTICLE_COUNT,
            beam_count: DEFAULT_PARTICLE_COUNT,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            beam_wrap_y: BEAM_WRAP_Y,
            dot_depth_source: DotDepthSource::Own,
            background: BackgroundStyle::VertexMesh,
            seed: None,
        }
    }
}

impl KernelConfig {
    /// Clamps values to sensible ranges.
    pub fn validate(&mut self) {
        let defaults = Self::default();

        self.dot_count = self.dot_count.min(MAX_POOL_SIZE);
        self.beam_count = self.beam_count.min(MAX_POOL_SIZE);
        self.frame_interval_ms = self.frame_interval_ms.clamp(1, 1000);

        if !self.beam_wrap_y.is_finite() || self.beam_wrap_y <= 0.0 {
            warn!(
                "Invalid beam wrap threshold {}, using {}",
                self.beam_wrap_y, defaults.beam_wrap_y
            );
            self.beam_wrap_y = defaults.beam_wrap_y;
        }
    }
}
