//! Per-frame inputs, change detection and the frame report.
//!
//! The host writes the parallax input and the adjust vector whenever it
//! likes. The kernel takes a single snapshot at the top of each frame and
//! compares it with the previous frame's shadow copy to decide the
//! speedbump and whether the background needs recoloring.

use glam::Vec3;
use parking_lot::RwLock;
use phasebeam_common::DEFAULT_ADJUST;

/// Speedbump while the parallax input is moving.
pub const PANNING_SPEEDBUMP: f32 = 0.25;

/// Speedbump while the parallax input is still.
pub const STEADY_SPEEDBUMP: f32 = 1.0;

/// Initial parallax input and shadow offset.
pub const INITIAL_OFFSET: f32 = 0.5;

/// Values read from the host once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    /// Parallax input, conceptually 0.0-1.0.
    pub x_offset: f32,
    /// Desaturation adjust vector; `x >= 0` requests greyscale.
    pub adjust: Vec3,
}

impl Default for FrameInputs {
    fn default() -> Self {
        Self {
            x_offset: INITIAL_OFFSET,
            adjust: DEFAULT_ADJUST,
        }
    }
}

impl FrameInputs {
    /// Creates a new input snapshot.
    #[must_use]
    pub const fn new(x_offset: f32, adjust: Vec3) -> Self {
        Self { x_offset, adjust }
    }

    /// Parallax offset written into particles, doubled to match the
    /// background pan range.
    #[must_use]
    pub fn parallax_offset(&self) -> f32 {
        self.x_offset * 2.0
    }
}

/// Inputs shared between the host's input sources and the frame loop.
#[derive(Debug, Default)]
pub struct SharedInputs {
    inner: RwLock<FrameInputs>,
}

impl SharedInputs {
    /// Creates shared inputs with an initial value.
    #[must_use]
    pub fn new(inputs: FrameInputs) -> Self {
        Self {
            inner: RwLock::new(inputs),
        }
    }

    /// Reads the current inputs.
    #[must_use]
    pub fn snapshot(&self) -> FrameInputs {
        *self.inner.read()
    }

    /// Sets the parallax input.
    pub fn set_offset(&self, x_offset: f32) {
        self.inner.write().x_offset = x_offset;
    }

    /// Sets the adjust vector.
    pub fn set_adjust(&self, adjust: Vec3) {
        self.inner.write().adjust = adjust;
    }
}

/// Previous-frame values kept for change detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowState {
    /// Last frame's doubled parallax offset.
    pub old_offset: f32,
    /// Last frame's adjust vector.
    pub old_adjust: Vec3,
}

impl Default for ShadowState {
    fn default() -> Self {
        Self {
            old_offset: INITIAL_OFFSET,
            old_adjust: DEFAULT_ADJUST,
        }
    }
}

impl ShadowState {
    /// Records this frame's values for the next frame's comparison.
    pub fn commit(&mut self, gate: &FrameGate, inputs: &FrameInputs) {
        self.old_offset = gate.new_offset;
        self.old_adjust = inputs.adjust;
    }
}

/// Change flags for one frame, a pure function of (previous, current).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGate {
    /// This frame's doubled parallax offset.
    pub new_offset: f32,
    /// Whether the parallax offset moved since the last frame.
    pub offset_changed: bool,
    /// Whether any adjust component changed since the last frame.
    pub adjust_changed: bool,
}

impl FrameGate {
    /// Compares the snapshot against the shadow state.
    #[must_use]
    pub fn evaluate(shadow: &ShadowState, inputs: &FrameInputs) -> Self {
        let new_offset = inputs.parallax_offset();
        let adjust = inputs.adjust;
        let old = shadow.old_adjust;
        Self {
            new_offset,
            offset_changed: new_offset != shadow.old_offset,
            adjust_changed: old.x != adjust.x || old.y != adjust.y || old.z != adjust.z,
        }
    }

    /// Motion and pacing multiplier for this frame.
    #[must_use]
    pub fn speedbump(&self) -> f32 {
        if self.offset_changed {
            PANNING_SPEEDBUMP
        } else {
            STEADY_SPEEDBUMP
        }
    }

    /// Whether the background vertex colors must be recomputed.
    #[must_use]
    pub fn recolor_requested(&self) -> bool {
        self.offset_changed || self.adjust_changed
    }
}

/// Outcome of one frame update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Minimum milliseconds before the next frame should be requested.
    pub pacing_ms: u32,
    /// Speedbump applied this frame.
    pub speedbump: f32,
    /// Whether the background vertex colors were recomputed.
    pub recolored: bool,
    /// Whether the parallax offset moved.
    pub offset_changed: bool,
    /// Whether the adjust vector changed.
    pub adjust_changed: bool,
}

/// Scales the base frame interval by the speedbump, truncating to whole
/// milliseconds.
#[must_use]
pub fn pacing_hint(frame_interval_ms: u32, speedbump: f32) -> u32 {
    (frame_interval_ms as f32 * speedbump) as u32
}
