//! Particle and background vertex records.
//!
//! Both types are uploaded verbatim as mesh vertices, so their layouts are
//! `#[repr(C)]` and `Pod`.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use phasebeam_common::{Rgba, DEFAULT_ADJUST};

/// One simulated point light: a drifting dot or a light beam.
///
/// Layout: 28 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Particle {
    /// X/Y in normalized screen units, Z is the depth assigned at spawn.
    pub position: Vec3,
    /// Horizontal parallax offset applied on the last frame.
    pub offset_x: f32,
    /// Copy of the global adjust vector for the vertex stage.
    pub adjust: Vec3,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            offset_x: 0.0,
            adjust: DEFAULT_ADJUST,
        }
    }
}

impl Particle {
    /// Creates a particle at `position` with no parallax offset.
    #[must_use]
    pub fn new(position: Vec3, adjust: Vec3) -> Self {
        Self {
            position,
            offset_x: 0.0,
            adjust,
        }
    }

    /// Depth of the particle.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> f32 {
        self.position.z
    }

    /// Horizontal position relative to depth, used by the wrap check.
    ///
    /// A non-positive depth never wraps.
    #[inline]
    #[must_use]
    pub fn depth_ratio(&self) -> f32 {
        if self.position.z > 0.0 {
            self.position.x / self.position.z
        } else {
            0.0
        }
    }
}

/// Background mesh vertex with an authored and a derived color.
///
/// Layout: 60 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct VertexColor {
    /// Vertex position.
    pub position: Vec3,
    /// Horizontal parallax offset.
    pub offset_x: f32,
    /// Authored base color. Never modified by the kernel.
    pub color: Rgba,
    /// Color actually sent to the renderer.
    pub real_color: Rgba,
    /// Copy of the global adjust vector.
    pub adjust: Vec3,
}

impl VertexColor {
    /// Creates a vertex whose derived color starts equal to `color`.
    #[must_use]
    pub fn new(position: Vec3, color: Rgba) -> Self {
        Self {
            position,
            offset_x: 0.0,
            color,
            real_color: color,
            adjust: DEFAULT_ADJUST,
        }
    }

    /// Recomputes the transform fields and `real_color` from scratch.
    pub fn recolor(&mut self, x_offset: f32, adjust: Vec3) {
        self.offset_x = -x_offset / 2.0;
        self.real_color = if desaturate(adjust) {
            self.color.greyscale()
        } else {
            self.color
        };
        self.adjust = adjust;
    }
}

/// Whether `adjust` requests greyscale output.
#[inline]
#[must_use]
pub fn desaturate(adjust: Vec3) -> bool {
    adjust.x >= 0.0
}
