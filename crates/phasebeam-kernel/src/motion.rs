//! Fixed kinematic motion rules for beams and dots.
//!
//! There is no time-delta integration: each frame moves a particle by a
//! constant per-frame speed scaled by its depth and the frame's speedbump.

use glam::Vec3;

use crate::particle::Particle;
use crate::random::RandomSource;

/// Horizontal speed factor for dots.
pub const ZX_DOT_SPEED: f32 = 0.000_078;

/// Horizontal speed factor for beams.
pub const ZX_BEAM_SPEED: f32 = 0.000_05;

/// Vertical speed factor for dots.
pub const YZ_DOT_SPEED: f32 = 0.000_11;

/// Vertical speed factor for beams.
pub const YZ_BEAM_SPEED: f32 = 0.000_08;

/// Beam vertical wrap threshold.
pub const BEAM_WRAP_Y: f32 = 1.15;

/// Beam vertical wrap threshold used by the ungated variant of the effect.
pub const LEGACY_BEAM_WRAP_Y: f32 = 1.05;

/// Dot vertical wrap threshold.
pub const DOT_WRAP_Y: f32 = 1.25;

/// Per-frame values shared by every particle update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    /// Motion rate multiplier.
    pub speedbump: f32,
    /// Doubled parallax offset written into each particle.
    pub new_offset: f32,
    /// Adjust vector written into each particle.
    pub adjust: Vec3,
}

/// Motion rules for one particle population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Horizontal speed factor.
    pub zx_speed: f32,
    /// Vertical speed factor.
    pub yz_speed: f32,
    /// `x / z` above which the particle snaps back to `wrap_to_x`.
    pub wrap_ratio: f32,
    /// X assigned by the horizontal wrap.
    pub wrap_to_x: f32,
    /// Y above which the particle respawns.
    pub wrap_y: f32,
    /// Y assigned on respawn.
    pub respawn_y: f32,
    /// X range sampled on respawn.
    pub respawn_x: (f32, f32),
}

/// Beam motion: slow sideways drift, vertical sweep, full respawn below.
pub const BEAM_MOTION: MotionProfile = MotionProfile {
    zx_speed: ZX_BEAM_SPEED,
    yz_speed: YZ_BEAM_SPEED,
    wrap_ratio: 0.5,
    wrap_to_x: -1.0,
    wrap_y: BEAM_WRAP_Y,
    respawn_y: -1.15,
    respawn_x: (-1.25, 1.25),
};

/// Dot motion.
pub const DOT_MOTION: MotionProfile = MotionProfile {
    zx_speed: ZX_DOT_SPEED,
    yz_speed: YZ_DOT_SPEED,
    wrap_ratio: 0.5,
    wrap_to_x: -1.0,
    wrap_y: DOT_WRAP_Y,
    respawn_y: -1.25,
    respawn_x: (0.0, 3.0),
};

impl MotionProfile {
    /// Overrides the vertical wrap threshold.
    #[must_use]
    pub const fn with_wrap_y(mut self, wrap_y: f32) -> Self {
        self.wrap_y = wrap_y;
        self
    }

    /// Advances one particle by one frame.
    ///
    /// `x_depth` is the depth driving the horizontal advance; normally the
    /// particle's own. The horizontal wrap only resets `x`, while the
    /// vertical wrap resamples `x` as well. The horizontal advance is
    /// applied even on a respawn frame.
    pub fn advance(
        &self,
        particle: &mut Particle,
        x_depth: f32,
        step: &FrameStep,
        rng: &mut impl RandomSource,
    ) {
        let z = particle.position.z;

        if particle.depth_ratio() > self.wrap_ratio {
            particle.position.x = self.wrap_to_x;
        }

        if particle.position.y > self.wrap_y {
            particle.position.y = self.respawn_y;
            particle.position.x = rng.uniform(self.respawn_x.0, self.respawn_x.1);
        } else {
            particle.position.y += self.yz_speed * z * step.speedbump;
        }

        particle.position.x += self.zx_speed * x_depth * step.speedbump;
        particle.offset_x = step.new_offset;
        particle.adjust = step.adjust;
    }
}
