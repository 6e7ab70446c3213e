//! Particle (re)population.

use glam::Vec3;
use tracing::debug;

use crate::depth::{BEAM_DEPTH_TABLE, DOT_DEPTH_TABLE};
use crate::particle::Particle;
use crate::random::RandomSource;
use crate::store::ParticleStore;

/// Dot spawn range on X.
pub const DOT_SPAWN_X: (f32, f32) = (0.0, 3.0);

/// Dot spawn range on Y.
pub const DOT_SPAWN_Y: (f32, f32) = (-1.25, 1.25);

/// Beam spawn range on X.
pub const BEAM_SPAWN_X: (f32, f32) = (-1.25, 1.25);

/// Beam spawn range on Y. Biased low so beams tend to enter from below.
pub const BEAM_SPAWN_Y: (f32, f32) = (-1.05, 1.205);

/// Overwrites every particle in both pools with a fresh spawn.
///
/// Safe to call repeatedly; nothing carries over from the previous state.
pub fn position_particles(store: &mut ParticleStore, adjust: Vec3, rng: &mut impl RandomSource) {
    for (i, dot) in store.dots_mut().iter_mut().enumerate() {
        let x = rng.uniform(DOT_SPAWN_X.0, DOT_SPAWN_X.1);
        let y = rng.uniform(DOT_SPAWN_Y.0, DOT_SPAWN_Y.1);
        let depth = DOT_DEPTH_TABLE.sample(i, rng);
        *dot = Particle::new(Vec3::new(depth.pinned_x.unwrap_or(x), y, depth.z), adjust);
    }

    for (i, beam) in store.beams_mut().iter_mut().enumerate() {
        let depth = BEAM_DEPTH_TABLE.sample(i, rng);
        let x = rng.uniform(BEAM_SPAWN_X.0, BEAM_SPAWN_X.1);
        let y = rng.uniform(BEAM_SPAWN_Y.0, BEAM_SPAWN_Y.1);
        *beam = Particle::new(Vec3::new(x, y, depth.z), adjust);
    }

    debug!(
        "Positioned {} dots and {} beams",
        store.dot_count(),
        store.beam_count()
    );
}
