//! Fixed-size particle pools and the background vertex-color cache.
//!
//! Pools are sized once at construction and reused for the lifetime of the
//! kernel. Particles are never removed; they are respawned in place.

use glam::Vec3;
use phasebeam_common::Rgba;
use tracing::debug;

use crate::particle::{Particle, VertexColor};

/// Default number of particles in each pool.
pub const DEFAULT_PARTICLE_COUNT: usize = 18;

/// Owner of both particle pools and the vertex-color cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleStore {
    dots: Vec<Particle>,
    beams: Vec<Particle>,
    vertex_colors: Vec<VertexColor>,
}

impl ParticleStore {
    /// Creates pools of the given sizes with an empty vertex-color cache.
    #[must_use]
    pub fn new(dot_count: usize, beam_count: usize) -> Self {
        debug!("Allocating {dot_count} dot particles and {beam_count} beam particles");
        Self {
            dots: vec![Particle::default(); dot_count],
            beams: vec![Particle::default(); beam_count],
            vertex_colors: Vec::new(),
        }
    }

    /// Replaces the vertex-color cache.
    #[must_use]
    pub fn with_vertex_colors(mut self, vertices: Vec<VertexColor>) -> Self {
        self.vertex_colors = vertices;
        self
    }

    /// Number of dot particles.
    #[must_use]
    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }

    /// Number of beam particles.
    #[must_use]
    pub fn beam_count(&self) -> usize {
        self.beams.len()
    }

    /// Number of cached background vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_colors.len()
    }

    /// Gets a dot particle by index.
    #[must_use]
    pub fn dot(&self, index: usize) -> Option<&Particle> {
        self.dots.get(index)
    }

    /// Gets a mutable dot particle by index.
    pub fn dot_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.dots.get_mut(index)
    }

    /// Gets a beam particle by index.
    #[must_use]
    pub fn beam(&self, index: usize) -> Option<&Particle> {
        self.beams.get(index)
    }

    /// Gets a mutable beam particle by index.
    pub fn beam_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.beams.get_mut(index)
    }

    /// All dot particles.
    #[must_use]
    pub fn dots(&self) -> &[Particle] {
        &self.dots
    }

    /// All dot particles, mutable.
    pub fn dots_mut(&mut self) -> &mut [Particle] {
        &mut self.dots
    }

    /// All beam particles.
    #[must_use]
    pub fn beams(&self) -> &[Particle] {
        &self.beams
    }

    /// All beam particles, mutable.
    pub fn beams_mut(&mut self) -> &mut [Particle] {
        &mut self.beams
    }

    /// Both particle pools at once, mutable: `(dots, beams)`.
    pub fn pools_mut(&mut self) -> (&mut [Particle], &mut [Particle]) {
        (&mut self.dots, &mut self.beams)
    }

    /// All cached background vertices.
    #[must_use]
    pub fn vertex_colors(&self) -> &[VertexColor] {
        &self.vertex_colors
    }

    /// All cached background vertices, mutable.
    pub fn vertex_colors_mut(&mut self) -> &mut [VertexColor] {
        &mut self.vertex_colors
    }

    /// Dot pool as raw vertex bytes.
    #[must_use]
    pub fn dot_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.dots)
    }

    /// Beam pool as raw vertex bytes.
    #[must_use]
    pub fn beam_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.beams)
    }

    /// Vertex-color cache as raw vertex bytes.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertex_colors)
    }
}

/// Builds a full-screen quad (triangle strip order) shaded from `top` to `bottom`.
#[must_use]
pub fn gradient_quad(top: Rgba, bottom: Rgba) -> Vec<VertexColor> {
    vec![
        VertexColor::new(Vec3::new(-1.0, 1.0, 0.0), top),
        VertexColor::new(Vec3::new(1.0, 1.0, 0.0), top),
        VertexColor::new(Vec3::new(-1.0, -1.0, 0.0), bottom),
        VertexColor::new(Vec3::new(1.0, -1.0, 0.0), bottom),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_sizes() {
        let store = ParticleStore::new(DEFAULT_PARTICLE_COUNT, 5);
        assert_eq!(store.dot_count(), 18);
        assert_eq!(store.beam_count(), 5);
        assert_eq!(store.vertex_count(), 0);
    }

    #[test]
    fn test_store_index_access() {
        let mut store = ParticleStore::new(2, 2);
        if let Some(beam) = store.beam_mut(1) {
            beam.position.x = 0.75;
        }
        assert_eq!(store.beam(1).map(|b| b.position.x), Some(0.75));
        assert!(store.beam(2).is_none());
        assert!(store.dot_mut(5).is_none());
    }

    #[test]
    fn test_store_bytes() {
        let store = ParticleStore::new(3, 1).with_vertex_colors(gradient_quad(Rgba::WHITE, Rgba::BLACK));
        assert_eq!(store.dot_bytes().len(), 3 * 28);
        assert_eq!(store.beam_bytes().len(), 28);
        assert_eq!(store.vertex_bytes().len(), 4 * 60);
    }

    #[test]
    fn test_gradient_quad() {
        let quad = gradient_quad(Rgba::WHITE, Rgba::BLACK);
        assert_eq!(quad.len(), 4);
        assert_eq!(quad[0].real_color, Rgba::WHITE);
        assert_eq!(quad[3].real_color, Rgba::BLACK);
        assert!(quad.iter().all(|v| v.position.x.abs() == 1.0));
    }

    #[test]
    fn test_empty_store() {
        let store = ParticleStore::default();
        assert!(store.dots().is_empty());
        assert!(store.dot_bytes().is_empty());
    }
}
