//! Headless renderer.
//!
//! Stands in for a graphics backend: hands out resource handles, checks
//! that meshes are only drawn with a program bound, and keeps running
//! counters of what each frame submitted.

use phasebeam_common::Rgba;
use phasebeam_kernel::{
    BackgroundRect, MeshId, ProgramId, ProgramPair, RenderResources, Renderer, TextureId,
    ViewportConstants,
};
use tracing::{trace, warn};

/// Counters for submitted work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Clears issued
    pub clears: u64,
    /// Program binds
    pub program_binds: u64,
    /// Texture binds
    pub texture_binds: u64,
    /// Mesh and rect draws
    pub draws: u64,
    /// Vertex bytes submitted with mesh draws
    pub vertex_bytes: u64,
    /// Draws issued with no program bound
    pub unbound_draws: u64,
}

/// Renderer that validates and counts calls without drawing anything.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    next_handle: u32,
    bound: Option<ProgramPair>,
    constants: Option<ViewportConstants>,
    stats: RenderStats,
}

impl HeadlessRenderer {
    /// Creates a renderer with no resources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    /// Creates every program, texture and mesh the kernel draws with.
    pub fn create_resources(&mut self) -> RenderResources {
        RenderResources {
            background_program: ProgramPair::new(ProgramId::new(self.next()), ProgramId::new(self.next())),
            dots_program: ProgramPair::new(ProgramId::new(self.next()), ProgramId::new(self.next())),
            background_mesh: MeshId::new(self.next()),
            beam_mesh: MeshId::new(self.next()),
            dot_mesh: MeshId::new(self.next()),
            background_texture: TextureId::new(self.next()),
            beam_texture: TextureId::new(self.next()),
            dot_texture: TextureId::new(self.next()),
        }
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Constants last uploaded to the dots vertex program.
    #[must_use]
    pub fn constants(&self) -> Option<ViewportConstants> {
        self.constants
    }

    fn count_draw(&mut self) {
        self.stats.draws += 1;
        if self.bound.is_none() {
            warn!("Draw issued with no program bound");
            self.stats.unbound_draws += 1;
        }
    }
}

impl Renderer for HeadlessRenderer {
    fn clear(&mut self, color: Rgba) {
        trace!("clear {:?}", color);
        self.stats.clears += 1;
        // A new frame starts with nothing bound.
        self.bound = None;
    }

    fn bind_program(&mut self, program: ProgramPair) {
        self.stats.program_binds += 1;
        self.bound = Some(program);
    }

    fn bind_texture(&mut self, fragment: ProgramId, slot: u32, texture: TextureId) {
        trace!("texture {} -> program {} slot {}", texture.raw(), fragment.raw(), slot);
        self.stats.texture_binds += 1;
    }

    fn draw_mesh(&mut self, mesh: MeshId, vertices: &[u8]) {
        trace!("mesh {} with {} bytes", mesh.raw(), vertices.len());
        self.count_draw();
        self.stats.vertex_bytes += vertices.len() as u64;
    }

    fn draw_rect(&mut self, rect: BackgroundRect) {
        trace!("rect {:?}", rect);
        self.count_draw();
    }

    fn set_constants(&mut self, vertex: ProgramId, constants: ViewportConstants) {
        trace!("constants for program {}: scale {}", vertex.raw(), constants.scale_size);
        self.constants = Some(constants);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resources_are_distinct() {
        let mut renderer = HeadlessRenderer::new();
        let res = renderer.create_resources();
        let ids = [
            res.background_program.vertex.raw(),
            res.background_program.fragment.raw(),
            res.dots_program.vertex.raw(),
            res.dots_program.fragment.raw(),
            res.background_mesh.raw(),
            res.beam_mesh.raw(),
            res.dot_mesh.raw(),
            res.background_texture.raw(),
            res.beam_texture.raw(),
            res.dot_texture.raw(),
        ];
        for (i, a) in ids.iter().enumerate() {
            assert!(*a != 0);
            assert!(ids[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn test_unbound_draw_counted() {
        let mut renderer = HeadlessRenderer::new();
        renderer.draw_mesh(MeshId::new(1), &[0u8; 28]);
        renderer.bind_program(ProgramPair::default());
        renderer.draw_mesh(MeshId::new(1), &[0u8; 28]);

        let stats = renderer.stats();
        assert_eq!(stats.draws, 2);
        assert_eq!(stats.unbound_draws, 1);
        assert_eq!(stats.vertex_bytes, 56);
    }
}
