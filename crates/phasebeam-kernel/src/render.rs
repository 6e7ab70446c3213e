//! Rendering boundary.
//!
//! The kernel never creates GPU resources. It receives opaque handles for
//! programs, textures and meshes, and issues bind/draw calls through the
//! [`Renderer`] trait in a fixed order every frame.

use phasebeam_common::Rgba;
use tracing::trace;

use crate::screen::{BackgroundRect, ViewportConstants};

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw handle value.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Returns the raw handle value.
            #[must_use]
            pub const fn raw(&self) -> u32 {
                self.0
            }
        }
    };
}

handle!(
    /// Opaque shader program handle.
    ProgramId
);
handle!(
    /// Opaque texture handle.
    TextureId
);
handle!(
    /// Opaque mesh handle.
    MeshId
);

/// A vertex stage and fragment stage bound together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgramPair {
    /// Vertex program.
    pub vertex: ProgramId,
    /// Fragment program.
    pub fragment: ProgramId,
}

impl ProgramPair {
    /// Creates a program pair.
    #[must_use]
    pub const fn new(vertex: ProgramId, fragment: ProgramId) -> Self {
        Self { vertex, fragment }
    }
}

/// Every handle the frame update binds or draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderResources {
    /// Background programs.
    pub background_program: ProgramPair,
    /// Dot and beam programs.
    pub dots_program: ProgramPair,
    /// Background mesh fed by the vertex-color cache.
    pub background_mesh: MeshId,
    /// Beam point mesh.
    pub beam_mesh: MeshId,
    /// Dot point mesh.
    pub dot_mesh: MeshId,
    /// Background texture for the textured background style.
    pub background_texture: TextureId,
    /// Beam sprite texture.
    pub beam_texture: TextureId,
    /// Dot sprite texture.
    pub dot_texture: TextureId,
}

/// Draw-call sink implemented by the host's graphics backend.
pub trait Renderer {
    /// Clears the frame.
    fn clear(&mut self, color: Rgba);

    /// Binds a vertex/fragment program pair.
    fn bind_program(&mut self, program: ProgramPair);

    /// Binds a texture to a fragment program slot.
    fn bind_texture(&mut self, fragment: ProgramId, slot: u32, texture: TextureId);

    /// Draws a mesh using the current vertex data.
    fn draw_mesh(&mut self, mesh: MeshId, vertices: &[u8]);

    /// Draws a screen-space rectangle with the currently bound program.
    fn draw_rect(&mut self, rect: BackgroundRect);

    /// Uploads the constants block for a vertex program.
    fn set_constants(&mut self, vertex: ProgramId, constants: ViewportConstants);
}

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `clear`
    Clear(Rgba),
    /// `bind_program`
    BindProgram(ProgramPair),
    /// `bind_texture`
    BindTexture {
        /// Fragment program
        fragment: ProgramId,
        /// Texture slot
        slot: u32,
        /// Texture
        texture: TextureId,
    },
    /// `draw_mesh`, with the size of the vertex data.
    DrawMesh {
        /// Mesh
        mesh: MeshId,
        /// Vertex data length in bytes
        vertex_bytes: usize,
    },
    /// `draw_rect`
    DrawRect(BackgroundRect),
    /// `set_constants`
    SetConstants {
        /// Vertex program
        vertex: ProgramId,
        /// Constants block
        constants: ViewportConstants,
    },
}

/// Renderer that records every call, for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls in order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded calls, leaving the recorder empty.
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Meshes drawn, in draw order.
    #[must_use]
    pub fn drawn_meshes(&self) -> Vec<MeshId> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::DrawMesh { mesh, .. } => Some(*mesh),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: Rgba) {
        trace!("clear {:?}", color);
        self.commands.push(DrawCommand::Clear(color));
    }

    fn bind_program(&mut self, program: ProgramPair) {
        trace!("bind program {:?}", program);
        self.commands.push(DrawCommand::BindProgram(program));
    }

    fn bind_texture(&mut self, fragment: ProgramId, slot: u32, texture: TextureId) {
        trace!("bind texture {:?} to {:?} slot {}", texture, fragment, slot);
        self.commands.push(DrawCommand::BindTexture {
            fragment,
            slot,
            texture,
        });
    }

    fn draw_mesh(&mut self, mesh: MeshId, vertices: &[u8]) {
        trace!("draw mesh {:?} ({} bytes)", mesh, vertices.len());
        self.commands.push(DrawCommand::DrawMesh {
            mesh,
            vertex_bytes: vertices.len(),
        });
    }

    fn draw_rect(&mut self, rect: BackgroundRect) {
        trace!("draw rect {:?}", rect);
        self.commands.push(DrawCommand::DrawRect(rect));
    }

    fn set_constants(&mut self, vertex: ProgramId, constants: ViewportConstants) {
        trace!("set constants on {:?}: {:?}", vertex, constants);
        self.commands.push(DrawCommand::SetConstants { vertex, constants });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_raw() {
        assert_eq!(MeshId::new(7).raw(), 7);
        assert_eq!(TextureId::default().raw(), 0);
        assert_ne!(ProgramId::new(1), ProgramId::new(2));
    }

    #[test]
    fn test_recording_renderer() {
        let mut renderer = RecordingRenderer::new();
        renderer.clear(Rgba::BLACK);
        renderer.draw_mesh(MeshId::new(3), &[0u8; 56]);
        renderer.draw_mesh(MeshId::new(4), &[]);

        assert_eq!(renderer.commands().len(), 3);
        assert_eq!(renderer.drawn_meshes(), vec![MeshId::new(3), MeshId::new(4)]);
        assert_eq!(
            renderer.commands()[1],
            DrawCommand::DrawMesh {
                mesh: MeshId::new(3),
                vertex_bytes: 56
            }
        );

        let drained = renderer.drain();
        assert_eq!(drained.len(), 3);
        assert!(renderer.commands().is_empty());
    }
}
