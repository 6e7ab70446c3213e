//! The phase beam kernel: initialization plus the per-frame update.

use glam::Vec3;
use phasebeam_common::Rgba;
use tracing::{debug, trace};

use crate::config::{BackgroundStyle, DotDepthSource, KernelConfig};
use crate::frame::{pacing_hint, FrameGate, FrameInputs, FrameReport, SharedInputs, ShadowState};
use crate::init::position_particles;
use crate::motion::{FrameStep, BEAM_MOTION, DOT_MOTION};
use crate::particle::VertexColor;
use crate::random::{FastRandom, RandomSource};
use crate::render::{RenderResources, Renderer};
use crate::screen::ScreenMetrics;
use crate::store::ParticleStore;

/// Texture slot the sprite textures are bound to.
const SPRITE_SLOT: u32 = 0;

/// Owns the particle pools and advances them once per frame.
///
/// The host calls [`PhaseBeamKernel::position_particles`] whenever the
/// surface size is (re)established and [`PhaseBeamKernel::update_frame`]
/// once per requested frame. Neither call may overlap with another.
#[derive(Debug)]
pub struct PhaseBeamKernel<R: RandomSource = FastRandom> {
    config: KernelConfig,
    resources: RenderResources,
    store: ParticleStore,
    metrics: ScreenMetrics,
    shadow: ShadowState,
    rng: R,
    frame_count: u64,
}

impl PhaseBeamKernel<FastRandom> {
    /// Creates a kernel seeded from the configuration.
    #[must_use]
    pub fn new(config: KernelConfig, resources: RenderResources) -> Self {
        let rng = FastRandom::from_seed(config.seed);
        Self::with_random(config, resources, rng)
    }
}

impl<R: RandomSource> PhaseBeamKernel<R> {
    /// Creates a kernel with an explicit random source.
    #[must_use]
    pub fn with_random(config: KernelConfig, resources: RenderResources, rng: R) -> Self {
        Self {
            store: ParticleStore::new(config.dot_count, config.beam_count),
            config,
            resources,
            metrics: ScreenMetrics::default(),
            shadow: ShadowState::default(),
            rng,
            frame_count: 0,
        }
    }

    /// Installs the background vertex-color cache.
    #[must_use]
    pub fn with_vertex_colors(mut self, vertices: Vec<VertexColor>) -> Self {
        self.store = self.store.with_vertex_colors(vertices);
        self
    }

    /// Replaces the whole particle store, e.g. to inject a known state.
    #[must_use]
    pub fn with_store(mut self, store: ParticleStore) -> Self {
        self.store = store;
        self
    }

    /// Caches the surface metrics and respawns every particle.
    pub fn position_particles(&mut self, metrics: ScreenMetrics, adjust: Vec3) {
        debug!("Positioning particles for {}x{}", metrics.width, metrics.height);
        self.metrics = metrics;
        position_particles(&mut self.store, adjust, &mut self.rng);
    }

    /// Runs one frame using the current value of the shared inputs.
    pub fn update_shared(&mut self, inputs: &SharedInputs, renderer: &mut impl Renderer) -> FrameReport {
        self.update_frame(inputs.snapshot(), renderer)
    }

    /// Advances every particle by one frame and issues the frame's draws.
    ///
    /// Returns the pacing hint the host should wait before the next frame.
    pub fn update_frame(&mut self, inputs: FrameInputs, renderer: &mut impl Renderer) -> FrameReport {
        let gate = FrameGate::evaluate(&self.shadow, &inputs);
        let speedbump = gate.speedbump();
        let step = FrameStep {
            speedbump,
            new_offset: gate.new_offset,
            adjust: inputs.adjust,
        };

        let recolored = self.draw_background(&gate, &inputs, renderer);
        self.advance_particles(&step);
        self.draw_particles(renderer);

        self.shadow.commit(&gate, &inputs);
        self.frame_count += 1;

        let report = FrameReport {
            pacing_ms: pacing_hint(self.config.frame_interval_ms, speedbump),
            speedbump,
            recolored,
            offset_changed: gate.offset_changed,
            adjust_changed: gate.adjust_changed,
        };
        trace!("Frame {}: {:?}", self.frame_count, report);
        report
    }

    /// Background pass. Returns whether the vertex colors were recomputed.
    fn draw_background(&mut self, gate: &FrameGate, inputs: &FrameInputs, renderer: &mut impl Renderer) -> bool {
        let program = self.resources.background_program;
        match self.config.background {
            BackgroundStyle::VertexMesh => {
                renderer.clear(Rgba::BLACK);

                let recolor = gate.recolor_requested();
                if recolor {
                    for vertex in self.store.vertex_colors_mut() {
                        vertex.recolor(inputs.x_offset, inputs.adjust);
                    }
                }

                renderer.bind_program(program);
                renderer.draw_mesh(self.resources.background_mesh, self.store.vertex_bytes());
                recolor
            },
            BackgroundStyle::Textured => {
                renderer.bind_program(program);
                renderer.bind_texture(program.fragment, SPRITE_SLOT, self.resources.background_texture);
                renderer.draw_rect(self.metrics.background_rect(inputs.x_offset));
                false
            },
        }
    }

    fn advance_particles(&mut self, step: &FrameStep) {
        let beam_motion = BEAM_MOTION.with_wrap_y(self.config.beam_wrap_y);
        let depth_source = self.config.dot_depth_source;
        let (dots, beams) = self.store.pools_mut();

        for beam in beams.iter_mut() {
            let z = beam.depth();
            beam_motion.advance(beam, z, step, &mut self.rng);
        }

        for (i, dot) in dots.iter_mut().enumerate() {
            let x_depth = match depth_source {
                DotDepthSource::Own => dot.depth(),
                DotDepthSource::PairedBeam => {
                    if beams.is_empty() {
                        dot.depth()
                    } else {
                        beams[i % beams.len()].depth()
                    }
                },
            };
            DOT_MOTION.advance(dot, x_depth, step, &mut self.rng);
        }
    }

    /// Beams first, dots layered on top.
    fn draw_particles(&self, renderer: &mut impl Renderer) {
        let program = self.resources.dots_program;
        renderer.bind_program(program);

        renderer.bind_texture(program.fragment, SPRITE_SLOT, self.resources.beam_texture);
        renderer.draw_mesh(self.resources.beam_mesh, self.store.beam_bytes());

        renderer.bind_texture(program.fragment, SPRITE_SLOT, self.resources.dot_texture);
        renderer.draw_mesh(self.resources.dot_mesh, self.store.dot_bytes());
    }

    /// The particle pools and vertex-color cache.
    #[must_use]
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// Surface metrics cached by the last initialization.
    #[must_use]
    pub fn metrics(&self) -> &ScreenMetrics {
        &self.metrics
    }

    /// Number of frames updated so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{PANNING_SPEEDBUMP, STEADY_SPEEDBUMP};
    use crate::motion::{YZ_BEAM_SPEED, YZ_DOT_SPEED, ZX_BEAM_SPEED, ZX_DOT_SPEED};
    use crate::particle::Particle;
    use crate::random::SequenceRandom;
    use crate::render::{DrawCommand, MeshId, ProgramId, ProgramPair, RecordingRenderer, TextureId};
    use crate::store::gradient_quad;
    use phasebeam_common::DEFAULT_ADJUST;

    fn resources() -> RenderResources {
        RenderResources {
            background_program: ProgramPair::new(ProgramId::new(1), ProgramId::new(2)),
            dots_program: ProgramPair::new(ProgramId::new(3), ProgramId::new(4)),
            background_mesh: MeshId::new(10),
            beam_mesh: MeshId::new(11),
            dot_mesh: MeshId::new(12),
            background_texture: TextureId::new(20),
            beam_texture: TextureId::new(21),
            dot_texture: TextureId::new(22),
        }
    }

    fn kernel(config: KernelConfig) -> PhaseBeamKernel<SequenceRandom> {
        let mut kernel = PhaseBeamKernel::with_random(config, resources(), SequenceRandom::midpoint())
            .with_vertex_colors(gradient_quad(Rgba::new(0.2, 0.3, 0.9, 1.0), Rgba::new(0.9, 0.1, 0.1, 0.8)));
        kernel.position_particles(ScreenMetrics::new(1080.0, 1920.0), DEFAULT_ADJUST);
        kernel
    }

    /// Runs one frame at `x_offset` so the next frame at the same offset is steady.
    fn settle(kernel: &mut PhaseBeamKernel<SequenceRandom>, inputs: FrameInputs) {
        kernel.update_frame(inputs, &mut RecordingRenderer::new());
    }

    fn single_beam(position: Vec3) -> PhaseBeamKernel<SequenceRandom> {
        let config = KernelConfig {
            dot_count: 0,
            beam_count: 1,
            ..Default::default()
        };
        let mut store = ParticleStore::new(0, 1);
        if let Some(beam) = store.beam_mut(0) {
            *beam = Particle::new(position, DEFAULT_ADJUST);
        }
        PhaseBeamKernel::with_random(config, resources(), SequenceRandom::midpoint()).with_store(store)
    }

    #[test]
    fn test_first_frame_pans() {
        let mut kernel = kernel(KernelConfig::default());
        let report = kernel.update_frame(FrameInputs::default(), &mut RecordingRenderer::new());
        // Shadow offset starts at 0.5 while the doubled input is 1.0.
        assert!(report.offset_changed);
        assert_eq!(report.speedbump, PANNING_SPEEDBUMP);
        assert_eq!(report.pacing_ms, 16);
        assert!(report.recolored);
    }

    #[test]
    fn test_steady_frame_skips_recolor() {
        let mut kernel = kernel(KernelConfig::default());
        let inputs = FrameInputs::new(0.3, Vec3::new(0.0, 1.0, 1.0));
        settle(&mut kernel, inputs);

        let before = kernel.store().vertex_bytes().to_vec();
        let report = kernel.update_frame(inputs, &mut RecordingRenderer::new());
        assert_eq!(report.speedbump, STEADY_SPEEDBUMP);
        assert_eq!(report.pacing_ms, 66);
        assert!(!report.recolored);
        assert_eq!(kernel.store().vertex_bytes(), before.as_slice());
    }

    #[test]
    fn test_offset_change_bumps_exactly_one_frame() {
        let mut kernel = kernel(KernelConfig::default());
        let still = FrameInputs::new(0.2, DEFAULT_ADJUST);
        settle(&mut kernel, still);

        let moved = FrameInputs::new(0.6, DEFAULT_ADJUST);
        let speeds: Vec<f32> = [still, moved, moved, moved]
            .into_iter()
            .map(|inputs| kernel.update_frame(inputs, &mut RecordingRenderer::new()).speedbump)
            .collect();
        assert_eq!(speeds, vec![STEADY_SPEEDBUMP, PANNING_SPEEDBUMP, STEADY_SPEEDBUMP, STEADY_SPEEDBUMP]);
    }

    #[test]
    fn test_adjust_change_recolors_without_slowing() {
        let mut kernel = kernel(KernelConfig::default());
        settle(&mut kernel, FrameInputs::new(0.5, DEFAULT_ADJUST));

        let report = kernel.update_frame(FrameInputs::new(0.5, Vec3::new(0.0, 1.0, 1.0)), &mut RecordingRenderer::new());
        assert!(report.recolored);
        assert!(report.adjust_changed);
        assert_eq!(report.speedbump, STEADY_SPEEDBUMP);
    }

    #[test]
    fn test_desaturation_round_trip() {
        let mut kernel = kernel(KernelConfig::default());
        kernel.update_frame(FrameInputs::new(0.4, Vec3::new(0.0, 1.0, 1.0)), &mut RecordingRenderer::new());
        for vertex in kernel.store().vertex_colors() {
            let c = vertex.real_color;
            let grey = 0.30 * vertex.color.r + 0.59 * vertex.color.g + 0.11 * vertex.color.b;
            assert!((c.r - grey).abs() < 1e-6);
            assert!((c.r - c.g).abs() < 1e-6);
            assert!((c.g - c.b).abs() < 1e-6);
            assert_eq!(c.a, vertex.color.a);
            assert_eq!(vertex.offset_x, -0.2);
        }

        kernel.update_frame(FrameInputs::new(0.4, Vec3::new(-1.0, 1.0, 1.0)), &mut RecordingRenderer::new());
        for vertex in kernel.store().vertex_colors() {
            assert_eq!(vertex.real_color, vertex.color);
        }
    }

    #[test]
    fn test_single_beam_scenario() {
        let mut kernel = single_beam(Vec3::new(0.0, 0.0, 8.0));
        // Match the shadow offset so the frame runs at full speed.
        let inputs = FrameInputs::new(0.25, DEFAULT_ADJUST);
        let report = kernel.update_frame(inputs, &mut RecordingRenderer::new());
        assert_eq!(report.speedbump, STEADY_SPEEDBUMP);

        let beam = kernel.store().beam(0).copied().unwrap_or_default();
        assert_eq!(beam.position.x, ZX_BEAM_SPEED * 8.0);
        assert_eq!(beam.position.y, YZ_BEAM_SPEED * 8.0);
        assert_eq!(beam.position.z, 8.0);
        assert_eq!(beam.offset_x, 0.5);
    }

    #[test]
    fn test_single_beam_vertical_wrap() {
        let mut kernel = single_beam(Vec3::new(0.0, 1.2, 8.0));
        kernel.update_frame(FrameInputs::new(0.25, DEFAULT_ADJUST), &mut RecordingRenderer::new());

        let beam = kernel.store().beam(0).copied().unwrap_or_default();
        assert_eq!(beam.position.y, -1.15);
        assert!(beam.position.x >= -1.25 && beam.position.x <= 1.25 + ZX_BEAM_SPEED * 8.0);
    }

    #[test]
    fn test_dot_wrap_resets_exactly() {
        let config = KernelConfig {
            dot_count: 1,
            beam_count: 0,
            ..Default::default()
        };
        let mut store = ParticleStore::new(1, 0);
        if let Some(dot) = store.dot_mut(0) {
            *dot = Particle::new(Vec3::new(0.2, 1.3, 10.0), DEFAULT_ADJUST);
        }
        let mut kernel = PhaseBeamKernel::with_random(config, resources(), SequenceRandom::midpoint()).with_store(store);
        kernel.update_frame(FrameInputs::new(0.25, DEFAULT_ADJUST), &mut RecordingRenderer::new());

        let dot = kernel.store().dot(0).copied().unwrap_or_default();
        assert_eq!(dot.position.y, -1.25);
        assert_eq!(dot.position.x, 1.5 + ZX_DOT_SPEED * 10.0);
    }

    #[test]
    fn test_paired_beam_depth() {
        let mut store = ParticleStore::new(1, 1);
        if let Some(dot) = store.dot_mut(0) {
            *dot = Particle::new(Vec3::new(0.0, 0.0, 10.0), DEFAULT_ADJUST);
        }
        if let Some(beam) = store.beam_mut(0) {
            *beam = Particle::new(Vec3::new(0.0, 0.0, 3.0), DEFAULT_ADJUST);
        }

        for (source, expected) in [(DotDepthSource::Own, 10.0), (DotDepthSource::PairedBeam, 3.0)] {
            let config = KernelConfig {
                dot_count: 1,
                beam_count: 1,
                dot_depth_source: source,
                ..Default::default()
            };
            let mut kernel = PhaseBeamKernel::with_random(config, resources(), SequenceRandom::midpoint())
                .with_store(store.clone());
            kernel.update_frame(FrameInputs::new(0.25, DEFAULT_ADJUST), &mut RecordingRenderer::new());
            let dot = kernel.store().dot(0).copied().unwrap_or_default();
            assert_eq!(dot.position.x, ZX_DOT_SPEED * expected);
            assert_eq!(dot.position.y, YZ_DOT_SPEED * 10.0);
        }
    }

    #[test]
    fn test_draw_order_vertex_mesh() {
        let mut kernel = kernel(KernelConfig::default());
        let mut renderer = RecordingRenderer::new();
        kernel.update_frame(FrameInputs::default(), &mut renderer);

        let res = resources();
        assert_eq!(
            renderer.commands(),
            &[
                DrawCommand::Clear(Rgba::BLACK),
                DrawCommand::BindProgram(res.background_program),
                DrawCommand::DrawMesh {
                    mesh: res.background_mesh,
                    vertex_bytes: 4 * 60
                },
                DrawCommand::BindProgram(res.dots_program),
                DrawCommand::BindTexture {
                    fragment: res.dots_program.fragment,
                    slot: 0,
                    texture: res.beam_texture
                },
                DrawCommand::DrawMesh {
                    mesh: res.beam_mesh,
                    vertex_bytes: 18 * 28
                },
                DrawCommand::BindTexture {
                    fragment: res.dots_program.fragment,
                    slot: 0,
                    texture: res.dot_texture
                },
                DrawCommand::DrawMesh {
                    mesh: res.dot_mesh,
                    vertex_bytes: 18 * 28
                },
            ]
        );
    }

    #[test]
    fn test_textured_background() {
        let config = KernelConfig {
            background: BackgroundStyle::Textured,
            ..Default::default()
        };
        let mut kernel = kernel(config);
        let before = kernel.store().vertex_bytes().to_vec();
        let mut renderer = RecordingRenderer::new();
        let report = kernel.update_frame(FrameInputs::new(1.0, Vec3::new(0.0, 1.0, 1.0)), &mut renderer);

        assert!(!report.recolored);
        assert_eq!(kernel.store().vertex_bytes(), before.as_slice());
        assert!(!renderer.commands().iter().any(|c| matches!(c, DrawCommand::Clear(_))));

        let rect = renderer.commands().iter().find_map(|c| match c {
            DrawCommand::DrawRect(rect) => Some(*rect),
            _ => None,
        });
        let rect = rect.unwrap_or_else(|| panic!("no background rect drawn"));
        assert_eq!(rect.left, 0.0);
        assert_eq!(rect.right, 1080.0 + 540.0 + 270.0);
        assert_eq!(renderer.drawn_meshes(), vec![MeshId::new(11), MeshId::new(12)]);
    }

    #[test]
    fn test_empty_pools_are_noop() {
        let config = KernelConfig {
            dot_count: 0,
            beam_count: 0,
            ..Default::default()
        };
        let mut kernel = PhaseBeamKernel::with_random(config, resources(), SequenceRandom::midpoint());
        kernel.position_particles(ScreenMetrics::new(1.0, 1.0), DEFAULT_ADJUST);
        let report = kernel.update_frame(FrameInputs::default(), &mut RecordingRenderer::new());
        assert_eq!(report.pacing_ms, 16);
        assert_eq!(kernel.frame_count(), 1);
    }

    #[test]
    fn test_depth_never_changes() {
        let mut kernel = PhaseBeamKernel::new(
            KernelConfig {
                seed: Some(99),
                ..Default::default()
            },
            resources(),
        );
        kernel.position_particles(ScreenMetrics::default(), DEFAULT_ADJUST);
        let depths: Vec<f32> = kernel.store().dots().iter().chain(kernel.store().beams()).map(Particle::depth).collect();

        let mut renderer = RecordingRenderer::new();
        for frame in 0..2000 {
            let x_offset = if frame % 50 < 25 { 0.25 } else { 0.75 };
            kernel.update_frame(FrameInputs::new(x_offset, DEFAULT_ADJUST), &mut renderer);
            renderer.drain();
        }

        let after: Vec<f32> = kernel.store().dots().iter().chain(kernel.store().beams()).map(Particle::depth).collect();
        assert_eq!(depths, after);
        assert!(after.iter().all(|z| *z > 0.0));
        assert!(kernel.store().beams().iter().all(|b| b.position.y <= 1.15 + YZ_BEAM_SPEED * 17.5));
    }
}
