//! Wallpaper lifecycle management.
//!
//! Owns the kernel on behalf of the host: initializes it once, attaches and
//! detaches the frame callback, forwards parallax and recolor input, and
//! re-spawns the particles when the surface changes size.

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use phasebeam_common::{PhaseBeamResult, RecolorSettings};
use phasebeam_kernel::{
    gradient_quad, FrameInputs, FrameReport, PhaseBeamKernel, RenderResources, Renderer,
    ScreenMetrics, SharedInputs, ViewportConstants, INITIAL_OFFSET,
};

use crate::config::EngineConfig;
use crate::input::ParallaxSweep;
use crate::renderer::HeadlessRenderer;
use crate::timing::FramePacer;

/// A live wallpaper instance bound to one renderer.
pub struct Wallpaper<R: Renderer> {
    /// Engine configuration
    config: EngineConfig,
    /// Graphics backend
    renderer: R,
    /// Handles the kernel draws with
    resources: RenderResources,
    /// Input written by the host, read once per frame
    inputs: Arc<SharedInputs>,
    /// Kernel (created by `init`)
    kernel: Option<PhaseBeamKernel>,
    /// Whether the frame callback is attached
    running: bool,
}

impl<R: Renderer> Wallpaper<R> {
    /// Creates an uninitialized wallpaper.
    #[must_use]
    pub fn new(config: EngineConfig, renderer: R, resources: RenderResources) -> Self {
        let inputs = FrameInputs::new(INITIAL_OFFSET, config.recolor.adjust());
        Self {
            config,
            renderer,
            resources,
            inputs: Arc::new(SharedInputs::new(inputs)),
            kernel: None,
            running: false,
        }
    }

    /// Builds the kernel and positions the particles. Later calls do nothing.
    pub fn init(&mut self) -> PhaseBeamResult<()> {
        if self.kernel.is_some() {
            debug!("Wallpaper already initialized");
            return Ok(());
        }

        let metrics = self.surface_metrics()?;
        let mut kernel = PhaseBeamKernel::new(self.config.kernel, self.resources)
            .with_vertex_colors(gradient_quad(
                self.config.background_top,
                self.config.background_bottom,
            ));

        self.upload_constants();
        kernel.position_particles(metrics, self.inputs.snapshot().adjust);
        self.kernel = Some(kernel);

        info!(
            "Wallpaper initialized at {}x{} ({} dots, {} beams)",
            self.config.surface_width,
            self.config.surface_height,
            self.config.kernel.dot_count,
            self.config.kernel.beam_count
        );
        Ok(())
    }

    /// Attaches the frame callback, initializing first if needed.
    pub fn start(&mut self) -> PhaseBeamResult<()> {
        self.init()?;
        if !self.running {
            info!("Wallpaper started");
            self.running = true;
        }
        Ok(())
    }

    /// Detaches the frame callback. The kernel state is kept.
    pub fn stop(&mut self) {
        if self.running {
            info!("Wallpaper stopped");
            self.running = false;
        }
    }

    /// Updates the parallax input.
    pub fn set_offset(&self, x_offset: f32) {
        self.inputs.set_offset(x_offset);
    }

    /// Applies recolor preferences to the adjust vector.
    pub fn set_recolor(&mut self, mut settings: RecolorSettings) {
        settings.validate();
        self.config.recolor = settings;
        self.inputs.set_adjust(settings.adjust());
        debug!("Recolor updated: {:?}", settings);
    }

    /// Revalidates the surface and re-spawns every particle.
    pub fn resize(&mut self, width: u32, height: u32) -> PhaseBeamResult<()> {
        let metrics = ScreenMetrics::try_new(width as f32, height as f32)?;
        self.config.surface_width = width;
        self.config.surface_height = height;

        if self.kernel.is_some() {
            self.upload_constants();
        }
        let adjust = self.inputs.snapshot().adjust;
        if let Some(kernel) = self.kernel.as_mut() {
            kernel.position_particles(metrics, adjust);
        }

        info!("Surface resized to {width}x{height}");
        Ok(())
    }

    /// Runs one frame if the wallpaper is running.
    pub fn frame(&mut self) -> Option<FrameReport> {
        if !self.running {
            return None;
        }
        let kernel = self.kernel.as_mut()?;
        Some(kernel.update_shared(&self.inputs, &mut self.renderer))
    }

    fn surface_metrics(&self) -> PhaseBeamResult<ScreenMetrics> {
        Ok(ScreenMetrics::try_new(
            self.config.surface_width as f32,
            self.config.surface_height as f32,
        )?)
    }

    fn upload_constants(&mut self) {
        self.renderer.set_constants(
            self.resources.dots_program.vertex,
            ViewportConstants::for_density(self.config.density_dpi),
        );
    }

    /// Handle for writing input from another thread.
    #[must_use]
    pub fn inputs(&self) -> Arc<SharedInputs> {
        Arc::clone(&self.inputs)
    }

    /// Whether `init` has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.kernel.is_some()
    }

    /// Whether frames are being produced.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The kernel, once initialized.
    #[must_use]
    pub fn kernel(&self) -> Option<&PhaseBeamKernel> {
        self.kernel.as_ref()
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Totals for one driven run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames rendered
    pub frames: u64,
    /// Frames that ran at the panning speedbump
    pub panning_frames: u64,
    /// Frames that recomputed the background colors
    pub recolored_frames: u64,
}

/// Feeds the sweep into the wallpaper and paces frames until `frame_limit`
/// frames have run (0 = forever) or the wallpaper stops producing frames.
///
/// The pacer is reset first, so time spent stopped between two runs is not
/// counted as a frame interval.
pub fn drive<R: Renderer>(
    wallpaper: &mut Wallpaper<R>,
    sweep: &mut ParallaxSweep,
    pacer: &mut FramePacer,
    frame_limit: u64,
) -> RunSummary {
    let mut summary = RunSummary::default();
    pacer.reset();

    while frame_limit == 0 || summary.frames < frame_limit {
        pacer.begin_frame();
        wallpaper.set_offset(sweep.next_offset());

        let Some(report) = wallpaper.frame() else {
            break;
        };

        summary.frames += 1;
        if report.offset_changed {
            summary.panning_frames += 1;
        }
        if report.recolored {
            summary.recolored_frames += 1;
        }
        pacer.wait(report.pacing_ms);
    }

    summary
}

/// Run the headless wallpaper.
pub fn run() -> Result<()> {
    let mut config = EngineConfig::load();
    config.validate();
    config.check_runnable()?;

    info!("Configuration loaded:");
    info!("  Surface: {}x{} @ {} dpi", config.surface_width, config.surface_height, config.density_dpi);
    info!("  Frames: {} (realtime: {})", config.frame_limit, config.realtime);
    info!("  Background: {:?}", config.kernel.background);

    let mut renderer = HeadlessRenderer::new();
    let resources = renderer.create_resources();
    let mut wallpaper = Wallpaper::new(config.clone(), renderer, resources);
    wallpaper.start()?;

    let mut sweep = ParallaxSweep::new(config.parallax);
    let mut pacer = FramePacer::new(config.realtime);
    let summary = drive(&mut wallpaper, &mut sweep, &mut pacer, config.frame_limit);
    wallpaper.stop();

    let stats = wallpaper.renderer().stats();
    info!(
        "Rendered {} frames ({} panning, {} recolored)",
        summary.frames, summary.panning_frames, summary.recolored_frames
    );
    info!(
        "Submitted {} draws, {} vertex bytes; paced {} ms, avg frame {:.2} ms",
        stats.draws,
        stats.vertex_bytes,
        pacer.total_paced_ms(),
        pacer.average_frame_time_ms()
    );

    Ok(())
}
