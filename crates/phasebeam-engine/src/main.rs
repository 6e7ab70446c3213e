//! # Phase Beam
//!
//! Runs the phase beam wallpaper headlessly, logging what each run
//! submitted to the renderer.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("phasebeam=info".parse()?))
        .init();

    info!("Phase Beam starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    phasebeam_engine::app::run()?;

    info!("Phase Beam shutdown complete");
    Ok(())
}
