//! # Phase Beam Kernel
//!
//! Per-frame particle animation for the phase beam live wallpaper.
//!
//! This crate provides the animation core:
//! - Two fixed-size particle pools (dots and beams) with depth tiers
//! - Fixed kinematic motion with vertical respawn and horizontal wrap
//! - Parallax-driven speedbump and pacing hints
//! - Gated background recoloring (desaturation)
//! - A renderer boundary that receives bind/draw calls in a fixed order
//!
//! ## Frame Flow
//!
//! The host owns the surface, the shader programs and the textures. It
//! initializes the kernel once per surface size and then calls
//! [`PhaseBeamKernel::update_frame`] whenever a frame is due, waiting at
//! least the returned pacing hint before the next call.
//!
//! ## Shared Inputs
//!
//! The parallax offset and the adjust vector may be written at any time
//! through [`SharedInputs`]. Each frame reads one consistent snapshot.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod depth;
pub mod frame;
pub mod init;
pub mod kernel;
pub mod motion;
pub mod particle;
pub mod random;
pub mod render;
pub mod screen;
pub mod store;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::depth::*;
    pub use crate::frame::*;
    pub use crate::init::*;
    pub use crate::kernel::*;
    pub use crate::motion::*;
    pub use crate::particle::*;
    pub use crate::random::*;
    pub use crate::render::*;
    pub use crate::screen::*;
    pub use crate::store::*;
}

pub use prelude::*;
