//! # Phase Beam Common
//!
//! Common types shared by the Phase Beam kernel and its host driver:
//! - RGBA colors with luminance greyscale conversion
//! - Recolor settings that produce the adjust vector
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod color;
pub mod error;
pub mod recolor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::color::*;
    pub use crate::error::*;
    pub use crate::recolor::*;
}

pub use prelude::*;
