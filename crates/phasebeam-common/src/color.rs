//! Color types for background vertices and particle tints.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Luminance weights (red, green, blue) used for greyscale conversion.
pub const LUMA_WEIGHTS: [f32; 3] = [0.30, 0.59, 0.11];

/// Linear RGBA color with components in the 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Rgba {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component
    pub a: f32,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new color.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from RGB bytes (0-255).
    #[must_use]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Weighted luminance of the RGB channels.
    #[must_use]
    pub fn luminance(&self) -> f32 {
        LUMA_WEIGHTS[0] * self.r + LUMA_WEIGHTS[1] * self.g + LUMA_WEIGHTS[2] * self.b
    }

    /// Returns the luminance greyscale of this color, keeping alpha.
    #[must_use]
    pub fn greyscale(&self) -> Self {
        let grey = self.luminance();
        Self::new(grey, grey, grey, self.a)
    }
}
