//! Cached surface metrics and screen-space placement helpers.

use bytemuck::{Pod, Zeroable};
use phasebeam_common::SurfaceError;

/// DPI at which point sprites are drawn at their authored size.
pub const REFERENCE_DPI: f32 = 240.0;

/// Surface dimensions and the derived half/quarter values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMetrics {
    /// Surface width in pixels
    pub width: f32,
    /// Surface height in pixels
    pub height: f32,
    /// Half of the width
    pub half_width: f32,
    /// Half of the height
    pub half_height: f32,
    /// Quarter of the width
    pub quarter_width: f32,
    /// Quarter of the height
    pub quarter_height: f32,
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl ScreenMetrics {
    /// Derives metrics from a surface size without validation.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            half_width: width / 2.0,
            half_height: height / 2.0,
            quarter_width: width / 4.0,
            quarter_height: height / 4.0,
        }
    }

    /// Derives metrics, rejecting zero, negative or non-finite sizes.
    pub fn try_new(width: f32, height: f32) -> Result<Self, SurfaceError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self::new(width, height))
        } else {
            Err(SurfaceError::InvalidSize { width, height })
        }
    }

    /// Point sprite scale for a display density.
    #[must_use]
    pub fn point_scale(density_dpi: f32) -> f32 {
        density_dpi / REFERENCE_DPI
    }

    /// Full-bleed background placement for a parallax input.
    ///
    /// The background pans by a quarter screen over the full input range,
    /// slower than the particles, which gives the depth separation.
    #[must_use]
    pub fn background_rect(&self, x_offset: f32) -> BackgroundRect {
        let pan = x_offset * self.quarter_width;
        BackgroundRect {
            left: -self.quarter_width + pan,
            top: 0.0,
            right: self.width + self.half_width + pan,
            bottom: self.height,
        }
    }
}

/// Screen-space rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundRect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
}

/// Constants for the dots vertex stage.
///
/// The projection matrix is owned by the host; the kernel only supplies the
/// sprite scale next to it.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ViewportConstants {
    /// Point sprite scale factor.
    pub scale_size: f32,
    /// Padding for 16-byte alignment.
    _pad: [f32; 3],
}

impl ViewportConstants {
    /// Creates constants for a display density.
    #[must_use]
    pub fn for_density(density_dpi: f32) -> Self {
        Self {
            scale_size: ScreenMetrics::point_scale(density_dpi),
            _pad: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_derivation() {
        let m = ScreenMetrics::new(1080.0, 1920.0);
        assert_eq!(m.half_width, 540.0);
        assert_eq!(m.quarter_width, 270.0);
        assert_eq!(m.half_height, 960.0);
        assert_eq!(m.quarter_height, 480.0);
    }

    #[test]
    fn test_try_new_rejects_degenerate() {
        assert!(ScreenMetrics::try_new(0.0, 720.0).is_err());
        assert!(ScreenMetrics::try_new(1280.0, -1.0).is_err());
        assert!(ScreenMetrics::try_new(f32::NAN, 720.0).is_err());
        assert_eq!(
            ScreenMetrics::try_new(1280.0, 720.0),
            Ok(ScreenMetrics::new(1280.0, 720.0))
        );
    }

    #[test]
    fn test_background_rect_pans() {
        let m = ScreenMetrics::new(800.0, 600.0);
        let left = m.background_rect(0.0);
        assert_eq!(left.left, -200.0);
        assert_eq!(left.right, 1200.0);
        assert_eq!(left.bottom, 600.0);

        let right = m.background_rect(1.0);
        assert_eq!(right.left, 0.0);
        assert_eq!(right.right, 1400.0);
        assert_eq!(left.right - left.left, right.right - right.left);
    }

    #[test]
    fn test_point_scale() {
        assert_eq!(ScreenMetrics::point_scale(240.0), 1.0);
        assert_eq!(ScreenMetrics::point_scale(480.0), 2.0);
        assert_eq!(ViewportConstants::for_density(120.0).scale_size, 0.5);
    }

    #[test]
    fn test_viewport_constants_size() {
        assert_eq!(std::mem::size_of::<ViewportConstants>(), 16);
    }
}
