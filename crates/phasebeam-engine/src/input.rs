//! Synthetic parallax input.
//!
//! A headless run has no launcher scrolling the home screen, so the driver
//! sweeps the parallax offset back and forth itself, holding still at each
//! end so both panning and steady frames occur.

use serde::{Deserialize, Serialize};

/// Parallax sweep parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxSweepConfig {
    /// Sweep the offset at all (false = hold at `rest_offset`)
    pub enabled: bool,
    /// Frames spent moving from one end to the other
    pub travel_frames: u32,
    /// Frames spent holding at each end
    pub hold_frames: u32,
    /// Offset used while the sweep is disabled (0.0-1.0)
    pub rest_offset: f32,
}

impl Default for ParallaxSweepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            travel_frames: 30,
            hold_frames: 60,
            rest_offset: 0.5,
        }
    }
}

impl ParallaxSweepConfig {
    /// Clamps values to sensible ranges.
    pub fn validate(&mut self) {
        self.travel_frames = self.travel_frames.clamp(1, 10_000);
        self.hold_frames = self.hold_frames.min(10_000);
        self.rest_offset = if self.rest_offset.is_finite() {
            self.rest_offset.clamp(0.0, 1.0)
        } else {
            0.5
        };
    }
}

/// Phase of the sweep cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SweepPhase {
    HoldLeft,
    Rising,
    HoldRight,
    Falling,
}

/// Produces one parallax offset per frame.
#[derive(Debug, Clone)]
pub struct ParallaxSweep {
    config: ParallaxSweepConfig,
    phase: SweepPhase,
    frame_in_phase: u32,
}

impl ParallaxSweep {
    /// Creates a sweep starting at the left end.
    #[must_use]
    pub fn new(config: ParallaxSweepConfig) -> Self {
        Self {
            config,
            phase: SweepPhase::HoldLeft,
            frame_in_phase: 0,
        }
    }

    fn phase_length(&self) -> u32 {
        match self.phase {
            SweepPhase::HoldLeft | SweepPhase::HoldRight => self.config.hold_frames,
            SweepPhase::Rising | SweepPhase::Falling => self.config.travel_frames.max(1),
        }
    }

    fn current(&self) -> f32 {
        let t = self.frame_in_phase as f32 / self.config.travel_frames.max(1) as f32;
        match self.phase {
            SweepPhase::HoldLeft => 0.0,
            SweepPhase::HoldRight => 1.0,
            SweepPhase::Rising => t,
            SweepPhase::Falling => 1.0 - t,
        }
    }

    /// Returns this frame's offset and advances the sweep.
    pub fn next_offset(&mut self) -> f32 {
        if !self.config.enabled {
            return self.config.rest_offset;
        }

        // Zero-length holds are skipped.
        while self.frame_in_phase >= self.phase_length() {
            self.frame_in_phase = 0;
            self.phase = match self.phase {
                SweepPhase::HoldLeft => SweepPhase::Rising,
                SweepPhase::Rising => SweepPhase::HoldRight,
                SweepPhase::HoldRight => SweepPhase::Falling,
                SweepPhase::Falling => SweepPhase::HoldLeft,
            };
        }

        let offset = self.current();
        self.frame_in_phase += 1;
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_sweep_rests() {
        let mut sweep = ParallaxSweep::new(ParallaxSweepConfig {
            enabled: false,
            rest_offset: 0.3,
            ..Default::default()
        });
        assert!((0..10).all(|_| sweep.next_offset() == 0.3));
    }

    #[test]
    fn test_sweep_cycle() {
        let mut sweep = ParallaxSweep::new(ParallaxSweepConfig {
            enabled: true,
            travel_frames: 4,
            hold_frames: 2,
            rest_offset: 0.5,
        });
        let offsets: Vec<f32> = (0..12).map(|_| sweep.next_offset()).collect();
        assert_eq!(
            offsets,
            vec![0.0, 0.0, 0.0, 0.25, 0.5, 0.75, 1.0, 1.0, 1.0, 0.75, 0.5, 0.25]
        );
    }

    #[test]
    fn test_sweep_without_holds() {
        let mut sweep = ParallaxSweep::new(ParallaxSweepConfig {
            enabled: true,
            travel_frames: 2,
            hold_frames: 0,
            rest_offset: 0.5,
        });
        let offsets: Vec<f32> = (0..6).map(|_| sweep.next_offset()).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0, 0.5, 0.0, 0.5]);
    }

    #[test]
    fn test_sweep_validate() {
        let mut config = ParallaxSweepConfig {
            travel_frames: 0,
            rest_offset: f32::NAN,
            ..Default::default()
        };
        config.validate();
        assert_eq!(config.travel_frames, 1);
        assert_eq!(config.rest_offset, 0.5);
    }
}
