//! Frame pacing.
//!
//! The kernel tells the host how long to wait before the next frame. The
//! pacer honours that hint in realtime runs and keeps a rolling average of
//! frame intervals for the shutdown summary.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Waits out pacing hints and tracks frame intervals.
#[derive(Debug)]
pub struct FramePacer {
    /// Sleep for the pacing hint (false = run frames back to back)
    realtime: bool,
    /// Time the last frame started
    last_frame: Instant,
    /// Recent frame intervals in seconds
    frame_times: VecDeque<f32>,
    /// Maximum samples kept for averaging
    max_samples: usize,
    /// Sum of every pacing hint seen, in milliseconds
    total_paced_ms: u64,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FramePacer {
    /// Creates a pacer.
    #[must_use]
    pub fn new(realtime: bool) -> Self {
        Self {
            realtime,
            last_frame: Instant::now(),
            frame_times: VecDeque::with_capacity(120),
            max_samples: 120,
            total_paced_ms: 0,
        }
    }

    /// Marks the start of a frame, recording the interval since the last one.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.max_samples {
            self.frame_times.pop_front();
        }
    }

    /// Waits until `pacing_ms` has passed since the frame started.
    pub fn wait(&mut self, pacing_ms: u32) {
        self.total_paced_ms += u64::from(pacing_ms);
        if !self.realtime {
            return;
        }

        let budget = Duration::from_millis(u64::from(pacing_ms));
        let elapsed = self.last_frame.elapsed();
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
        }
    }

    /// Sum of all pacing hints: the wall time a realtime run would take.
    #[must_use]
    pub fn total_paced_ms(&self) -> u64 {
        self.total_paced_ms
    }

    /// Average measured frame interval in milliseconds.
    #[must_use]
    pub fn average_frame_time_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }

        (self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32) * 1000.0
    }

    /// Reset timing (call after a stop/start).
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.frame_times.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_pacer_does_not_sleep() {
        let mut pacer = FramePacer::new(false);
        let start = Instant::now();
        for _ in 0..10 {
            pacer.begin_frame();
            pacer.wait(66);
        }
        assert!(start.elapsed() < Duration::from_millis(660));
        assert_eq!(pacer.total_paced_ms(), 660);
    }

    #[test]
    fn test_realtime_pacer_sleeps() {
        let mut pacer = FramePacer::new(true);
        let start = Instant::now();
        pacer.begin_frame();
        pacer.wait(5);
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_average_and_reset() {
        let mut pacer = FramePacer::new(false);
        assert_eq!(pacer.average_frame_time_ms(), 0.0);
        pacer.begin_frame();
        pacer.begin_frame();
        assert!(pacer.average_frame_time_ms() >= 0.0);
        pacer.reset();
        assert_eq!(pacer.average_frame_time_ms(), 0.0);
    }
}
