//! Random sampling used at spawn and respawn time.

/// Uniform float sampling over a range.
pub trait RandomSource {
    /// Returns a value between `min` and `max`. Whether `max` itself can be
    /// returned depends on the source.
    fn uniform(&mut self, min: f32, max: f32) -> f32;
}

/// Default random source backed by `fastrand`. Samples `[min, max)`.
#[derive(Debug, Clone)]
pub struct FastRandom {
    rng: fastrand::Rng,
}

impl Default for FastRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl FastRandom {
    /// Creates a randomly seeded source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Creates a deterministic source.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Creates a source from an optional seed.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::with_seed)
    }
}

impl RandomSource for FastRandom {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        min + self.rng.f32() * (max - min)
    }
}

/// Replays a fixed sequence of unit samples (0.0-1.0), cycling when exhausted.
///
/// Used to make spawn and respawn results predictable in tests.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    samples: Vec<f32>,
    cursor: usize,
}

impl SequenceRandom {
    /// Creates a source replaying `samples`. An empty sequence always yields `min`.
    #[must_use]
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, cursor: 0 }
    }

    /// Creates a source that always returns the midpoint of the range.
    #[must_use]
    pub fn midpoint() -> Self {
        Self::new(vec![0.5])
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        let unit = if self.samples.is_empty() {
            0.0
        } else {
            self.samples[self.cursor % self.samples.len()].clamp(0.0, 1.0)
        };
        self.cursor += 1;
        min + unit * (max - min)
    }
}
