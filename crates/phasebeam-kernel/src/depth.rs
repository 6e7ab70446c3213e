//! Tiered depth assignment.
//!
//! Depth is picked once per particle at spawn from an ordered rule table
//! keyed by pool index. The first matching rule wins. Tables are plain data
//! so the tiering can be checked without touching the random source.

use crate::random::RandomSource;

/// Depth used when no rule matches an index. Keeps `z > 0`.
pub const FALLBACK_DEPTH: f32 = 1.0;

/// Which pool indices a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexMatch {
    /// Indices strictly below the bound.
    Below(usize),
    /// Exactly one index.
    Exactly(usize),
    /// Every index.
    Any,
}

impl IndexMatch {
    /// Checks whether `index` is covered.
    #[must_use]
    pub const fn matches(&self, index: usize) -> bool {
        match *self {
            Self::Below(bound) => index < bound,
            Self::Exactly(target) => index == target,
            Self::Any => true,
        }
    }
}

/// How a depth value is produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepthDistribution {
    /// Always the same depth.
    Fixed(f32),
    /// `uniform(min, max) / divisor`.
    Uniform {
        /// Lower bound before division
        min: f32,
        /// Upper bound before division
        max: f32,
        /// Divisor applied to the sample
        divisor: f32,
    },
}

impl DepthDistribution {
    /// Smallest depth this distribution can produce.
    #[must_use]
    pub fn min_depth(&self) -> f32 {
        match *self {
            Self::Fixed(z) => z,
            Self::Uniform { min, divisor, .. } => min / divisor,
        }
    }

    /// Largest depth this distribution can produce.
    #[must_use]
    pub fn max_depth(&self) -> f32 {
        match *self {
            Self::Fixed(z) => z,
            Self::Uniform { max, divisor, .. } => max / divisor,
        }
    }

    fn sample(&self, rng: &mut impl RandomSource) -> f32 {
        match *self {
            Self::Fixed(z) => z,
            Self::Uniform { min, max, divisor } => rng.uniform(min, max) / divisor,
        }
    }
}

/// One row of a depth table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRule {
    /// Indices this rule applies to.
    pub indices: IndexMatch,
    /// Depth distribution.
    pub distribution: DepthDistribution,
    /// Forced starting X, used to frame a particle at a known spot.
    pub pinned_x: Option<f32>,
}

impl DepthRule {
    /// Creates a rule without a pinned X.
    #[must_use]
    pub const fn new(indices: IndexMatch, distribution: DepthDistribution) -> Self {
        Self {
            indices,
            distribution,
            pinned_x: None,
        }
    }

    /// Pins the starting X of matching particles.
    #[must_use]
    pub const fn pinned(mut self, x: f32) -> Self {
        self.pinned_x = Some(x);
        self
    }
}

/// Depth and optional X override produced for one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthSample {
    /// Depth (z).
    pub z: f32,
    /// Starting X override.
    pub pinned_x: Option<f32>,
}

/// Ordered list of depth rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthTable {
    rules: &'static [DepthRule],
}

/// Dot depths: a few fixed near/mid tiers, one framed particle, then a
/// randomly distant tail.
pub const DOT_DEPTH_TABLE: DepthTable = DepthTable::new(&DOT_RULES);

const DOT_RULES: [DepthRule; 4] = [
    DepthRule::new(IndexMatch::Below(3), DepthDistribution::Fixed(14.0)),
    DepthRule::new(IndexMatch::Below(7), DepthDistribution::Fixed(25.0)),
    DepthRule::new(IndexMatch::Exactly(10), DepthDistribution::Fixed(24.0)).pinned(1.0),
    DepthRule::new(
        IndexMatch::Any,
        DepthDistribution::Uniform {
            min: 6.0,
            max: 14.0,
            divisor: 1.0,
        },
    ),
];

/// Number of beams drawn from the near band.
pub const NEAR_BEAM_COUNT: usize = 20;

/// Beam depths: a near band for the first beams, a far band for the rest.
pub const BEAM_DEPTH_TABLE: DepthTable = DepthTable::new(&BEAM_RULES);

const BEAM_RULES: [DepthRule; 2] = [
    DepthRule::new(
        IndexMatch::Below(NEAR_BEAM_COUNT),
        DepthDistribution::Uniform {
            min: 4.0,
            max: 10.0,
            divisor: 2.0,
        },
    ),
    DepthRule::new(
        IndexMatch::Any,
        DepthDistribution::Uniform {
            min: 4.0,
            max: 35.0,
            divisor: 2.0,
        },
    ),
];

impl DepthTable {
    /// Creates a table from ordered rules.
    #[must_use]
    pub const fn new(rules: &'static [DepthRule]) -> Self {
        Self { rules }
    }

    /// The rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &'static [DepthRule] {
        self.rules
    }

    /// First rule matching `index`.
    #[must_use]
    pub fn rule_for(&self, index: usize) -> Option<&'static DepthRule> {
        self.rules.iter().find(|rule| rule.indices.matches(index))
    }

    /// Draws the depth for the particle at `index`.
    pub fn sample(&self, index: usize, rng: &mut impl RandomSource) -> DepthSample {
        match self.rule_for(index) {
            Some(rule) => DepthSample {
                z: rule.distribution.sample(rng),
                pinned_x: rule.pinned_x,
            },
            None => DepthSample {
                z: FALLBACK_DEPTH,
                pinned_x: None,
            },
        }
    }
}
