use bon::Builder;

use crate::error::{Result, RraError};

/// Default percentile cutoff for the lo-value computation
pub const DEFAULT_MAX_PERCENTILE: f64 = 0.25;

/// Default seed of the null model
pub const DEFAULT_SEED: u64 = 123456;

/// Default number of null draws per observed group
pub const DEFAULT_PASSES_PER_GROUP: usize = 100;

/// Tolerance used when comparing floating point values for ties
pub const DEFAULT_EPSILON: f64 = 1e-9;

pub const DEFAULT_MAX_GROUPS: usize = 100_000;
pub const DEFAULT_MAX_LISTS: usize = 1_000;

/// Configuration of a rank aggregation run
///
/// ```
/// use rra::RraConfig;
///
/// let config = RraConfig::builder().max_percentile(0.1).build();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seed, 123456);
/// ```
#[derive(Debug, Clone, Copy, Builder)]
pub struct RraConfig {
    /// Ranks whose percentile exceeds this cutoff are not scored (rank 1 always is)
    #[builder(default = DEFAULT_MAX_PERCENTILE)]
    pub max_percentile: f64,

    /// Seed of the Monte-Carlo null model
    #[builder(default = DEFAULT_SEED)]
    pub seed: u64,

    /// Null draws per observed group, i.e. the total null sample target is
    /// `passes_per_group * n_groups`
    #[builder(default = DEFAULT_PASSES_PER_GROUP)]
    pub passes_per_group: usize,

    /// Tie tolerance of the mid-rank search
    #[builder(default = DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Ceiling on distinct groups, `usize::MAX` for unlimited
    #[builder(default = DEFAULT_MAX_GROUPS)]
    pub max_groups: usize,

    /// Ceiling on distinct lists, `usize::MAX` for unlimited
    #[builder(default = DEFAULT_MAX_LISTS)]
    pub max_lists: usize,
}

impl Default for RraConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RraConfig {
    /// Checks parameter ranges before any computation starts
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.max_percentile) {
            return Err(RraError::OutOfRange {
                name: "max_percentile",
                value: self.max_percentile,
                min: 0.0,
                max: 1.0,
            });
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(RraError::OutOfRange {
                name: "epsilon",
                value: self.epsilon,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            });
        }
        if self.passes_per_group == 0 {
            return Err(RraError::OutOfRange {
                name: "passes_per_group",
                value: 0.0,
                min: 1.0,
                max: usize::MAX as f64,
            });
        }
        Ok(())
    }

    /// Total number of null samples targeted for `n_groups` observed groups
    pub fn null_sample_target(&self, n_groups: usize) -> usize {
        self.passes_per_group * n_groups
    }
}
