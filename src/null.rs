use rand::{distributions::Uniform, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::{
    error::{Result, RraError},
    math::lo_value,
    rank::{is_ascending, mid_rank, sort_ascending},
};

/// Monte-Carlo model of lo-values under uniformly random ranks
///
/// Each pass draws one synthetic group per observed group, of the same size,
/// with i.i.d. Uniform(0, 1) percentiles and scores it like a real group. The
/// pool therefore mixes group sizes in proportion to how often they occur.
///
/// Every draw owns a ChaCha8 stream derived from the seed and the draw's
/// position, so the pool does not depend on the number of worker threads.
pub struct NullModel<'a> {
    group_sizes: &'a [usize],
    max_percentile: f64,
    seed: u64,
}
impl<'a> NullModel<'a> {
    pub fn new(group_sizes: &'a [usize], max_percentile: f64, seed: u64) -> Self {
        Self {
            group_sizes,
            max_percentile,
            seed,
        }
    }

    /// Number of passes over the groups needed to reach `target` samples
    pub fn passes(&self, target: usize) -> usize {
        if self.group_sizes.is_empty() {
            return 0;
        }
        target.div_ceil(self.group_sizes.len())
    }

    /// Draws at least `target` null lo-values and returns them as a sorted pool
    pub fn simulate(&self, target: usize) -> Result<NullPool> {
        if self.group_sizes.is_empty() {
            return Err(RraError::InvalidInput(
                "cannot simulate a null model without groups".to_string(),
            ));
        }
        if let Some(j) = self.group_sizes.iter().position(|n| *n == 0) {
            return Err(RraError::ComputationFailure(format!(
                "group at position {j} has no items"
            )));
        }

        let m = self.group_sizes.len();
        let passes = self.passes(target);
        debug!(passes, groups = m, "Simulating null lo-values");

        let values = (0..passes * m)
            .into_par_iter()
            .map(|draw| self.draw(draw, self.group_sizes[draw % m]))
            .collect::<Result<Vec<_>>>()?;

        Ok(NullPool::from_unsorted(values))
    }

    /// Scores one synthetic group of `size` uniform percentiles
    fn draw(&self, draw: usize, size: usize) -> Result<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(draw as u64);
        let percentiles = rng
            .sample_iter(Uniform::new(0.0, 1.0))
            .take(size)
            .collect::<Vec<f64>>();
        lo_value(&percentiles, self.max_percentile)
    }
}

/// Sorted pool of null lo-values
#[derive(Debug, Clone, PartialEq)]
pub struct NullPool {
    values: Vec<f64>,
}
impl NullPool {
    pub fn from_unsorted(mut values: Vec<f64>) -> Self {
        sort_ascending(&mut values);
        Self { values }
    }

    /// Wraps values that are already ascending
    pub fn from_sorted(values: Vec<f64>) -> Result<Self> {
        if !is_ascending(&values) {
            return Err(RraError::InvalidInput(
                "null pool values must be sorted ascending".to_string(),
            ));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mid-rank fraction of null lo-values at or below `value`
    pub fn cdf(&self, value: f64, epsilon: f64) -> f64 {
        mid_rank(value, &self.values, epsilon)
    }
}
