use crate::{
    dataset::Group,
    error::{Result, RraError},
    null::NullPool,
    rank::is_ascending,
};

/// Raw empirical FDR of each lo-value against the null pool
///
/// `lo_values` must be ascending. For the value at index `i` of `m` the
/// estimate is the null CDF at that value divided by the observed CDF
/// `(i + 0.5) / m`.
pub fn raw_fdr(lo_values: &[f64], pool: &NullPool, epsilon: f64) -> Result<Vec<f64>> {
    if !is_ascending(lo_values) {
        return Err(RraError::InvalidInput(
            "lo-values must be sorted ascending before estimating FDR".to_string(),
        ));
    }
    if pool.is_empty() {
        return Err(RraError::InvalidInput(
            "cannot estimate FDR against an empty null pool".to_string(),
        ));
    }

    let m = lo_values.len() as f64;
    let fdr = lo_values
        .iter()
        .enumerate()
        .map(|(i, lo)| {
            let null_cdf = pool.cdf(*lo, epsilon);
            let observed_cdf = (i as f64 + 0.5) / m;
            null_cdf / observed_cdf
        })
        .collect();
    Ok(fdr)
}

/// Step-up repair making the FDR non-decreasing with index
///
/// The last value is capped at 1 and every earlier value is replaced by the
/// minimum of itself and its successor.
pub fn enforce_monotonicity(fdr: &mut [f64]) {
    let Some(last) = fdr.last_mut() else {
        return;
    };
    *last = last.min(1.0);
    for i in (0..fdr.len() - 1).rev() {
        fdr[i] = fdr[i].min(fdr[i + 1]);
    }
}

/// Assigns the empirical FDR of each group
///
/// Groups must already be ordered ascending by lo-value.
pub fn empirical_fdr(groups: &mut [Group], pool: &NullPool, epsilon: f64) -> Result<()> {
    let lo_values = groups.iter().map(|g| g.lo_value).collect::<Vec<_>>();
    let mut fdr = raw_fdr(&lo_values, pool, epsilon)?;
    enforce_monotonicity(&mut fdr);
    for (group, fdr) in groups.iter_mut().zip(fdr) {
        group.fdr = fdr;
    }
    Ok(())
}
