use statrs::function::beta::checked_beta_reg;

use crate::{
    error::{Result, RraError},
    rank::{mid_rank, sort_ascending},
};

/// Regularized incomplete Beta function `I_x(a, b)`
///
/// This is the CDF at `x` of a Beta(a, b) distributed variable.
pub fn beta_cdf(a: f64, b: f64, x: f64) -> Result<f64> {
    let p = checked_beta_reg(a, b, x).map_err(|e| {
        RraError::ComputationFailure(format!("beta CDF (a={a}, b={b}, x={x}): {e}"))
    })?;
    if !p.is_finite() {
        return Err(RraError::ComputationFailure(format!(
            "beta CDF (a={a}, b={b}, x={x}) did not converge"
        )));
    }
    Ok(p.clamp(0.0, 1.0))
}

/// Percentile of an item value within the sorted values of its list
///
/// Tied values share the percentile of the middle of their run.
pub fn percentile(value: f64, sorted_list: &[f64], epsilon: f64) -> f64 {
    mid_rank(value, sorted_list, epsilon)
}

/// Computes the lo-value of a group from its item percentiles
///
/// The percentiles are sorted and the `k`-th smallest `x_k` of `n` is scored
/// as `P(U_(k) <= x_k)` where `U_(k)` is the `k`-th order statistic of `n`
/// uniform draws, i.e. `BetaCDF(k, n - k + 1, x_k)`. Ranks stop once `x_k`
/// exceeds `max_percentile`, except rank 1 which is always scored.
/// The lo-value is the smallest score.
pub fn lo_value(percentiles: &[f64], max_percentile: f64) -> Result<f64> {
    if percentiles.is_empty() {
        return Err(RraError::InvalidInput(
            "cannot compute a lo-value for a group without items".to_string(),
        ));
    }

    let mut sorted = percentiles.to_vec();
    sort_ascending(&mut sorted);

    let n = sorted.len();
    let mut lo = 1.0_f64;
    for (k, x) in sorted.iter().enumerate() {
        if *x > max_percentile && k > 0 {
            break;
        }
        let score = beta_cdf((k + 1) as f64, (n - k) as f64, *x)?;
        lo = lo.min(score);
    }
    Ok(lo)
}
