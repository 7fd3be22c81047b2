use thiserror::Error;

/// Errors raised while reading, scoring or writing a rank aggregation run
///
/// Every failure aborts the run: FDR ranking depends on all groups, so a
/// partial result is never produced.
#[derive(Debug, Error)]
pub enum RraError {
    /// Malformed records, wrong field counts or identity violations
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A parameter outside its permitted range
    #[error("{name} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The Beta CDF failed or a group had no items to score
    #[error("computation failed: {0}")]
    ComputationFailure(String),

    /// More distinct groups or lists than the configured ceiling allows
    #[error("too many {kind}: ceiling is {ceiling}")]
    ResourceExhaustion { kind: &'static str, ceiling: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RraError>;
