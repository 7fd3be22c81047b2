//! RRA: Robust Rank Aggregation
//!
//! This library implements Robust Rank Aggregation, which scores groups of
//! items (e.g. the sgRNAs of a gene) measured across several ranked lists by
//! how consistently the items rank near the top of their lists, and estimates
//! an empirical false discovery rate for each group by Monte-Carlo simulation
//! of uniformly random ranks.
//!
//! The main components of this library are:
//! - `Rra`: The main algorithm implementation
//! - `Dataset`: Groups, items and the lists they are ranked in
//! - `RraConfig`: Configuration of the percentile cutoff and null model
//! - `RraResults`: Structure to hold and write the results
//!
//! ```
//! use rra::{Dataset, Rra, RraConfig};
//!
//! let config = RraConfig::default();
//! let mut builder = Dataset::builder(&config);
//! for (item, group, list, value) in [
//!     ("a1", "A", "L1", 1.0),
//!     ("b1", "B", "L1", 2.0),
//!     ("a2", "A", "L2", 1.0),
//!     ("b2", "B", "L2", 2.0),
//! ] {
//!     builder.push(item, group, list, value)?;
//! }
//! let results = Rra::new(builder.build()?, config).run()?;
//! assert_eq!(results.groups()[0].name, "A");
//! # Ok::<(), rra::RraError>(())
//! ```

mod config;
mod dataset;
mod error;
mod fdr;
mod io;
mod math;
mod null;
mod rank;
mod results;
mod rra;

pub use config::RraConfig;
pub use dataset::{Dataset, DatasetBuilder, Group, Item, List};
pub use error::{Result, RraError};
pub use fdr::{empirical_fdr, enforce_monotonicity, raw_fdr};
pub use io::{read_dataset, read_dataset_path};
pub use math::{beta_cdf, lo_value, percentile};
pub use null::{NullModel, NullPool};
pub use rank::{mid_rank, rank_below_or_equal, sort_ascending};
pub use results::{format_scientific, RraResults};
pub use rra::Rra;
