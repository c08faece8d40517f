//! Exploratory summaries over listings frames.
//!
//! Nothing here mutates its input; the functions return summaries or new
//! frames.

pub mod distribution;
pub mod missingness;

pub use distribution::{CategoryCount, CategoryDistribution, frequency_distribution, ordered_distribution};
pub use missingness::{CorrelationMatrix, PartialMissing, missing_correlation, partial_missing};
