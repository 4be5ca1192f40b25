//! The aggregation engine built on top of [`crate::data_structs`].
//!
//! - [`normalize`]: phase 1 percentages, the cross-context `D1` join and the
//!   confidence-normalized phase 2 metrics.
//! - [`AggregationConfig`]: runs code generation, tallying, summaries and
//!   both normalization phases, scheduling the join between them.
mod aggregate;
pub mod normalize;

pub use aggregate::{
    AggregationConfig,
    AggregationResult,
    DataQuality,
};
