//! # methevents
//!
//! `methevents` classifies paired-replicate methylation calls into sixteen
//! 4-symbol event codes, tallies them per sequence context (CG, CXG, CXX) and
//! over all rows pooled together, and derives summary counts, percentages and
//! conversion-error corrected metrics from the tallies.
//!
//! ## Pipeline
//!
//! 1. **Code generation** ([`CodedTable`]): for every row and replicate `r`
//!    the code is `Da + A_R[r] + Dk + K_R[r]`.
//! 2. **Tallying** ([`EventTally`]): counts of each of the sixteen codes per
//!    scope and replicate. Strings outside the sixteen codes are counted
//!    separately as unclassified.
//! 3. **Summaries** ([`SummaryRows`]): `E`, `SE`, `DME`, `DNME`, `CE`,
//!    `SNMSs`, `SMSs`, `TTCIE` and the denominator `D1`.
//! 4. **Normalization** ([`tools::normalize`]): percentages relative to `D1`,
//!    then, once every scope has its `D1`, the `_CN` metrics.
//!
//! Zero denominators never raise: the affected cell is NaN and stays NaN
//! through every later formula.
//!
//! ## Usage
//!
//! ```no_run
//! use methevents::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let input = read_input("calls.csv", &ReadOptions::default())?;
//!     let result = AggregationConfig::default().run(&input)?;
//!
//!     let cg = result.table(Scope::Context(Context::CG)).unwrap();
//!     println!("CG D1 in R1: {:?}", cg.get("CG_D1", 1));
//!
//!     write_results(&result, "out")?;
//!     Ok(())
//! }
//! ```
//!
//! The number of threads can be set with the `METHEVENTS_NUM_THREADS`
//! environment variable.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[ctor::ctor]
fn init() {
    if let Ok(n) = std::env::var("METHEVENTS_NUM_THREADS") {
        std::env::set_var("POLARS_MAX_THREADS", n)
    }
}

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

#[allow(unused_imports)]
use prelude::*;
