//! Helpers shared by the code generator, the aggregation engine and the I/O
//! layer: the crate-wide rayon pool, builder macros, symbol normalization and
//! the division helper that turns zero denominators into NaN.

use once_cell::sync::Lazy;
use rayon::{
    ThreadPool,
    ThreadPoolBuilder,
};

use crate::data_structs::typedef::MetricType;

pub static THREAD_POOL: Lazy<ThreadPool> = Lazy::new(|| {
    let num_threads: Option<usize> = std::env::var("METHEVENTS_NUM_THREADS")
        .ok()
        .and_then(|str| str.parse::<usize>().ok());
    ThreadPoolBuilder::new()
        .num_threads(num_threads.unwrap_or(0))
        .build()
        .expect("Failed to create thread pool")
});

pub fn n_threads() -> usize {
    THREAD_POOL.current_num_threads()
}

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            #[cfg_attr(coverage_nightly, coverage(off))]
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
            self.$field_name = value;
            self
            }
        }
    };
}

/// Divides, returning NaN instead of an infinity or a panic when the
/// denominator is zero. NaN operands propagate unchanged.
#[inline]
pub fn safe_div(
    numerator: MetricType,
    denominator: MetricType,
) -> MetricType {
    if denominator == 0.0 {
        MetricType::NAN
    }
    else {
        numerator / denominator
    }
}

/// `100 * numerator / denominator`, NaN when the denominator is zero.
#[inline]
pub fn percent(
    numerator: MetricType,
    denominator: MetricType,
) -> MetricType {
    safe_div(100.0 * numerator, denominator)
}

/// Brings one categorical cell to its canonical text form.
///
/// Numeric and textual spellings of the same symbol collapse to one string:
/// `1`, `"1"`, `1.0` and `" 1 "` all become `"1"`. Missing cells become the
/// empty string, which never forms a valid event code.
pub fn normalize_symbol(raw: Option<&str>) -> String {
    let Some(raw) = raw
    else {
        return String::new();
    };
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 && trimmed.contains('.') => {
            format!("{}", value as i64)
        },
        _ => trimmed.to_string(),
    }
}
