/// Number of rows observed for a code, scope or replicate.
pub type CountType = u64;
/// Percentages and normalized metrics. Undefined cells hold `f64::NAN`.
pub type MetricType = f64;
