pub use crate::data_structs::typedef::{
    CountType,
    MetricType,
};
pub use crate::data_structs::{
    Category,
    CodedTable,
    Context,
    EventCode,
    EventTally,
    InputLayout,
    InputTable,
    Scope,
    ScopeTable,
    SummaryRow,
    SummaryRows,
    EVENTS,
};
pub use crate::error::MethEventError;
pub use crate::io::{
    read_input,
    write_results,
    ReadOptions,
};
pub use crate::tools::normalize::{
    ConfidenceNormalized,
    CrossContextD1,
    Percentages,
};
pub use crate::tools::{
    AggregationConfig,
    AggregationResult,
    DataQuality,
};
