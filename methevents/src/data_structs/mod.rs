//! Core data structures of the engine.
//!
//! - [`Context`] and [`Scope`]: the three sequence contexts and the pooled
//!   view over all rows.
//! - [`EventCode`] and [`Category`]: the sixteen 4-symbol event codes and
//!   their static category taxonomy.
//! - [`InputTable`] and [`InputLayout`]: the validated positional input.
//! - [`CodedTable`]: generated code strings per row and replicate.
//! - [`EventTally`]: base counts of one scope.
//! - [`SummaryRows`]: derived count rows (`E`, categories, `TTCIE`, `D1`).
//! - [`ScopeTable`]: labeled output rows of one scope.

pub(crate) mod codes;
pub(crate) mod enums;
pub(crate) mod event;
pub(crate) mod input;
pub(crate) mod scope_table;
pub(crate) mod summary;
pub(crate) mod tally;
pub mod typedef;


pub use codes::CodedTable;
pub use enums::{
    Context,
    Scope,
};
pub use event::{
    concat_symbols,
    Category,
    EventCode,
    EVENTS,
};
pub use input::{
    InputLayout,
    InputTable,
    CONTEXT_COL,
    DA_COL,
    DK_COL,
};
pub use scope_table::{
    ScopeTable,
    LABEL_COL,
};
pub use summary::{
    SummaryRow,
    SummaryRows,
};
pub use tally::EventTally;
