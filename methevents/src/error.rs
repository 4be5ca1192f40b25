use std::path::PathBuf;

use crate::data_structs::Scope;

/// Failures the engine reports as distinct classes.
///
/// Functions in this crate return [`anyhow::Result`]; these variants travel
/// inside it and can be recovered with `err.downcast_ref::<MethEventError>()`.
/// Zero denominators are not errors: they show up as NaN cells.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MethEventError {
    #[error("cannot access input {path:?}: {reason}")]
    InputAccess { path: PathBuf, reason: String },

    #[error("unsupported input extension {extension:?} for {path:?} (expected csv, tsv, txt or xlsx)")]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("schema mismatch with {columns} columns: {reason}")]
    SchemaMismatch { columns: usize, reason: String },

    #[error("unknown context {0:?}")]
    UnknownContext(String),

    #[error("cross-context join is missing D1 for {missing:?}")]
    IncompleteBarrier { missing: Vec<Scope> },
}
