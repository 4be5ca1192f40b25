//! Thin file wrappers around the engine: a delimited-text reader producing an
//! [`InputTable`](crate::data_structs::InputTable) and a CSV writer for the
//! result tables.

mod read;
mod write;

pub use read::{
    check_input_path,
    read_input,
    ReadOptions,
    SUPPORTED_EXTENSIONS,
};
pub use write::{
    write_csv,
    write_results,
    SEQUENCES_FILE,
    UNCLASSIFIED_FILE,
};
