use std::fs::File;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context as AnyhowContext;
use log::info;
use polars::prelude::*;

use crate::tools::AggregationResult;

/// File name of the augmented input table.
pub const SEQUENCES_FILE: &str = "sequences.csv";
/// File name of the unclassified-code audit.
pub const UNCLASSIFIED_FILE: &str = "unclassified.csv";

/// Writes a frame as comma-separated text with a header line.
pub fn write_csv<P: AsRef<Path>>(
    df: &mut DataFrame,
    path: P,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Writes every table of a run into `dir`: `cg_df.csv`, `cxg_df.csv`,
/// `cxx_df.csv`, `total_df.csv`, `sequences.csv` and `unclassified.csv`.
///
/// Returns the written paths in that order.
pub fn write_results<P: AsRef<Path>>(
    result: &AggregationResult,
    dir: P,
) -> anyhow::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(result.tables.len() + 2);
    for table in result.tables.iter() {
        let path = dir.join(format!("{}_df.csv", table.scope().file_stem()));
        write_csv(&mut table.to_dataframe()?, &path)?;
        written.push(path);
    }

    let path = dir.join(SEQUENCES_FILE);
    write_csv(&mut result.augmented.clone(), &path)?;
    written.push(path);

    let path = dir.join(UNCLASSIFIED_FILE);
    write_csv(&mut result.quality.to_dataframe()?, &path)?;
    written.push(path);

    info!("Wrote {} files to {}", written.len(), dir.display());
    Ok(written)
}
