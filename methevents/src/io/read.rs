use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context as AnyhowContext;
use calamine::{
    open_workbook_auto,
    Data,
    Reader,
};
use log::{
    debug,
    info,
};
use polars::prelude::*;

use crate::data_structs::input::InputTable;
use crate::error::MethEventError;
use crate::with_field_fn;

/// Extensions accepted by [`read_input`].
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["csv", "tsv", "txt", "xlsx"];

/// Options of the input reader. The separator only applies to delimited
/// text; spreadsheets honour the header flag alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field separator. `None` picks tab for `.tsv` files and comma otherwise.
    pub separator:  Option<u8>,
    /// Whether the first line holds column names. Names are discarded either
    /// way; columns are identified by position.
    pub has_header: bool,
}

impl ReadOptions {
    with_field_fn!(separator, Option<u8>);
    with_field_fn!(has_header, bool);

    fn separator_for(
        &self,
        extension: &str,
    ) -> u8 {
        self.separator.unwrap_or(match extension {
            "tsv" => b'\t',
            _ => b',',
        })
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            separator:  None,
            has_header: true,
        }
    }
}

/// Checks that `path` is an existing file with a supported extension and
/// returns the lowercase extension.
pub fn check_input_path(path: &Path) -> Result<String, MethEventError> {
    if !path.exists() {
        return Err(MethEventError::InputAccess {
            path:   path.to_path_buf(),
            reason: "file does not exist".to_string(),
        });
    }
    if !path.is_file() {
        return Err(MethEventError::InputAccess {
            path:   path.to_path_buf(),
            reason: "not a regular file".to_string(),
        });
    }
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(MethEventError::UnsupportedExtension {
            path: path.to_path_buf(),
            extension,
        });
    }
    Ok(extension)
}

/// Reads a delimited text file or the first worksheet of an `.xlsx`
/// workbook into an [`InputTable`].
///
/// Every column is read as text so that `0`/`1` symbols keep their exact
/// spelling until normalization.
pub fn read_input<P: AsRef<Path>>(
    path: P,
    options: &ReadOptions,
) -> anyhow::Result<InputTable> {
    let path = path.as_ref();
    let extension = check_input_path(path)?;
    let data = match extension.as_str() {
        "xlsx" => read_workbook(path, options.has_header)?,
        _ => read_delimited(path, options.separator_for(&extension), options.has_header)?,
    };

    let table = InputTable::try_new(data)
        .with_context(|| format!("while reading {}", path.display()))?;
    info!(
        "Read {} rows with {} replicates from {}",
        table.height(),
        table.n_replicates(),
        path.display()
    );
    Ok(table)
}

fn read_delimited(
    path: &Path,
    separator: u8,
    has_header: bool,
) -> Result<DataFrame, MethEventError> {
    debug!(
        "Reading {} with separator {:?}",
        path.display(),
        separator as char
    );
    CsvReadOptions::default()
        .with_has_header(has_header)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))
        .and_then(|reader| reader.finish())
        .map_err(|e| {
            MethEventError::InputAccess {
                path:   path.to_path_buf(),
                reason: e.to_string(),
            }
        })
}

/// Reads the first worksheet as String columns. Empty cells become nulls,
/// numeric cells their display form (`1.0` is printed as `1`).
fn read_workbook(
    path: &Path,
    has_header: bool,
) -> Result<DataFrame, MethEventError> {
    let access_error = |reason: String| {
        MethEventError::InputAccess {
            path: path.to_path_buf(),
            reason,
        }
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| access_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| access_error("workbook has no worksheet".to_string()))?
        .map_err(|e| access_error(e.to_string()))?;
    debug!(
        "Reading first worksheet of {} ({} rows, {} columns)",
        path.display(),
        range.height(),
        range.width()
    );

    let skip = if has_header { 1 } else { 0 };
    let mut columns = vec![Vec::<Option<String>>::new(); range.width()];
    for row in range.rows().skip(skip) {
        for (column, cell) in columns.iter_mut().zip(row.iter()) {
            column.push(match cell {
                Data::Empty => None,
                other => Some(other.to_string()),
            });
        }
    }

    // Header cells are not used as names; columns are renamed by position.
    let columns = columns
        .into_iter()
        .enumerate()
        .map(|(idx, values)| {
            Column::from(Series::new(format!("column_{}", idx + 1).into(), values))
        })
        .collect::<Vec<_>>();
    DataFrame::new(columns).map_err(|e| access_error(e.to_string()))
}
