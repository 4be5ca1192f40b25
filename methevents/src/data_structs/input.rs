use log::debug;
use polars::prelude::*;

use crate::data_structs::enums::Context;
use crate::error::MethEventError;
use crate::utils::normalize_symbol;

/// Canonical names of the input columns.
pub const CONTEXT_COL: &str = "MethylType";
pub const DA_COL: &str = "Da";
pub const DK_COL: &str = "Dk";

/// Positional layout of an input table:
/// `[context, Da, A_R1..A_RN, Dk, K_R1..K_RN]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLayout {
    n_replicates: usize,
}

impl InputLayout {
    pub fn new(n_replicates: usize) -> Self {
        Self { n_replicates }
    }

    /// Infers the replicate count from the column count.
    ///
    /// Without the context column the width must be even and hold at least
    /// one replicate on each side.
    pub fn from_width(columns: usize) -> Result<Self, MethEventError> {
        if columns < 5 {
            return Err(MethEventError::SchemaMismatch {
                columns,
                reason: "expected a context column, Da, Dk and at least one A/K \
                         replicate pair"
                    .to_string(),
            });
        }
        let remaining = columns - 1;
        if remaining % 2 != 0 {
            return Err(MethEventError::SchemaMismatch {
                columns,
                reason: format!(
                    "{} columns after the context column cannot be split into \
                     two equal halves",
                    remaining
                ),
            });
        }
        Ok(Self {
            n_replicates: remaining / 2 - 1,
        })
    }

    pub fn n_replicates(&self) -> usize {
        self.n_replicates
    }

    pub fn width(&self) -> usize {
        2 * self.n_replicates + 3
    }

    /// Name of the replicate's query column on the `A` side.
    pub fn a_col(
        &self,
        replicate: usize,
    ) -> String {
        format!("A_R{}", replicate)
    }

    /// Name of the replicate's query column on the `K` side.
    pub fn k_col(
        &self,
        replicate: usize,
    ) -> String {
        format!("K_R{}", replicate)
    }

    /// Name of the generated code column of a replicate.
    pub fn code_col(
        &self,
        replicate: usize,
    ) -> String {
        format!("R{}", replicate)
    }

    /// 1-based replicate numbers.
    pub fn replicates(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.n_replicates
    }

    /// Canonical column names in positional order.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.width());
        names.push(CONTEXT_COL.to_string());
        names.push(DA_COL.to_string());
        names.extend(self.replicates().map(|r| self.a_col(r)));
        names.push(DK_COL.to_string());
        names.extend(self.replicates().map(|r| self.k_col(r)));
        names
    }

    /// Names of the generated code columns, `R1..RN`.
    pub fn code_column_names(&self) -> Vec<String> {
        self.replicates().map(|r| self.code_col(r)).collect()
    }
}

/// Validated input table with canonical column names.
#[derive(Debug, Clone)]
pub struct InputTable {
    data:   DataFrame,
    layout: InputLayout,
}

impl InputTable {
    /// Validates the width of `data` and renames its columns positionally.
    /// Original headers are ignored.
    pub fn try_new(mut data: DataFrame) -> anyhow::Result<Self> {
        let layout = InputLayout::from_width(data.width())?;
        data.set_column_names(layout.column_names())?;
        debug!(
            "Input table with {} rows and {} replicates",
            data.height(),
            layout.n_replicates()
        );
        Ok(Self { data, layout })
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn layout(&self) -> &InputLayout {
        &self.layout
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn n_replicates(&self) -> usize {
        self.layout.n_replicates()
    }

    /// Normalized text values of one column.
    pub fn symbols(
        &self,
        name: &str,
    ) -> anyhow::Result<Vec<String>> {
        let series = self
            .data
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::String)?;
        Ok(series.str()?.into_iter().map(normalize_symbol).collect())
    }

    /// Context of every row; `None` for anything but the exact values CG,
    /// CXG and CXX. Context values are not trimmed or case-folded.
    pub fn contexts(&self) -> anyhow::Result<Vec<Option<Context>>> {
        let series = self
            .data
            .column(CONTEXT_COL)?
            .as_materialized_series()
            .cast(&DataType::String)?;
        Ok(series
            .str()?
            .into_iter()
            .map(|raw| raw.and_then(Context::from_label))
            .collect())
    }
}

impl TryFrom<DataFrame> for InputTable {
    type Error = anyhow::Error;

    fn try_from(value: DataFrame) -> Result<Self, Self::Error> {
        InputTable::try_new(value)
    }
}
