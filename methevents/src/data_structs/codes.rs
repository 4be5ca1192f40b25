use itertools::izip;
use log::{
    debug,
    warn,
};
use polars::prelude::*;

use crate::data_structs::enums::Context;
use crate::data_structs::event::concat_symbols;
use crate::data_structs::input::{
    InputLayout,
    InputTable,
    DA_COL,
    DK_COL,
};

/// Generated code strings for every row and replicate of an input table.
///
/// Strings are stored as generated; whether they form one of the sixteen
/// event codes is decided when tallying.
#[derive(Debug, Clone, PartialEq)]
pub struct CodedTable {
    layout:   InputLayout,
    /// Row contexts, `None` for unrecognised values.
    contexts: Vec<Option<Context>>,
    /// One column of code strings per replicate, rows in input order.
    codes:    Vec<Vec<String>>,
}

impl CodedTable {
    /// Builds `Da + A_R[r] + Dk + K_R[r]` for every row and replicate.
    pub fn generate(input: &InputTable) -> anyhow::Result<Self> {
        let layout = *input.layout();
        let contexts = input.contexts()?;
        let da = input.symbols(DA_COL)?;
        let dk = input.symbols(DK_COL)?;

        let codes = layout
            .replicates()
            .map(|replicate| -> anyhow::Result<Vec<String>> {
                let a = input.symbols(&layout.a_col(replicate))?;
                let k = input.symbols(&layout.k_col(replicate))?;
                Ok(izip!(&da, &a, &dk, &k)
                    .map(|(da, a, dk, k)| concat_symbols(da, a, dk, k))
                    .collect())
            })
            .collect::<anyhow::Result<Vec<Vec<String>>>>()?;

        let unknown = contexts.iter().filter(|c| c.is_none()).count();
        if unknown > 0 {
            warn!(
                "{} rows have an unrecognised context and only count towards the pooled table",
                unknown
            );
        }
        debug!(
            "Generated codes for {} rows x {} replicates",
            contexts.len(),
            layout.n_replicates()
        );

        Ok(Self {
            layout,
            contexts,
            codes,
        })
    }

    /// Assembles a coded table from parts. Every code column must have one
    /// entry per context.
    pub fn from_parts(
        contexts: Vec<Option<Context>>,
        codes: Vec<Vec<String>>,
    ) -> anyhow::Result<Self> {
        if let Some(bad) = codes.iter().position(|col| col.len() != contexts.len()) {
            anyhow::bail!(
                "code column R{} has {} rows, expected {}",
                bad + 1,
                codes[bad].len(),
                contexts.len()
            );
        }
        Ok(Self {
            layout: InputLayout::new(codes.len()),
            contexts,
            codes,
        })
    }

    pub fn layout(&self) -> &InputLayout {
        &self.layout
    }

    pub fn n_rows(&self) -> usize {
        self.contexts.len()
    }

    pub fn n_replicates(&self) -> usize {
        self.layout.n_replicates()
    }

    pub fn contexts(&self) -> &[Option<Context>] {
        &self.contexts
    }

    /// Code strings of a 1-based replicate.
    pub fn replicate(
        &self,
        replicate: usize,
    ) -> Option<&[String]> {
        replicate
            .checked_sub(1)
            .and_then(|idx| self.codes.get(idx))
            .map(Vec::as_slice)
    }

    /// Rows whose context is not one of CG, CXG, CXX.
    pub fn unknown_context_rows(&self) -> usize {
        self.contexts.iter().filter(|c| c.is_none()).count()
    }

    /// The input table with `R1..RN` code columns appended.
    pub fn augment(
        &self,
        input: &InputTable,
    ) -> anyhow::Result<DataFrame> {
        let columns = self
            .layout
            .replicates()
            .zip(self.codes.iter())
            .map(|(replicate, codes)| {
                Column::from(Series::new(
                    self.layout.code_col(replicate).into(),
                    codes.as_slice(),
                ))
            })
            .collect::<Vec<_>>();
        Ok(input.data().hstack(&columns)?)
    }
}
