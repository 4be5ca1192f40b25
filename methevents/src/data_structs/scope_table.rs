use hashbrown::HashMap;
use polars::prelude::*;

use crate::data_structs::enums::Scope;
use crate::data_structs::typedef::MetricType;

/// Name of the row label column in exported frames.
pub const LABEL_COL: &str = "Sequence";

/// Labeled result rows of one scope, one value per replicate.
///
/// Rows keep insertion order. Setting a label that already exists replaces
/// its values in place, so every label appears once.
#[derive(Debug, Clone)]
pub struct ScopeTable {
    scope:        Scope,
    n_replicates: usize,
    labels:       Vec<String>,
    values:       Vec<Vec<MetricType>>,
    index:        HashMap<String, usize>,
}

impl ScopeTable {
    pub fn new(
        scope: Scope,
        n_replicates: usize,
    ) -> Self {
        Self {
            scope,
            n_replicates,
            labels: Vec::new(),
            values: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn n_replicates(&self) -> usize {
        self.n_replicates
    }

    pub fn n_rows(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Appends a row, or overwrites the values of an existing label.
    ///
    /// Fails without modifying the table if `values` does not hold one entry
    /// per replicate.
    pub fn set_row(
        &mut self,
        label: impl Into<String>,
        values: Vec<MetricType>,
    ) -> anyhow::Result<()> {
        let label = label.into();
        if values.len() != self.n_replicates {
            anyhow::bail!(
                "row {} has {} values but the table holds {} replicates",
                label,
                values.len(),
                self.n_replicates
            );
        }
        match self.index.get(&label) {
            Some(&idx) => self.values[idx] = values,
            None => {
                self.index.insert(label.clone(), self.labels.len());
                self.labels.push(label);
                self.values.push(values);
            },
        }
        Ok(())
    }

    /// Appends a row of counts.
    pub fn set_count_row(
        &mut self,
        label: impl Into<String>,
        counts: &[u64],
    ) -> anyhow::Result<()> {
        self.set_row(label, counts.iter().map(|c| *c as MetricType).collect())
    }

    pub fn row(
        &self,
        label: &str,
    ) -> Option<&[MetricType]> {
        self.index.get(label).map(|idx| self.values[*idx].as_slice())
    }

    /// Value of a labeled row in a 1-based replicate.
    pub fn get(
        &self,
        label: &str,
        replicate: usize,
    ) -> Option<MetricType> {
        self.row(label)
            .and_then(|row| replicate.checked_sub(1).and_then(|idx| row.get(idx)))
            .copied()
    }

    /// Rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MetricType])> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(Vec::as_slice))
    }

    /// Frame with a `Sequence` label column followed by `R1..RN` as Float64.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.n_replicates + 1);
        columns.push(Column::from(Series::new(
            LABEL_COL.into(),
            self.labels.as_slice(),
        )));
        for replicate in 0..self.n_replicates {
            let values = self
                .values
                .iter()
                .map(|row| row[replicate])
                .collect::<Vec<MetricType>>();
            columns.push(Column::from(Series::new(
                format!("R{}", replicate + 1).into(),
                values,
            )));
        }
        DataFrame::new(columns)
    }
}

impl PartialEq for ScopeTable {
    /// Compares labels and values bitwise, so NaN cells in the same place
    /// are equal.
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.scope == other.scope
            && self.n_replicates == other.n_replicates
            && self.labels == other.labels
            && self
                .values
                .iter()
                .flatten()
                .map(|v| v.to_bits())
                .eq(other.values.iter().flatten().map(|v| v.to_bits()))
    }
}
