use std::io::Read;

use anyhow::Context as AnyhowContext;
use itertools::Itertools;
use log::{
    debug,
    info,
    warn,
};
use polars::prelude::*;
use rayon::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::codes::CodedTable;
use crate::data_structs::enums::Scope;
use crate::data_structs::event::EventCode;
use crate::data_structs::input::InputTable;
use crate::data_structs::scope_table::{
    ScopeTable,
    LABEL_COL,
};
use crate::data_structs::summary::SummaryRows;
use crate::data_structs::tally::EventTally;
use crate::data_structs::typedef::CountType;
use crate::tools::normalize::{
    ConfidenceNormalized,
    CrossContextD1,
    Percentages,
};
use crate::utils::{
    n_threads,
    THREAD_POOL,
};
use crate::with_field_fn;

/// Settings of one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Process scopes and replicate columns on the crate thread pool.
    pub parallel:          bool,
    /// Log a warning when generated codes fall outside the sixteen events.
    pub warn_unclassified: bool,
}

impl AggregationConfig {
    with_field_fn!(parallel, bool);
    with_field_fn!(warn_unclassified, bool);

    /// Reads a JSON object; missing keys keep their defaults.
    pub fn from_json<R: Read>(reader: R) -> anyhow::Result<Self> {
        serde_json::from_reader(reader).context("invalid aggregation config")
    }

    /// Runs the whole engine on one input table.
    pub fn run(
        &self,
        input: &InputTable,
    ) -> anyhow::Result<AggregationResult> {
        if self.parallel {
            debug!("Running on {} threads", n_threads());
            THREAD_POOL.install(|| self.run_inner(input))
        }
        else {
            rayon::ThreadPoolBuilder::new()
                .num_threads(1)
                .build()?
                .install(|| self.run_inner(input))
        }
    }

    fn run_inner(
        &self,
        input: &InputTable,
    ) -> anyhow::Result<AggregationResult> {
        info!(
            "Aggregating {} rows with {} replicates",
            input.height(),
            input.n_replicates()
        );
        let coded = CodedTable::generate(input)?;
        let augmented = coded.augment(input)?;
        let (tables, quality) = self.aggregate(&coded)?;
        Ok(AggregationResult {
            augmented,
            tables,
            quality,
        })
    }

    /// Tallies, summarizes and normalizes already generated codes.
    ///
    /// Phase 1 runs per scope; the cross-context join waits for all of them
    /// before any scope enters phase 2.
    pub fn aggregate(
        &self,
        coded: &CodedTable,
    ) -> anyhow::Result<(Vec<ScopeTable>, DataQuality)> {
        let phase_one = Scope::ALL
            .par_iter()
            .map(|scope| {
                let tally = EventTally::build(coded, *scope);
                let summary = SummaryRows::from_tally(&tally);
                let percentages = Percentages::from_summary(&summary);
                (tally, summary, percentages)
            })
            .collect::<Vec<_>>();

        let join = CrossContextD1::join(phase_one.iter().map(|(_, summary, _)| summary))?;
        debug!("All scopes finished phase 1");

        let tables = phase_one
            .par_iter()
            .map(|(tally, summary, percentages)| {
                let normalized = ConfidenceNormalized::compute(summary, percentages, &join)?;
                assemble_table(tally, summary, percentages, &join, &normalized)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let quality = DataQuality::from_tallies(
            coded.unknown_context_rows() as CountType,
            phase_one.iter().map(|(tally, _, _)| tally),
        );
        if self.warn_unclassified && quality.has_unclassified() {
            warn!(
                "{} generated codes are not among the sixteen event codes",
                quality.unclassified_total(Scope::All)
            );
        }
        Ok((tables, quality))
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            parallel:          true,
            warn_unclassified: true,
        }
    }
}

/// Lays out one scope's rows: base codes, summaries, percentages, the
/// cross-context denominators, then the normalized metrics.
fn assemble_table(
    tally: &EventTally,
    summary: &SummaryRows,
    percentages: &Percentages,
    join: &CrossContextD1,
    normalized: &ConfidenceNormalized,
) -> anyhow::Result<ScopeTable> {
    let mut table = ScopeTable::new(tally.scope(), tally.n_replicates());
    for code in EventCode::iter() {
        table.set_count_row(code.as_str(), &tally.code_row(code))?;
    }
    for (label, row) in summary.labeled_rows() {
        table.set_count_row(label, row)?;
    }
    for (label, row) in percentages.labeled_rows() {
        table.set_row(label, row.to_vec())?;
    }
    for (label, row) in join.labeled_rows() {
        table.set_count_row(label, row)?;
    }
    for (label, row) in normalized.labeled_rows() {
        table.set_row(label, row.to_vec())?;
    }
    Ok(table)
}

/// Per-scope audit of rows the tallies could not classify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQuality {
    /// Rows whose context is not CG, CXG or CXX.
    pub unknown_context_rows: CountType,
    /// Unclassified code strings per scope, per replicate.
    pub unclassified:         Vec<(Scope, Vec<CountType>)>,
}

impl DataQuality {
    fn from_tallies<'a>(
        unknown_context_rows: CountType,
        tallies: impl Iterator<Item = &'a EventTally>,
    ) -> Self {
        Self {
            unknown_context_rows,
            unclassified: tallies
                .map(|tally| (tally.scope(), tally.unclassified().to_vec()))
                .collect(),
        }
    }

    pub fn has_unclassified(&self) -> bool {
        self.unclassified
            .iter()
            .any(|(_, row)| row.iter().any(|count| *count > 0))
    }

    pub fn unclassified_row(
        &self,
        scope: Scope,
    ) -> Option<&[CountType]> {
        self.unclassified
            .iter()
            .find(|(s, _)| *s == scope)
            .map(|(_, row)| row.as_slice())
    }

    pub fn unclassified_total(
        &self,
        scope: Scope,
    ) -> CountType {
        self.unclassified_row(scope)
            .map(|row| row.iter().sum())
            .unwrap_or(0)
    }

    /// One row per scope with a `Sequence` column naming the scope and
    /// `R1..RN` counts.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let n_replicates = self
            .unclassified
            .first()
            .map(|(_, row)| row.len())
            .unwrap_or(0);
        let mut columns = vec![Column::from(Series::new(
            LABEL_COL.into(),
            self.unclassified
                .iter()
                .map(|(scope, _)| scope.to_string())
                .collect_vec(),
        ))];
        for replicate in 0..n_replicates {
            columns.push(Column::from(Series::new(
                format!("R{}", replicate + 1).into(),
                self.unclassified
                    .iter()
                    .map(|(_, row)| row[replicate])
                    .collect_vec(),
            )));
        }
        DataFrame::new(columns)
    }
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// The input with `R1..RN` code columns appended.
    pub augmented: DataFrame,
    /// Scope tables in CG, CXG, CXX, Total order.
    pub tables:    Vec<ScopeTable>,
    pub quality:   DataQuality,
}

impl AggregationResult {
    pub fn table(
        &self,
        scope: Scope,
    ) -> Option<&ScopeTable> {
        self.tables.iter().find(|table| table.scope() == scope)
    }
}
