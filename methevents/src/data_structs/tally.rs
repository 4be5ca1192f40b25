use log::{
    debug,
    trace,
};
use rayon::prelude::*;

use crate::data_structs::codes::CodedTable;
use crate::data_structs::enums::Scope;
use crate::data_structs::event::EventCode;
use crate::data_structs::typedef::CountType;

/// Counts of the sixteen event codes for one scope, per replicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTally {
    scope:        Scope,
    /// Rows of the input that fall into the scope.
    rows:         CountType,
    /// `counts[replicate - 1][code]`.
    counts:       Vec<[CountType; EventCode::COUNT]>,
    /// Generated strings that matched none of the sixteen codes.
    unclassified: Vec<CountType>,
}

impl EventTally {
    /// Tallies every replicate column of `coded` restricted to `scope`.
    ///
    /// Replicate columns are counted independently on the rayon pool; the
    /// result does not depend on row order.
    pub fn build(
        coded: &CodedTable,
        scope: Scope,
    ) -> Self {
        let in_scope = coded
            .contexts()
            .iter()
            .map(|context| scope.contains(*context))
            .collect::<Vec<bool>>();
        let rows = in_scope.iter().filter(|x| **x).count() as CountType;

        let (counts, unclassified): (Vec<_>, Vec<_>) = coded
            .layout()
            .replicates()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|replicate| {
                let codes = coded.replicate(replicate).unwrap_or_default();
                count_column(codes, &in_scope)
            })
            .unzip();

        let tally = Self {
            scope,
            rows,
            counts,
            unclassified,
        };
        let total_unclassified = tally.unclassified.iter().sum::<CountType>();
        if total_unclassified > 0 {
            debug!(
                "{}: {} generated codes are not event codes and were left out of the tally",
                scope, total_unclassified
            );
        }
        trace!("{}: tallied {} rows", scope, rows);
        tally
    }

    /// An all-zero tally.
    pub fn empty(
        scope: Scope,
        n_replicates: usize,
    ) -> Self {
        Self {
            scope,
            rows: 0,
            counts: vec![[0; EventCode::COUNT]; n_replicates],
            unclassified: vec![0; n_replicates],
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn n_replicates(&self) -> usize {
        self.counts.len()
    }

    /// Number of input rows in the scope.
    pub fn rows(&self) -> CountType {
        self.rows
    }

    /// Count of one code in a 1-based replicate; zero when out of range.
    pub fn count(
        &self,
        code: EventCode,
        replicate: usize,
    ) -> CountType {
        replicate
            .checked_sub(1)
            .and_then(|idx| self.counts.get(idx))
            .map(|column| column[code.index()])
            .unwrap_or(0)
    }

    /// Counts of one code across all replicates.
    pub fn code_row(
        &self,
        code: EventCode,
    ) -> Vec<CountType> {
        self.counts.iter().map(|column| column[code.index()]).collect()
    }

    /// All sixteen counts of a 1-based replicate, in binary code order.
    pub fn column(
        &self,
        replicate: usize,
    ) -> Option<&[CountType; EventCode::COUNT]> {
        replicate.checked_sub(1).and_then(|idx| self.counts.get(idx))
    }

    /// Unclassified strings per replicate.
    pub fn unclassified(&self) -> &[CountType] {
        &self.unclassified
    }
}

fn count_column(
    codes: &[String],
    in_scope: &[bool],
) -> ([CountType; EventCode::COUNT], CountType) {
    let mut counts = [0; EventCode::COUNT];
    let mut unclassified = 0;
    for (code, _) in codes.iter().zip(in_scope).filter(|(_, keep)| **keep) {
        match EventCode::parse(code) {
            Some(event) => counts[event.index()] += 1,
            None => unclassified += 1,
        }
    }
    (counts, unclassified)
}
