use std::fmt::Display;

use crate::data_structs::enums::Scope;
use crate::data_structs::event::{
    Category,
    EventCode,
};
use crate::data_structs::tally::EventTally;
use crate::data_structs::typedef::CountType;

/// Derived count rows of a scope table, in output order.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum SummaryRow {
    /// All events.
    E,
    Category(Category),
    /// Total of totals across the six categories.
    TTCIE,
    /// Shared denominator: `TTCIE + count(0000)`.
    D1,
}

impl SummaryRow {
    pub const ALL: [SummaryRow; 9] = [
        SummaryRow::E,
        SummaryRow::Category(Category::SpecificEvents),
        SummaryRow::Category(Category::DifferentialMethylation),
        SummaryRow::Category(Category::DifferentialNonMethylation),
        SummaryRow::Category(Category::ConversionErrors),
        SummaryRow::Category(Category::StaticNonMethylated),
        SummaryRow::Category(Category::StaticMethylated),
        SummaryRow::TTCIE,
        SummaryRow::D1,
    ];

    pub const fn suffix(&self) -> &'static str {
        match self {
            SummaryRow::E => "E",
            SummaryRow::Category(category) => category.as_str(),
            SummaryRow::TTCIE => "TTCIE",
            SummaryRow::D1 => "D1",
        }
    }

    pub fn label(
        &self,
        scope: Scope,
    ) -> String {
        scope.label(self.suffix())
    }
}

impl Display for SummaryRow {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// Summary rows of one scope, per replicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRows {
    scope:      Scope,
    all_events: Vec<CountType>,
    /// Indexed like [`Category::ALL`].
    categories: [Vec<CountType>; 6],
    ttcie:      Vec<CountType>,
    d1:         Vec<CountType>,
}

impl SummaryRows {
    /// Sums the base code counts element-wise per replicate.
    ///
    /// Category sums follow the static taxonomy; a code listed in two
    /// categories contributes to both and therefore twice to `TTCIE`.
    pub fn from_tally(tally: &EventTally) -> Self {
        let n = tally.n_replicates();
        let sum_codes = |codes: &mut dyn Iterator<Item = EventCode>| -> Vec<CountType> {
            let mut row = vec![0; n];
            for code in codes {
                for (acc, count) in row.iter_mut().zip(tally.code_row(code)) {
                    *acc += count;
                }
            }
            row
        };

        let all_events = sum_codes(&mut EventCode::iter());
        let categories = Category::ALL.map(|category| sum_codes(&mut category.members()));

        let mut ttcie = vec![0; n];
        for row in categories.iter() {
            for (acc, count) in ttcie.iter_mut().zip(row) {
                *acc += count;
            }
        }

        let zeros = EventCode::parse("0000")
            .map(|code| tally.code_row(code))
            .unwrap_or_else(|| vec![0; n]);
        let d1 = ttcie.iter().zip(zeros).map(|(t, z)| t + z).collect();

        Self {
            scope: tally.scope(),
            all_events,
            categories,
            ttcie,
            d1,
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn n_replicates(&self) -> usize {
        self.all_events.len()
    }

    pub fn row(
        &self,
        row: SummaryRow,
    ) -> &[CountType] {
        match row {
            SummaryRow::E => &self.all_events,
            SummaryRow::Category(category) => self.category(category),
            SummaryRow::TTCIE => &self.ttcie,
            SummaryRow::D1 => &self.d1,
        }
    }

    pub fn category(
        &self,
        category: Category,
    ) -> &[CountType] {
        &self.categories[category.index()]
    }

    pub fn all_events(&self) -> &[CountType] {
        &self.all_events
    }

    pub fn ttcie(&self) -> &[CountType] {
        &self.ttcie
    }

    pub fn d1(&self) -> &[CountType] {
        &self.d1
    }

    /// `(label, values)` pairs in output order.
    pub fn labeled_rows(&self) -> impl Iterator<Item = (String, &[CountType])> + '_ {
        SummaryRow::ALL
            .into_iter()
            .map(|row| (row.label(self.scope), self.row(row)))
    }
}
