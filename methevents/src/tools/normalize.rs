//! Percentage metrics relative to the shared denominator `D1` (phase 1) and
//! the confidence-normalized metrics computed after every scope's `D1` is
//! known (phase 2).
//!
//! All divisions go through [`safe_div`], so a zero denominator leaves NaN in
//! the affected replicate and the NaN flows through later formulas.

use hashbrown::HashMap;
use itertools::{
    izip,
    Itertools,
};
use log::debug;

use crate::data_structs::enums::{
    Context,
    Scope,
};
use crate::data_structs::event::Category;
use crate::data_structs::summary::SummaryRows;
use crate::data_structs::typedef::{
    CountType,
    MetricType,
};
use crate::error::MethEventError;
use crate::utils::{
    percent,
    safe_div,
};

fn as_metric(row: &[CountType]) -> Vec<MetricType> {
    row.iter().map(|v| *v as MetricType).collect()
}

/// Phase 1: percentages of one scope relative to its own `D1`.
#[derive(Debug, Clone)]
pub struct Percentages {
    scope: Scope,
    pub dmv:   Vec<MetricType>,
    pub dnmv:  Vec<MetricType>,
    pub sv:    Vec<MetricType>,
    pub cv:    Vec<MetricType>,
    pub ttciv: Vec<MetricType>,
}

impl Percentages {
    pub fn from_summary(summary: &SummaryRows) -> Self {
        let d1 = as_metric(summary.d1());
        let relative = |row: &[CountType]| -> Vec<MetricType> {
            row.iter()
                .zip(d1.iter())
                .map(|(num, den)| percent(*num as MetricType, *den))
                .collect()
        };

        Self {
            scope: summary.scope(),
            dmv:   relative(summary.category(Category::DifferentialMethylation)),
            dnmv:  relative(summary.category(Category::DifferentialNonMethylation)),
            sv:    relative(summary.category(Category::SpecificEvents)),
            cv:    relative(summary.category(Category::ConversionErrors)),
            ttciv: relative(summary.ttcie()),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// `(label, values)` pairs in output order.
    pub fn labeled_rows(&self) -> [(String, &[MetricType]); 5] {
        [
            (self.scope.label("DMV"), self.dmv.as_slice()),
            (self.scope.label("DNMV"), self.dnmv.as_slice()),
            (self.scope.label("SV"), self.sv.as_slice()),
            (self.scope.label("CV"), self.cv.as_slice()),
            (self.scope.label("TTCIV"), self.ttciv.as_slice()),
        ]
    }
}

/// Every scope's `D1` row, complete and read-only.
///
/// Built once all four scopes have finished phase 1; phase 2 of any scope
/// only starts from a value of this type.
#[derive(Debug, Clone)]
pub struct CrossContextD1 {
    rows: HashMap<Scope, Vec<CountType>>,
}

impl CrossContextD1 {
    /// Order in which the rows are attached to every scope table.
    pub const ATTACH_ORDER: [Scope; 4] = [
        Scope::Context(Context::CXX),
        Scope::Context(Context::CG),
        Scope::Context(Context::CXG),
        Scope::All,
    ];

    /// Joins the summaries of all scopes. Fails if any of CG, CXG, CXX or the
    /// pooled scope is missing.
    pub fn join<'a>(
        summaries: impl IntoIterator<Item = &'a SummaryRows>
    ) -> Result<Self, MethEventError> {
        let rows = summaries
            .into_iter()
            .map(|summary| (summary.scope(), summary.d1().to_vec()))
            .collect::<HashMap<_, _>>();
        let missing = Scope::ALL
            .into_iter()
            .filter(|scope| !rows.contains_key(scope))
            .collect_vec();
        if !missing.is_empty() {
            return Err(MethEventError::IncompleteBarrier { missing });
        }
        debug!("Cross-context join complete for {} scopes", rows.len());
        Ok(Self { rows })
    }

    pub fn get(
        &self,
        scope: Scope,
    ) -> &[CountType] {
        self.rows
            .get(&scope)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `(label, values)` pairs: `CXX_D1`, `CG_D1`, `CXG_D1`, `D1`.
    pub fn labeled_rows(&self) -> impl Iterator<Item = (String, &[CountType])> + '_ {
        Self::ATTACH_ORDER
            .into_iter()
            .map(|scope| (scope.label("D1"), self.get(scope)))
    }
}

/// Phase 2: conversion-error corrected metrics of one scope.
#[derive(Debug, Clone)]
pub struct ConfidenceNormalized {
    scope: Scope,
    pub sum:           Vec<MetricType>,
    pub cv_multiplier: Vec<MetricType>,
    pub sv_cn:         Vec<MetricType>,
    pub dmv_cn:        Vec<MetricType>,
    pub dnmv_cn:       Vec<MetricType>,
    pub dmet_cn:       Vec<MetricType>,
}

impl ConfidenceNormalized {
    /// Inflates each signal percentage by its share of the conversion error,
    /// scaled down by the scope's total event count `E`.
    ///
    /// Takes the completed join so it cannot run before every scope has its
    /// `D1`. Fails if the join's `D1` for this scope is not the one the
    /// percentages were computed from.
    pub fn compute(
        summary: &SummaryRows,
        percentages: &Percentages,
        join: &CrossContextD1,
    ) -> anyhow::Result<Self> {
        let scope = summary.scope();
        if join.get(scope) != summary.d1() || percentages.scope() != scope {
            anyhow::bail!(
                "cross-context D1 of scope {} does not match its phase 1 summary",
                scope
            );
        }
        let events = as_metric(summary.all_events());

        let sum = izip!(&percentages.sv, &percentages.dmv, &percentages.dnmv)
            .map(|(sv, dmv, dnmv)| sv + dmv + dnmv)
            .collect_vec();
        let cv_multiplier = percentages
            .cv
            .iter()
            .zip(sum.iter())
            .map(|(cv, sum)| safe_div(*cv, *sum))
            .collect_vec();
        let corrected = |metric: &[MetricType]| -> Vec<MetricType> {
            izip!(metric, &cv_multiplier, &events)
                .map(|(value, mult, e)| value + safe_div(value * mult, *e))
                .collect()
        };

        let sv_cn = corrected(&percentages.sv);
        let dmv_cn = corrected(&percentages.dmv);
        let dnmv_cn = corrected(&percentages.dnmv);
        let dmet_cn = dnmv_cn
            .iter()
            .zip(dmv_cn.iter())
            .map(|(dnmv, dmv)| dnmv - dmv)
            .collect();

        Ok(Self {
            scope,
            sum,
            cv_multiplier,
            sv_cn,
            dmv_cn,
            dnmv_cn,
            dmet_cn,
        })
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// `(label, values)` pairs in output order.
    pub fn labeled_rows(&self) -> [(String, &[MetricType]); 6] {
        [
            (self.scope.label("SUM"), self.sum.as_slice()),
            (self.scope.label("CV_multiplier"), self.cv_multiplier.as_slice()),
            (self.scope.label("SV_CN"), self.sv_cn.as_slice()),
            (self.scope.label("DMV_CN"), self.dmv_cn.as_slice()),
            (self.scope.label("DNMV_CN"), self.dnmv_cn.as_slice()),
            (self.scope.label("dMET_CN"), self.dmet_cn.as_slice()),
        ]
    }
}
