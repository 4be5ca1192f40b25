mod common;

use assert_approx_eq::assert_approx_eq;
use common::{
    same_float,
    worked_example,
    DemoInputBuilder,
    DemoRow,
};
use itertools::Itertools;
use methevents::prelude::*;
use rstest::{
    fixture,
    rstest,
};

const CG: Scope = Scope::Context(Context::CG);
const CXG: Scope = Scope::Context(Context::CXG);
const CXX: Scope = Scope::Context(Context::CXX);

#[fixture]
fn random_input() -> DemoInputBuilder {
    DemoInputBuilder::random(3, 500, 42, 37)
}

fn run(input: &DemoInputBuilder) -> AggregationResult {
    AggregationConfig::default()
        .run(&input.build_table())
        .unwrap()
}

#[test]
fn worked_example_counts() {
    let result = run(&worked_example());

    let cg = result.table(CG).unwrap();
    assert_eq!(cg.get("0000", 1), Some(2.0));
    assert_eq!(cg.get("0110", 1), Some(0.0));
    assert_eq!(cg.get("CG_TTCIE", 1), Some(0.0));
    assert_eq!(cg.get("CG_D1", 1), Some(2.0));
    assert_eq!(cg.get("CG_DMV", 1), Some(0.0));

    let cxg = result.table(CXG).unwrap();
    assert_eq!(cxg.get("0110", 1), Some(1.0));
    assert_eq!(cxg.get("CXG_DME", 1), Some(1.0));
    // 0110 is both a specific and a differential methylation event.
    assert_eq!(cxg.get("CXG_SE", 1), Some(1.0));
    assert_eq!(cxg.get("CXG_TTCIE", 1), Some(2.0));
    assert_eq!(cxg.get("CXG_D1", 1), Some(2.0));
    assert_approx_eq!(cxg.get("CXG_DMV", 1).unwrap(), 50.0);

    let cxx = result.table(CXX).unwrap();
    assert_eq!(cxx.get("CXX_DNME", 1), Some(1.0));
    assert_eq!(cxx.get("CXX_D1", 1), Some(2.0));
    assert_approx_eq!(cxx.get("CXX_DNMV", 1).unwrap(), 50.0);

    let total = result.table(Scope::All).unwrap();
    assert_eq!(total.get("E", 1), Some(4.0));
    assert_eq!(total.get("TTCIE", 1), Some(4.0));
    assert_eq!(total.get("D1", 1), Some(6.0));
    assert_approx_eq!(total.get("DMV", 1).unwrap(), 100.0 / 6.0);
    assert_approx_eq!(total.get("SV", 1).unwrap(), 100.0 / 3.0);
}

#[test]
fn worked_example_cross_context_rows() {
    let result = run(&worked_example());

    for table in result.tables.iter() {
        assert_eq!(table.get("CXX_D1", 1), Some(2.0));
        assert_eq!(table.get("CG_D1", 1), Some(2.0));
        assert_eq!(table.get("CXG_D1", 1), Some(2.0));
        assert_eq!(table.get("D1", 1), Some(6.0));

        for label in ["CXX_D1", "CG_D1", "CXG_D1", "D1"] {
            let occurrences = table.labels().iter().filter(|l| *l == label).count();
            assert_eq!(occurrences, 1, "{} in {}", label, table.scope());
        }
        // 16 codes, 9 summaries, 5 percentages, 3 foreign D1 rows, 6 metrics.
        assert_eq!(table.n_rows(), 39);
    }
}

#[test]
fn row_order_of_scope_table() {
    let result = run(&worked_example());
    let cg = result.table(CG).unwrap();
    let labels = cg.labels().iter().map(String::as_str).collect_vec();

    assert_eq!(&labels[..16], &EVENTS[..]);
    assert_eq!(&labels[16..25], &[
        "CG_E", "CG_SE", "CG_DME", "CG_DNME", "CG_CE", "CG_SNMSs", "CG_SMSs", "CG_TTCIE",
        "CG_D1"
    ]);
    assert_eq!(&labels[25..30], &[
        "CG_DMV", "CG_DNMV", "CG_SV", "CG_CV", "CG_TTCIV"
    ]);
    assert_eq!(&labels[30..33], &["CXX_D1", "CXG_D1", "D1"]);
    assert_eq!(&labels[33..], &[
        "CG_SUM",
        "CG_CV_multiplier",
        "CG_SV_CN",
        "CG_DMV_CN",
        "CG_DNMV_CN",
        "CG_dMET_CN"
    ]);
}

#[test]
fn empty_scope_yields_zero_counts_and_nan() {
    let input = DemoInputBuilder::new(2)
        .row("CG", &["0110", "0111"])
        .row("CG", &["1001", "1000"]);
    let result = run(&input);

    let cxg = result.table(CXG).unwrap();
    for code in EVENTS {
        assert_eq!(cxg.row(code).unwrap(), &[0.0, 0.0]);
    }
    assert_eq!(cxg.row("CXG_D1").unwrap(), &[0.0, 0.0]);
    for label in ["CXG_DMV", "CXG_SV", "CXG_TTCIV", "CXG_CV_multiplier", "CXG_dMET_CN"] {
        assert!(
            cxg.row(label).unwrap().iter().all(|v| v.is_nan()),
            "{} should be NaN",
            label
        );
    }
    // Other scopes are unaffected.
    let cg = result.table(CG).unwrap();
    assert!(cg.get("CG_DMV", 1).unwrap().is_finite());
}

#[test]
fn zero_signal_gives_nan_multiplier() {
    // 0011 and 1100 are static sites only: SUM is 0 while E and D1 are not.
    let input = DemoInputBuilder::new(1)
        .row("CG", &["0011"])
        .row("CG", &["1100"]);
    let result = run(&input);
    let cg = result.table(CG).unwrap();

    assert_eq!(cg.get("CG_SUM", 1), Some(0.0));
    assert!(cg.get("CG_CV_multiplier", 1).unwrap().is_nan());
    assert!(!cg.get("CG_CV_multiplier", 1).unwrap().is_infinite());
    assert!(cg.get("CG_SV_CN", 1).unwrap().is_nan());
}

#[test]
fn conversion_error_correction() {
    // CE = 1, SE = 1, DME = 1: E = 3, TTCIE = 3, D1 = 4.
    let input = DemoInputBuilder::new(1)
        .row("CXX", &["0100"])
        .row("CXX", &["0110"])
        .row("CXX", &["0000"]);
    let result = run(&input);
    let cxx = result.table(CXX).unwrap();

    let d1 = 4.0;
    assert_eq!(cxx.get("CXX_D1", 1), Some(d1));
    let dmv = 100.0 / d1;
    let sv = 100.0 / d1;
    let cv = 100.0 / d1;
    let multiplier = cv / (sv + dmv);
    assert_approx_eq!(cxx.get("CXX_SUM", 1).unwrap(), sv + dmv);
    assert_approx_eq!(cxx.get("CXX_CV_multiplier", 1).unwrap(), multiplier);
    assert_approx_eq!(
        cxx.get("CXX_DMV_CN", 1).unwrap(),
        dmv + dmv * multiplier / 3.0
    );
    assert_approx_eq!(cxx.get("CXX_DNMV_CN", 1).unwrap(), 0.0);
    assert_approx_eq!(
        cxx.get("CXX_dMET_CN", 1).unwrap(),
        -(dmv + dmv * multiplier / 3.0)
    );
}

#[rstest]
fn dmet_is_difference_of_corrected_metrics(random_input: DemoInputBuilder) {
    let result = run(&random_input);
    for table in result.tables.iter() {
        let scope = table.scope();
        for r in 1..=table.n_replicates() {
            let dnmv = table.get(&scope.label("DNMV_CN"), r).unwrap();
            let dmv = table.get(&scope.label("DMV_CN"), r).unwrap();
            let dmet = table.get(&scope.label("dMET_CN"), r).unwrap();
            if dnmv.is_finite() && dmv.is_finite() {
                assert_eq!(dmet, dnmv - dmv);
            }
        }
    }
}

#[rstest]
fn summaries_follow_taxonomy(random_input: DemoInputBuilder) {
    let result = run(&random_input);
    for table in result.tables.iter() {
        let scope = table.scope();
        for r in 1..=table.n_replicates() {
            let category_sum: f64 = Category::ALL
                .iter()
                .map(|c| table.get(&scope.label(c.as_str()), r).unwrap())
                .sum();
            let ttcie = table.get(&scope.label("TTCIE"), r).unwrap();
            assert_eq!(ttcie, category_sum);
            let zeros = table.get("0000", r).unwrap();
            assert_eq!(table.get(&scope.label("D1"), r).unwrap(), ttcie + zeros);

            let events: f64 = EVENTS.iter().map(|c| table.get(c, r).unwrap()).sum();
            assert_eq!(table.get(&scope.label("E"), r).unwrap(), events);
        }
    }
}

#[rstest]
fn parallel_and_sequential_agree(random_input: DemoInputBuilder) {
    let table = random_input.build_table();
    let parallel = AggregationConfig::default().run(&table).unwrap();
    let sequential = AggregationConfig::default()
        .with_parallel(false)
        .run(&table)
        .unwrap();

    assert_eq!(parallel.tables, sequential.tables);
    assert_eq!(parallel.quality, sequential.quality);
    assert_eq!(parallel.augmented, sequential.augmented);
}

#[rstest]
fn repeated_runs_are_identical(random_input: DemoInputBuilder) {
    let table = random_input.build_table();
    let config = AggregationConfig::default();
    let first = config.run(&table).unwrap();
    let second = config.run(&table).unwrap();
    assert_eq!(first.tables, second.tables);
}

#[rstest]
fn row_order_does_not_matter(random_input: DemoInputBuilder) {
    let forward = run(&random_input);

    let mut reversed = DemoInputBuilder::new(3);
    for row in random_input.rows().iter().rev() {
        reversed = reversed.push(row.clone());
    }
    let backward = run(&reversed);

    assert_eq!(forward.tables, backward.tables);
}

#[test]
fn unknown_context_counts_only_in_total() {
    let input = DemoInputBuilder::new(1)
        .row("CG", &["0110"])
        .row("chh", &["0110"])
        .row(" cxg ", &["1001"])
        .row("cg", &["0000"]);
    let result = run(&input);

    assert_eq!(result.quality.unknown_context_rows, 3);
    assert_eq!(result.table(CG).unwrap().get("0110", 1), Some(1.0));
    assert_eq!(result.table(CG).unwrap().get("0000", 1), Some(0.0));
    assert_eq!(result.table(CG).unwrap().get("CG_E", 1), Some(1.0));
    assert_eq!(result.table(CXG).unwrap().get("1001", 1), Some(0.0));
    assert_eq!(result.table(CXG).unwrap().get("CXG_E", 1), Some(0.0));
    assert_eq!(result.table(CXX).unwrap().get("0110", 1), Some(0.0));
    assert_eq!(result.table(Scope::All).unwrap().get("0110", 1), Some(2.0));
    assert_eq!(result.table(Scope::All).unwrap().get("1001", 1), Some(1.0));
    assert_eq!(result.table(Scope::All).unwrap().get("0000", 1), Some(1.0));
    assert_eq!(result.table(Scope::All).unwrap().get("E", 1), Some(4.0));
}

#[test]
fn unclassified_codes_are_audited() {
    let bad = DemoRow {
        context: "CG".to_string(),
        da:      "0".to_string(),
        a:       vec!["2".to_string(), "1".to_string()],
        dk:      "0".to_string(),
        k:       vec!["1".to_string(), "".to_string()],
    };
    let input = DemoInputBuilder::new(2)
        .row("CG", &["0110", "0011"])
        .push(bad)
        .row("CXX", &["1001", "1000"]);
    let result = run(&input);

    assert_eq!(result.quality.unclassified_row(CG), Some(&[1, 1][..]));
    assert_eq!(result.quality.unclassified_row(CXX), Some(&[0, 0][..]));
    assert_eq!(result.quality.unclassified_row(Scope::All), Some(&[1, 1][..]));
    assert_eq!(result.quality.unclassified_total(Scope::All), 2);
    assert!(result.quality.has_unclassified());

    // Base counts of a replicate sum to rows in scope minus unclassified.
    let cg = result.table(CG).unwrap();
    for r in 1..=2 {
        let counted: f64 = EVENTS.iter().map(|c| cg.get(c, r).unwrap()).sum();
        assert_eq!(counted, 1.0);
    }
}

#[test]
fn augmented_table_has_code_columns() {
    let result = run(&worked_example());
    let names = result
        .augmented
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect_vec();
    assert_eq!(names, vec!["MethylType", "Da", "A_R1", "Dk", "K_R1", "R1"]);

    let codes = result
        .augmented
        .column("R1")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect_vec();
    assert_eq!(codes, vec!["0000", "0000", "0110", "1001"]);
}

#[test]
fn numeric_and_text_symbols_agree() {
    let input = DemoInputBuilder::new(1).push(DemoRow {
        context: "CG".to_string(),
        da:      "0.0".to_string(),
        a:       vec![" 1".to_string()],
        dk:      "1.0".to_string(),
        k:       vec!["0".to_string()],
    });
    let result = run(&input);
    assert_eq!(result.table(CG).unwrap().get("0110", 1), Some(1.0));
    assert!(!result.quality.has_unclassified());
}

#[test]
fn schema_mismatch_is_typed() {
    let frame = DemoInputBuilder::new(2)
        .row("CG", &["0000", "0000"])
        .build_frame()
        .drop("sample_k2")
        .unwrap();
    let err = InputTable::try_new(frame).unwrap_err();
    match err.downcast_ref::<MethEventError>() {
        Some(MethEventError::SchemaMismatch { columns, .. }) => assert_eq!(*columns, 6),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn config_from_json_keeps_defaults() {
    let config = AggregationConfig::from_json(r#"{"parallel": false}"#.as_bytes()).unwrap();
    assert_eq!(
        config,
        AggregationConfig::default()
            .with_parallel(false)
            .with_warn_unclassified(true)
    );
    assert!(AggregationConfig::from_json(r#"{"parallel": "yes"}"#.as_bytes()).is_err());
}

#[test]
fn nan_cells_compare_equal_across_runs() {
    let result = run(&worked_example());
    let again = run(&worked_example());
    let cg = result.table(CG).unwrap();
    let cg_again = again.table(CG).unwrap();
    for ((la, va), (lb, vb)) in cg.iter().zip(cg_again.iter()) {
        assert_eq!(la, lb);
        assert!(va.iter().zip(vb).all(|(a, b)| same_float(*a, *b)));
    }
}
