//! File-to-file pipeline test: CSV record in, catalog CSV out.

use std::io::Write;

use drawlab_core::DrawdownCatalog;
use drawlab_runner::{
    export_catalog_csv, export_summary_json, import_summary_json, load_readings, run_analysis,
    RunSummary,
};

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn worked_record_end_to_end() {
    let input = write_temp("paws\n0\n10\n2\n10\n0\n");
    let readings = load_readings(input.path()).unwrap();
    let run = run_analysis(readings);
    let csv = export_catalog_csv(&run.catalog).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "1,2,10,1,2,3,2,10,8,2,8,0;10;2,draining");
}

#[test]
fn output_is_byte_identical_across_runs() {
    let input = write_temp("paws\n2\n7\n3\n5\n1\n8\n4\n6\n0\n9\n2\n");
    let readings = load_readings(input.path()).unwrap();

    let first = export_catalog_csv(&run_analysis(readings.clone()).catalog).unwrap();
    let second = export_catalog_csv(&run_analysis(readings).catalog).unwrap();
    assert_eq!(first, second);
}

#[test]
fn parallel_evaluation_matches_sequential() {
    let input = write_temp("paws\n2\n7\n3\n5\n1\n8\n4\n6\n0\n9\n2\n");
    let readings = load_readings(input.path()).unwrap();
    let run = run_analysis(readings);
    let sequential = DrawdownCatalog::analyze(&run.series, &run.extrema);
    assert_eq!(run.catalog, sequential);
    assert_eq!(
        export_catalog_csv(&run.catalog).unwrap(),
        export_catalog_csv(&sequential).unwrap()
    );
}

#[test]
fn single_reading_file_yields_empty_output() {
    let input = write_temp("9.99\n");
    let readings = load_readings(input.path()).unwrap();
    let run = run_analysis(readings);
    assert!(run.catalog.is_empty());

    let csv = export_catalog_csv(&run.catalog).unwrap();
    assert_eq!(csv.lines().count(), 1); // header only
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn arb_readings() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(
            prop_oneof![
                2 => Just(0.0),
                8 => (0.0..12.0f64).prop_map(|v| (v * 100.0).round() / 100.0),
            ],
            0..60,
        )
    }

    proptest! {
        /// The parallel run is indistinguishable from the sequential
        /// catalog, all the way down to the exported bytes.
        #[test]
        fn parallel_run_is_sequential(raw in arb_readings()) {
            let run = run_analysis(raw);
            let sequential = DrawdownCatalog::analyze(&run.series, &run.extrema);
            prop_assert_eq!(&run.catalog, &sequential);
            prop_assert_eq!(
                export_catalog_csv(&run.catalog).unwrap(),
                export_catalog_csv(&sequential).unwrap()
            );
        }
    }
}

#[test]
fn summary_artifact_roundtrips_through_disk() {
    let input = write_temp("paws\n5\n1\n4\n2\n3\n0\n6\n");
    let readings = load_readings(input.path()).unwrap();
    let run = run_analysis(readings);
    let summary = RunSummary::from_run(&run);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    std::fs::write(&path, export_summary_json(&summary).unwrap()).unwrap();

    let loaded = import_summary_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, summary);
    assert_eq!(loaded.drawdown_count, 2);
}
