//! End-to-end integration tests for the exoquery pipeline.
//!
//! These exercise the full load → fetch → reconcile → write flow against a
//! scripted archive, without network access.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use exoquery::pipeline;
use exoquery_config::AppConfig;
use exoquery_core::{
    Archive, ArchiveError, FieldCatalogue, FieldSpec, Measurement, ParamValue, QueryResult, RawRow,
    ValueKind,
};

// ── Mock Archive ─────────────────────────────────────────────────────────

/// A mock archive that returns scripted row sets in sequence.
struct ScriptedArchive {
    responses: Mutex<Vec<Result<Vec<RawRow>, ArchiveError>>>,
}

impl ScriptedArchive {
    fn new(responses: Vec<Result<Vec<RawRow>, ArchiveError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
        }
    }

    fn rows(rows: Vec<RawRow>) -> Self {
        Self::new(vec![Ok(rows)])
    }
}

#[async_trait::async_trait]
impl Archive for ScriptedArchive {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self, planet_names: &[String]) -> Result<QueryResult, ArchiveError> {
        let mut responses = self.responses.lock().unwrap();
        assert!(!responses.is_empty(), "ScriptedArchive exhausted");
        responses
            .remove(0)
            .map(|rows| QueryResult::new(planet_names, rows))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────

const CYCLE_1: &str = "\
planet_name,instrument,disperser,filter,type,num_obs,pid,eap_months
WASP-39 b,NIRSpec,PRISM,CLEAR,transit,1,1366,0
Kepler-1625 b,NIRCam,GRISMR,F322W2,transit,1,1433,12
";

const CYCLE_2: &str = "\
planet_name,instrument,disperser,filter,type,num_obs,pid,eap_months
GJ 1214 b,MIRI,LRS,P750L,eclipse,2,1803,0
";

fn write_input(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn test_config(input: PathBuf, output: PathBuf) -> AppConfig {
    AppConfig {
        input_dir: input,
        output_dir: output,
        fields: vec![
            FieldSpec::identity("host_name", "hostname", ValueKind::Categorical),
            FieldSpec::measured("radius", "pl_rade", "rearth"),
            FieldSpec::measured("mass", "pl_bmasse", "mearth"),
        ],
        ..AppConfig::default()
    }
}

fn wasp39_rows() -> Vec<RawRow> {
    vec![
        // Older solution with tighter mass error bars, not the default.
        RawRow::new("WASP-39 b")
            .with_published("2011-06")
            .with_value("host_name", Measurement::new(ParamValue::from("WASP-39")))
            .with_value(
                "radius",
                Measurement::new(14.1).with_errors(0.5, -0.5).with_source("Faedi et al. 2011"),
            )
            .with_value(
                "mass",
                Measurement::new(88.0).with_errors(1.0, -1.0).with_source("Faedi et al. 2011"),
            ),
        // The archive's default solution.
        RawRow::new("WASP-39 b")
            .with_default_flag(true)
            .with_published("2018-01")
            .with_value("host_name", Measurement::new(ParamValue::from("WASP-39")))
            .with_value(
                "radius",
                Measurement::new(14.34).with_errors(0.17, -0.18).with_source("Mancini et al. 2018"),
            )
            .with_value(
                "mass",
                Measurement::new(89.0).with_errors(5.0, -5.0).with_source("Mancini et al. 2018"),
            ),
    ]
}

// ── E2E: full pipeline ───────────────────────────────────────────────────

#[tokio::test]
async fn e2e_query_writes_all_reports() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_input(input.path(), "jwst_cycle-1.csv", CYCLE_1);

    // Kepler-1625 b is deliberately absent from the archive rows.
    let archive = ScriptedArchive::rows(wasp39_rows());
    let config = test_config(input.path().into(), output.path().into());

    let report = pipeline::run(&archive, &config, None).await.unwrap();
    assert_eq!(report.cycles.len(), 1);
    assert_eq!(report.cycles[0].targets, 2);
    assert_eq!(report.cycles[0].missing, vec!["Kepler-1625 b".to_string()]);

    // Reduced report: default solution wins for every field, even though
    // the 2011 mass has tighter error bars.
    let reduced = std::fs::read_to_string(&report.cycles[0].reduced_path).unwrap();
    let mut lines = reduced.lines();
    let header = lines.next().unwrap();
    assert!(header.ends_with("cycle,host_name,radius_rearth,mass_mearth"));

    let wasp = lines.next().unwrap();
    assert!(wasp.starts_with("WASP-39 b,NIRSpec,PRISM,CLEAR,transit,1,1366,0,1"));
    assert!(wasp.ends_with("WASP-39,14.34,89"));

    // Missing target still gets a row, with empty parameter cells.
    let kepler = lines.next().unwrap();
    assert!(kepler.starts_with("Kepler-1625 b,"));
    assert!(kepler.ends_with(",,,"));

    // Full report agrees with the reduced values and carries provenance.
    let full = std::fs::read_to_string(&report.cycles[0].full_path).unwrap();
    let full_wasp = full.lines().nth(1).unwrap();
    assert!(full_wasp.contains("14.34"));
    assert!(full_wasp.contains("Mancini et al. 2018"));

    // Summary lists both targets with their solution counts.
    let summary = std::fs::read_to_string(&report.summary_path).unwrap();
    assert!(summary.contains("WASP-39 b,1,found,2,"));
    assert!(summary.contains("Kepler-1625 b,1,missing,0,"));
}

#[tokio::test]
async fn e2e_multiple_cycles_combine_sorted_by_planet() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_input(input.path(), "jwst_cycle-1.csv", CYCLE_1);
    write_input(input.path(), "jwst_cycle-2.csv", CYCLE_2);

    let archive = ScriptedArchive::new(vec![
        Ok(wasp39_rows()),
        Ok(vec![
            RawRow::new("GJ 1214 b")
                .with_default_flag(true)
                .with_value("radius", Measurement::new(2.74).with_errors(0.05, -0.05)),
        ]),
    ]);
    let config = test_config(input.path().into(), output.path().into());

    let report = pipeline::run(&archive, &config, None).await.unwrap();
    assert_eq!(report.cycles.len(), 2);

    let combined = std::fs::read_to_string(&report.combined_path).unwrap();
    let names: Vec<&str> = combined
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(names, vec!["GJ 1214 b", "Kepler-1625 b", "WASP-39 b"]);
}

#[tokio::test]
async fn e2e_fetch_failure_degrades_to_no_data() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_input(input.path(), "jwst_cycle-1.csv", CYCLE_1);

    let archive = ScriptedArchive::new(vec![Err(ArchiveError::Network(
        "connection refused".into(),
    ))]);
    let config = test_config(input.path().into(), output.path().into());

    let report = pipeline::run(&archive, &config, None).await.unwrap();
    assert_eq!(report.cycles[0].missing.len(), 2);

    let reduced = std::fs::read_to_string(&report.cycles[0].reduced_path).unwrap();
    // Both targets present, all parameter cells empty.
    assert_eq!(reduced.lines().count(), 3);
    for line in reduced.lines().skip(1) {
        assert!(line.ends_with(",,,"));
    }

    let summary = std::fs::read_to_string(&report.summary_path).unwrap();
    assert!(summary.contains("WASP-39 b,1,missing,0,"));
}

#[tokio::test]
async fn e2e_cycle_filter_selects_one_file() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_input(input.path(), "jwst_cycle-1.csv", CYCLE_1);
    write_input(input.path(), "jwst_cycle-2.csv", CYCLE_2);

    let archive = ScriptedArchive::rows(vec![RawRow::new("GJ 1214 b")
        .with_value("radius", Measurement::new(2.74).with_errors(0.05, -0.05))]);
    let config = test_config(input.path().into(), output.path().into());

    let report = pipeline::run(&archive, &config, Some(2)).await.unwrap();
    assert_eq!(report.cycles.len(), 1);
    assert_eq!(report.cycles[0].cycle, 2);
}

#[tokio::test]
async fn e2e_unknown_cycle_filter_is_an_error() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_input(input.path(), "jwst_cycle-1.csv", CYCLE_1);

    let archive = ScriptedArchive::new(vec![]);
    let config = test_config(input.path().into(), output.path().into());

    assert!(pipeline::run(&archive, &config, Some(7)).await.is_err());
}

#[tokio::test]
async fn e2e_duplicate_targets_query_once_but_report_twice() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_input(
        input.path(),
        "jwst_cycle-1.csv",
        "planet_name,instrument,disperser,filter,type,num_obs,pid,eap_months\n\
         WASP-39 b,NIRSpec,PRISM,CLEAR,transit,1,1366,0\n\
         WASP-39 b,NIRCam,GRISMR,F322W2,eclipse,1,1366,0\n",
    );

    let archive = ScriptedArchive::rows(wasp39_rows());
    let config = test_config(input.path().into(), output.path().into());

    let report = pipeline::run(&archive, &config, None).await.unwrap();
    let reduced = std::fs::read_to_string(&report.cycles[0].reduced_path).unwrap();

    // Two report rows, one per observation, same reconciled radius.
    let rows: Vec<&str> = reduced.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.contains("14.34")));
    assert!(rows[0].contains("PRISM"));
    assert!(rows[1].contains("GRISMR"));
}

#[test]
fn catalogue_in_config_drives_report_columns() {
    // Sanity: the test catalogue produces exactly the columns asserted above.
    let config = test_config(PathBuf::from("in"), PathBuf::from("out"));
    let catalogue: FieldCatalogue = config.catalogue();
    let columns: Vec<String> = catalogue.iter().map(|f| f.report_column()).collect();
    assert_eq!(columns, vec!["host_name", "radius_rearth", "mass_mearth"]);
}
