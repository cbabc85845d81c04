//! The query pipeline: load target lists, fetch archive rows, reconcile,
//! write reports.
//!
//! Cycles are processed sequentially and report rows always come out in
//! target-list order, so repeated runs over the same input are
//! byte-for-byte reproducible and diff cleanly under version control. A
//! cycle whose fetch fails degrades to all-"no data" records with a
//! warning — one unreachable batch never aborts the run.

use exoquery_config::AppConfig;
use exoquery_core::{Archive, Error, QueryResult, RawRow, reconcile};
use exoquery_reports::{ReportWriter, SummaryEntry};
use exoquery_targets::CycleList;
use std::path::PathBuf;
use tracing::{info, warn};

/// What one cycle produced.
#[derive(Debug)]
pub struct CycleOutcome {
    pub cycle: u32,
    pub targets: usize,
    /// Planets the archive returned no rows for.
    pub missing: Vec<String>,
    pub reduced_path: PathBuf,
    pub full_path: PathBuf,
}

/// What a whole run produced.
#[derive(Debug)]
pub struct PipelineReport {
    pub cycles: Vec<CycleOutcome>,
    pub combined_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Run the pipeline for every cycle file in the input directory, or for a
/// single cycle when `cycle_filter` is set.
pub async fn run(
    archive: &dyn Archive,
    config: &AppConfig,
    cycle_filter: Option<u32>,
) -> Result<PipelineReport, Error> {
    let catalogue = config.catalogue();

    let mut cycles = exoquery_targets::load_all(&config.input_dir)?;
    if let Some(wanted) = cycle_filter {
        cycles.retain(|c| c.cycle == wanted);
        if cycles.is_empty() {
            return Err(Error::Config {
                message: format!("no target list for cycle {wanted} in {}", config.input_dir.display()),
            });
        }
    }

    let writer = ReportWriter::new(&config.output_dir)?;

    let mut outcomes = Vec::new();
    let mut combined = Vec::new();
    let mut summary = Vec::new();

    for cycle in &cycles {
        info!(cycle = cycle.cycle, targets = cycle.targets.len(), "Compiling results");

        let names = cycle.unique_planet_names();
        let result = match archive.fetch(&names).await {
            Ok(result) => result,
            Err(e) => {
                warn!(
                    cycle = cycle.cycle,
                    error = %e,
                    "Archive query failed, continuing with empty result set"
                );
                QueryResult::new(&names, Vec::new())
            }
        };

        let outcome = process_cycle(cycle, &result, &catalogue, &writer, &mut combined, &mut summary)?;
        outcomes.push(outcome);
    }

    let combined_path = writer.write_combined(&combined, &catalogue)?;
    let summary_path = writer.write_summary(&summary)?;

    Ok(PipelineReport {
        cycles: outcomes,
        combined_path,
        summary_path,
    })
}

/// Reconcile every target of one cycle and write its two reports.
fn process_cycle(
    cycle: &CycleList,
    result: &QueryResult,
    catalogue: &exoquery_core::FieldCatalogue,
    writer: &ReportWriter,
    combined: &mut Vec<exoquery_core::ReducedRecord>,
    summary: &mut Vec<SummaryEntry>,
) -> Result<CycleOutcome, Error> {
    let mut reduced_records = Vec::with_capacity(cycle.targets.len());
    let mut full_records = Vec::with_capacity(cycle.targets.len());

    for target in &cycle.targets {
        let rows: Vec<RawRow> = result
            .rows_for(&target.planet_name)
            .into_iter()
            .cloned()
            .collect();

        summary.push(SummaryEntry {
            planet_name: target.planet_name.clone(),
            cycle: cycle.cycle,
            found: !rows.is_empty(),
            solutions: rows.len(),
            fetched_at: result.fetched_at,
        });

        let (reduced, full) = reconcile(target, &rows, catalogue);
        reduced_records.push(reduced);
        full_records.push(full);
    }

    let reduced_path = writer.write_reduced(cycle.cycle, &reduced_records, catalogue)?;
    let full_path = writer.write_full(cycle.cycle, &full_records, catalogue)?;

    combined.extend(reduced_records);

    Ok(CycleOutcome {
        cycle: cycle.cycle,
        targets: cycle.targets.len(),
        missing: result.missing.clone(),
        reduced_path,
        full_path,
    })
}
