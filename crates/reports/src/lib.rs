//! CSV report writing.
//!
//! Two reports per cycle: a reduced best-value table and a full audit
//! trail with uncertainties, sources, limit flags, and solution counts.
//! After all cycles, a combined reduced table sorted by planet name and a
//! per-run query summary.
//!
//! "No data" is always an empty cell — never zero — so a legitimate zero
//! value stays distinguishable from a missing one.

use chrono::{DateTime, Utc};
use exoquery_core::{FieldCatalogue, FullRecord, ReducedRecord, error::ReportError};
use std::path::{Path, PathBuf};
use tracing::info;

/// One line of the per-run query summary.
#[derive(Debug, Clone)]
pub struct SummaryEntry {
    pub planet_name: String,
    pub cycle: u32,
    /// Whether the archive returned any rows for this planet.
    pub found: bool,
    /// Number of solution rows the archive returned.
    pub solutions: usize,
    pub fetched_at: DateTime<Utc>,
}

/// Writes all report files under one output directory.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Create the writer, making the output directory tree as needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let output_dir = output_dir.into();
        for dir in [output_dir.clone(), output_dir.join("full")] {
            std::fs::create_dir_all(&dir).map_err(|e| ReportError::CreateDirError {
                path: dir.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(Self { output_dir })
    }

    /// Write one cycle's reduced report. Returns the file path.
    pub fn write_reduced(
        &self,
        cycle: u32,
        records: &[ReducedRecord],
        catalogue: &FieldCatalogue,
    ) -> Result<PathBuf, ReportError> {
        let path = self.output_dir.join(format!("targets_cycle-{cycle}.csv"));
        write_reduced_rows(&path, records.iter(), catalogue)?;
        info!(cycle, records = records.len(), path = %path.display(), "Wrote reduced report");
        Ok(path)
    }

    /// Write one cycle's full audit-trail report. Returns the file path.
    pub fn write_full(
        &self,
        cycle: u32,
        records: &[FullRecord],
        catalogue: &FieldCatalogue,
    ) -> Result<PathBuf, ReportError> {
        let path = self
            .output_dir
            .join("full")
            .join(format!("targets_full_cycle-{cycle}.csv"));

        let mut writer = open(&path)?;
        let mut headers = campaign_headers();
        for field in catalogue.iter() {
            headers.push(field.report_column());
            if field.measured {
                headers.push(format!("{}_errpos", field.name));
                headers.push(format!("{}_errneg", field.name));
                headers.push(format!("{}_ref", field.name));
                headers.push(format!("{}_lim", field.name));
                headers.push(format!("{}_nsol", field.name));
            }
        }
        write_record(&mut writer, &path, &headers)?;

        for record in records {
            let mut cells: Vec<String> = record.target.report_cells().to_vec();
            for field in catalogue.iter() {
                let chosen = record.field(&field.name);
                cells.push(
                    chosen
                        .map(|f| f.value.to_cell())
                        .unwrap_or_default(),
                );
                if field.measured {
                    cells.push(optional_number(chosen.and_then(|f| f.err_upper)));
                    cells.push(optional_number(chosen.and_then(|f| f.err_lower)));
                    cells.push(
                        chosen
                            .and_then(|f| f.source.clone())
                            .unwrap_or_default(),
                    );
                    cells.push(match chosen {
                        Some(f) if f.limit => "1".to_string(),
                        Some(_) => "0".to_string(),
                        None => String::new(),
                    });
                    cells.push(
                        chosen
                            .map(|f| f.solutions.to_string())
                            .unwrap_or_default(),
                    );
                }
            }
            write_record(&mut writer, &path, &cells)?;
        }

        flush(writer, &path)?;
        info!(cycle, records = records.len(), path = %path.display(), "Wrote full report");
        Ok(path)
    }

    /// Write the combined reduced report over all cycles, sorted by planet
    /// name. Returns the file path.
    pub fn write_combined(
        &self,
        records: &[ReducedRecord],
        catalogue: &FieldCatalogue,
    ) -> Result<PathBuf, ReportError> {
        let mut sorted: Vec<&ReducedRecord> = records.iter().collect();
        sorted.sort_by(|a, b| {
            a.target
                .planet_name
                .cmp(&b.target.planet_name)
                .then(a.target.cycle.cmp(&b.target.cycle))
        });

        let path = self.output_dir.join("targets_all.csv");
        write_reduced_rows(&path, sorted.into_iter(), catalogue)?;
        info!(records = records.len(), path = %path.display(), "Wrote combined report");
        Ok(path)
    }

    /// Write the per-run query summary. Returns the file path.
    pub fn write_summary(&self, entries: &[SummaryEntry]) -> Result<PathBuf, ReportError> {
        let path = self.output_dir.join("query_summary.csv");
        let mut writer = open(&path)?;
        write_record(
            &mut writer,
            &path,
            &["planet_name", "cycle", "status", "solutions", "fetched_at"],
        )?;
        for entry in entries {
            write_record(
                &mut writer,
                &path,
                &[
                    entry.planet_name.clone(),
                    entry.cycle.to_string(),
                    if entry.found { "found" } else { "missing" }.to_string(),
                    entry.solutions.to_string(),
                    entry.fetched_at.to_rfc3339(),
                ],
            )?;
        }
        flush(writer, &path)?;
        Ok(path)
    }
}

fn campaign_headers() -> Vec<String> {
    exoquery_core::TargetEntry::report_headers()
        .iter()
        .map(|h| h.to_string())
        .collect()
}

fn write_reduced_rows<'a>(
    path: &Path,
    records: impl Iterator<Item = &'a ReducedRecord>,
    catalogue: &FieldCatalogue,
) -> Result<(), ReportError> {
    let mut writer = open(path)?;

    let mut headers = campaign_headers();
    headers.extend(catalogue.iter().map(|f| f.report_column()));
    write_record(&mut writer, path, &headers)?;

    for record in records {
        let mut cells: Vec<String> = record.target.report_cells().to_vec();
        for field in catalogue.iter() {
            cells.push(
                record
                    .value(&field.name)
                    .map(|v| v.to_cell())
                    .unwrap_or_default(),
            );
        }
        write_record(&mut writer, path, &cells)?;
    }

    flush(writer, path)
}

fn optional_number(value: Option<f64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

fn open(path: &Path) -> Result<csv::Writer<std::fs::File>, ReportError> {
    csv::Writer::from_path(path).map_err(|e| ReportError::WriteError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn write_record<W: std::io::Write, S: AsRef<[u8]>>(
    writer: &mut csv::Writer<W>,
    path: &Path,
    record: &[S],
) -> Result<(), ReportError> {
    writer.write_record(record).map_err(|e| ReportError::WriteError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn flush<W: std::io::Write>(mut writer: csv::Writer<W>, path: &Path) -> Result<(), ReportError> {
    writer.flush().map_err(|e| ReportError::WriteError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use exoquery_core::{
        FieldCatalogue, FieldSpec, Measurement, RawRow, TargetEntry, ValueKind, reconcile,
    };

    fn catalogue() -> FieldCatalogue {
        FieldCatalogue {
            fields: vec![
                FieldSpec::identity("host_name", "hostname", ValueKind::Categorical),
                FieldSpec::measured("radius", "pl_rade", "rearth"),
            ],
        }
    }

    fn target(name: &str, cycle: u32) -> TargetEntry {
        let mut target = TargetEntry::new(name, "NIRSpec", "PRISM", "CLEAR");
        target.cycle = cycle;
        target
    }

    fn records_for(
        name: &str,
        cycle: u32,
        rows: &[RawRow],
    ) -> (ReducedRecord, FullRecord) {
        reconcile(&target(name, cycle), rows, &catalogue())
    }

    #[test]
    fn reduced_report_has_header_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();

        let rows = vec![
            RawRow::new("WASP-39 b")
                .with_default_flag(true)
                .with_value("host_name", Measurement::new(exoquery_core::ParamValue::from("WASP-39")))
                .with_value("radius", Measurement::new(14.34).with_errors(0.17, -0.18)),
        ];
        let (reduced, _) = records_for("WASP-39 b", 1, &rows);

        let path = writer.write_reduced(1, &[reduced], &catalogue()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("planet_name,instrument,disperser,filter"));
        assert!(header.ends_with("host_name,radius_rearth"));

        let row = lines.next().unwrap();
        assert!(row.starts_with("WASP-39 b,NIRSpec,PRISM,CLEAR"));
        assert!(row.ends_with("WASP-39,14.34"));
    }

    #[test]
    fn no_data_renders_as_empty_cell_not_zero() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();

        let (reduced, _) = records_for("Kepler-1625 b", 2, &[]);
        let path = writer.write_reduced(2, &[reduced], &catalogue()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        let row = content.lines().nth(1).unwrap();
        assert!(row.ends_with(",,"));
        assert!(!row.contains(",0,"));
    }

    #[test]
    fn full_report_carries_provenance_columns() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();

        let rows = vec![
            RawRow::new("WASP-39 b").with_value(
                "radius",
                Measurement::new(14.34)
                    .with_errors(0.17, -0.18)
                    .with_source("Mancini et al. 2018"),
            ),
            RawRow::new("WASP-39 b").with_value(
                "radius",
                Measurement::new(14.1).with_errors(0.5, -0.5).with_source("Faedi et al. 2011"),
            ),
        ];
        let (_, full) = records_for("WASP-39 b", 1, &rows);

        let path = writer.write_full(1, &[full], &catalogue()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        let header = content.lines().next().unwrap();
        assert!(header.contains("radius_rearth"));
        assert!(header.contains("radius_errpos"));
        assert!(header.contains("radius_errneg"));
        assert!(header.contains("radius_ref"));
        assert!(header.contains("radius_lim"));
        assert!(header.contains("radius_nsol"));

        let row = content.lines().nth(1).unwrap();
        assert!(row.contains("14.34"));
        assert!(row.contains("Mancini et al. 2018"));
        // Two rows contributed a radius.
        assert!(row.ends_with(",2"));
    }

    #[test]
    fn full_report_is_under_full_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();
        let (_, full) = records_for("GJ 1214 b", 3, &[]);
        let path = writer.write_full(3, &[full], &catalogue()).unwrap();
        assert!(path.starts_with(dir.path().join("full")));
        assert!(path.ends_with("targets_full_cycle-3.csv"));
    }

    #[test]
    fn combined_report_sorts_by_planet_name() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();

        let (second, _) = records_for("WASP-39 b", 1, &[]);
        let (first, _) = records_for("GJ 1214 b", 2, &[]);

        let path = writer
            .write_combined(&[second, first], &catalogue())
            .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let names: Vec<&str> = content
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(names, vec!["GJ 1214 b", "WASP-39 b"]);
    }

    #[test]
    fn summary_lists_found_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();

        let now = Utc::now();
        let entries = vec![
            SummaryEntry {
                planet_name: "WASP-39 b".into(),
                cycle: 1,
                found: true,
                solutions: 4,
                fetched_at: now,
            },
            SummaryEntry {
                planet_name: "Kepler-1625 b".into(),
                cycle: 1,
                found: false,
                solutions: 0,
                fetched_at: now,
            },
        ];

        let path = writer.write_summary(&entries).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("WASP-39 b,1,found,4,"));
        assert!(content.contains("Kepler-1625 b,1,missing,0,"));
    }
}
