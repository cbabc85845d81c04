//! Target list loading.
//!
//! Each observational cycle is one hand-maintained CSV in the input
//! directory, e.g. `jwst_cycle-1.csv`. The loader reads them in sorted
//! order, skips rogue non-CSV files, assigns the cycle number from the
//! file-name stem, and keeps target order exactly as listed — report rows
//! must come out in input order.

use exoquery_core::{TargetEntry, error::TargetError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One cycle's target list.
#[derive(Debug, Clone)]
pub struct CycleList {
    pub cycle: u32,
    pub path: PathBuf,
    pub targets: Vec<TargetEntry>,
}

impl CycleList {
    /// Planet names to query, deduplicated but in first-seen order. A
    /// planet observed twice in a cycle is queried once; both target rows
    /// still get their own report rows.
    pub fn unique_planet_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.targets
            .iter()
            .filter(|t| seen.insert(t.planet_name.as_str()))
            .map(|t| t.planet_name.clone())
            .collect()
    }
}

/// Load every `*.csv` cycle file in the input directory, sorted by file
/// name.
pub fn load_all(dir: &Path) -> Result<Vec<CycleList>, TargetError> {
    let entries = std::fs::read_dir(dir).map_err(|e| TargetError::ReadError {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut cycles = Vec::new();
    for path in paths {
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            warn!(path = %path.display(), "Skipping non-CSV file in input directory");
            continue;
        }
        cycles.push(load_cycle(&path)?);
    }

    if cycles.is_empty() {
        return Err(TargetError::NoInputFiles {
            path: dir.to_path_buf(),
        });
    }

    Ok(cycles)
}

/// Load one cycle file. The cycle number is the trailing digit run of the
/// file-name stem (`jwst_cycle-1` → 1).
pub fn load_cycle(path: &Path) -> Result<CycleList, TargetError> {
    let cycle = cycle_from_path(path).ok_or_else(|| TargetError::UnknownCycle {
        path: path.to_path_buf(),
    })?;

    let mut reader = csv::Reader::from_path(path).map_err(|e| TargetError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut targets = Vec::new();
    for record in reader.deserialize() {
        let mut target: TargetEntry = record.map_err(|e| TargetError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        target.cycle = cycle;
        targets.push(target);
    }

    info!(
        cycle,
        targets = targets.len(),
        path = %path.display(),
        "Loaded target list"
    );

    Ok(CycleList {
        cycle,
        path: path.to_path_buf(),
        targets,
    })
}

/// Trailing digit run of the file-name stem, if any.
fn cycle_from_path(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let digits: String = stem
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}
