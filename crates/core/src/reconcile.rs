//! Parameter reconciliation.
//!
//! The archive returns zero or more rows per planet, each one published
//! solution with its own subset of parameters. [`reconcile`] collapses them
//! into one [`ReducedRecord`] and one [`FullRecord`] per target,
//! deterministically.
//!
//! Per-field precedence, applied independently for every catalogue field:
//!
//! 1. rows flagged as the archive's default solution win outright;
//! 2. otherwise the row with the smallest combined uncertainty
//!    (upper + lower, missing bounds count as unbounded);
//! 3. ties go to the most recently published source when both candidates
//!    carry a publication date;
//! 4. remaining ties go to the first row in input order.
//!
//! The function is pure and never fails: a planet with no rows, or a field
//! with no values, degrades to explicit "no data" output.

use crate::field::FieldCatalogue;
use crate::record::{FullRecord, ReconciledField, ReducedRecord};
use crate::row::{Measurement, RawRow};
use crate::target::TargetEntry;
use std::collections::BTreeMap;
use tracing::trace;

/// Collapse all archive rows for one target into a reduced and a full
/// record. Both outputs carry an entry for every catalogue field; fields no
/// row has a value for are recorded as `None`.
pub fn reconcile(
    target: &TargetEntry,
    rows: &[RawRow],
    catalogue: &FieldCatalogue,
) -> (ReducedRecord, FullRecord) {
    let mut values = BTreeMap::new();
    let mut fields = BTreeMap::new();

    for spec in catalogue.iter() {
        let chosen = select_field(&spec.name, rows);
        values.insert(spec.name.clone(), chosen.as_ref().map(|f| f.value.clone()));
        fields.insert(spec.name.clone(), chosen);
    }

    (
        ReducedRecord {
            target: target.clone(),
            values,
        },
        FullRecord {
            target: target.clone(),
            fields,
        },
    )
}

/// Select the authoritative measurement for one field across all rows.
fn select_field(field: &str, rows: &[RawRow]) -> Option<ReconciledField> {
    let candidates: Vec<(&RawRow, &Measurement)> = rows
        .iter()
        .filter_map(|row| row.measurement(field).map(|m| (row, m)))
        .collect();

    let (mut best_row, mut best) = *candidates.first()?;

    if candidates.len() > 1 {
        trace!(field, solutions = candidates.len(), "resolving between archive solutions");
        // Only replace on a strict win, so input order is the stable final
        // tie-break.
        for &(row, measurement) in &candidates[1..] {
            if beats((row, measurement), (best_row, best)) {
                best_row = row;
                best = measurement;
            }
        }
    }

    Some(ReconciledField {
        value: best.value.clone(),
        err_upper: best.err_upper,
        err_lower: best.err_lower,
        source: best.source.clone(),
        limit: best.limit,
        solutions: candidates.len(),
    })
}

/// Whether `candidate` strictly beats the `incumbent` under the precedence
/// rules.
fn beats(candidate: (&RawRow, &Measurement), incumbent: (&RawRow, &Measurement)) -> bool {
    let (crow, cm) = candidate;
    let (irow, im) = incumbent;

    // The archive's default solution wins regardless of uncertainty size.
    if crow.default_solution != irow.default_solution {
        return crow.default_solution;
    }

    let cu = cm.combined_uncertainty();
    let iu = im.combined_uncertainty();
    if cu < iu {
        return true;
    }
    if cu > iu {
        return false;
    }

    // Equal combined uncertainty: a newer publication wins, but only when
    // both rows are dated. Undated rows never win this round.
    match (&crow.published, &irow.published) {
        (Some(candidate_date), Some(incumbent_date)) => candidate_date > incumbent_date,
        _ => false,
    }
}
