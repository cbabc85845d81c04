//! Reconciled output records.
//!
//! For every target the reconciler produces a [`ReducedRecord`] (best value
//! per field, no provenance) and a [`FullRecord`] (value + uncertainty +
//! source + solution count per field). Both carry an entry for *every*
//! catalogue field; `None` is the explicit "no data" marker and is rendered
//! as an empty cell, never as zero.

use crate::row::ParamValue;
use crate::target::TargetEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The chosen value for one field of one planet, with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledField {
    pub value: ParamValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err_upper: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err_lower: Option<f64>,

    /// Source publication of the chosen row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Whether the chosen value is an archive limit, not a detection.
    #[serde(default)]
    pub limit: bool,

    /// How many archive rows contained a non-null value for this field.
    pub solutions: usize,
}

/// One planet's best-value row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedRecord {
    pub target: TargetEntry,

    /// Field name → best value, `None` = no data.
    pub values: BTreeMap<String, Option<ParamValue>>,
}

impl ReducedRecord {
    /// The best value for a field, if any row carried one.
    pub fn value(&self, field: &str) -> Option<&ParamValue> {
        self.values.get(field).and_then(|v| v.as_ref())
    }

    /// True when no field has data (planet not found in the archive).
    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.is_none())
    }
}

/// One planet's audit-trail row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullRecord {
    pub target: TargetEntry,

    /// Field name → chosen measurement with provenance, `None` = no data.
    pub fields: BTreeMap<String, Option<ReconciledField>>,
}

impl FullRecord {
    pub fn field(&self, field: &str) -> Option<&ReconciledField> {
        self.fields.get(field).and_then(|f| f.as_ref())
    }
}
