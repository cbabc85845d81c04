//! Raw archive rows.
//!
//! A [`RawRow`] is one database entry for a planet — potentially one of
//! several alternative solutions. Each carries a map of field name to
//! [`Measurement`], the archive's default-solution flag, and the solution's
//! publication date when the archive reports one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A field value: numeric or categorical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }

    /// CSV cell representation. Never empty — "no data" is represented by
    /// the *absence* of a value, upstream of this call.
    pub fn to_cell(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One field's value in one archive row, with its uncertainties and source.
///
/// Uncertainties are stored non-negative; a row reporting only a symmetric
/// uncertainty duplicates it into both bounds at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: ParamValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err_upper: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err_lower: Option<f64>,

    /// Source publication identifier (citation text).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Archive limit flag: the value is an upper/lower limit, not a
    /// detection. Carried through to the full report, never resolved here.
    #[serde(default)]
    pub limit: bool,
}

impl Measurement {
    pub fn new(value: impl Into<ParamValue>) -> Self {
        Self {
            value: value.into(),
            err_upper: None,
            err_lower: None,
            source: None,
            limit: false,
        }
    }

    /// Set asymmetric uncertainties. Signs are discarded — the archive
    /// reports the lower bound as a negative offset.
    pub fn with_errors(mut self, upper: f64, lower: f64) -> Self {
        self.err_upper = Some(upper.abs());
        self.err_lower = Some(lower.abs());
        self
    }

    /// Set a symmetric uncertainty (duplicated into both bounds).
    pub fn with_symmetric_error(mut self, err: f64) -> Self {
        self.err_upper = Some(err.abs());
        self.err_lower = Some(err.abs());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_limit(mut self, limit: bool) -> Self {
        self.limit = limit;
        self
    }

    /// Combined uncertainty used for precedence: upper + lower, with any
    /// missing bound treated as unbounded (worst case).
    pub fn combined_uncertainty(&self) -> f64 {
        match (self.err_upper, self.err_lower) {
            (Some(upper), Some(lower)) => upper + lower,
            _ => f64::INFINITY,
        }
    }
}

/// One row returned by the archive for a planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub planet_name: String,

    /// The archive's canonical/default-solution flag for this planet.
    #[serde(default)]
    pub default_solution: bool,

    /// Publication date of this solution's source, as the archive reports
    /// it: a `YYYY-MM` string, which orders lexicographically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,

    /// Field name → measurement. Fields the row has no value for are absent.
    #[serde(default)]
    pub values: HashMap<String, Measurement>,
}

impl RawRow {
    pub fn new(planet_name: impl Into<String>) -> Self {
        Self {
            planet_name: planet_name.into(),
            default_solution: false,
            published: None,
            values: HashMap::new(),
        }
    }

    pub fn with_default_flag(mut self, default_solution: bool) -> Self {
        self.default_solution = default_solution;
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = Some(published.into());
        self
    }

    pub fn with_value(mut self, field: impl Into<String>, measurement: Measurement) -> Self {
        self.values.insert(field.into(), measurement);
        self
    }

    /// The measurement for a field, if this row has one.
    pub fn measurement(&self, field: &str) -> Option<&Measurement> {
        self.values.get(field)
    }
}
