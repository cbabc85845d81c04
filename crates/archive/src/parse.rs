//! TAP response parsing.
//!
//! `format=json` responses arrive as a JSON array of row objects keyed by
//! column name. Nulls mean "this solution does not constrain that column"
//! and simply produce no measurement. Citation columns arrive as HTML
//! anchors; only the link text is kept as the source identifier.

use exoquery_core::{ArchiveError, FieldCatalogue, Measurement, ParamValue, RawRow, ValueKind};
use serde_json::Value;
use tracing::warn;

/// Parse a full TAP JSON payload into raw rows.
pub fn rows_from_json(payload: &Value, catalogue: &FieldCatalogue) -> Result<Vec<RawRow>, ArchiveError> {
    let rows = payload.as_array().ok_or_else(|| {
        ArchiveError::MalformedResponse("expected a JSON array of rows".into())
    })?;

    rows.iter().map(|row| parse_row(row, catalogue)).collect()
}

fn parse_row(row: &Value, catalogue: &FieldCatalogue) -> Result<RawRow, ArchiveError> {
    let planet_name = row["pl_name"]
        .as_str()
        .ok_or_else(|| ArchiveError::MalformedResponse("row without pl_name".into()))?;

    let mut raw = RawRow::new(planet_name)
        .with_default_flag(flag_is_set(&row["default_flag"]));

    if let Some(date) = row["pl_pubdate"].as_str() {
        let date = date.trim();
        if !date.is_empty() {
            raw = raw.with_published(date);
        }
    }

    for field in catalogue.iter() {
        let Some(value) = param_value(&row[field.column.as_str()], field.kind) else {
            continue;
        };

        let mut measurement = Measurement::new(value);
        if field.measured {
            let err_upper = row[format!("{}err1", field.column)].as_f64();
            let err_lower = row[format!("{}err2", field.column)].as_f64();
            measurement.err_upper = err_upper.map(f64::abs);
            measurement.err_lower = err_lower.map(f64::abs);
            measurement.source = row[format!("{}_reflink", field.column)]
                .as_str()
                .map(strip_reflink);
            measurement.limit = flag_is_set(&row[format!("{}lim", field.column)]);
        }
        raw = raw.with_value(field.name.clone(), measurement);
    }

    Ok(raw)
}

/// Extract a cell as a [`ParamValue`], or `None` when the column is null,
/// absent, or blank.
fn param_value(cell: &Value, kind: ValueKind) -> Option<ParamValue> {
    match kind {
        ValueKind::Numeric => match cell {
            Value::Number(n) => n.as_f64().map(ParamValue::Number),
            // Some numeric columns come back as quoted strings.
            Value::String(s) if !s.trim().is_empty() => match s.trim().parse::<f64>() {
                Ok(n) => Some(ParamValue::Number(n)),
                Err(_) => {
                    warn!(cell = %s, "Ignoring unparseable numeric cell");
                    None
                }
            },
            _ => None,
        },
        ValueKind::Categorical => match cell {
            Value::String(s) if !s.trim().is_empty() => Some(ParamValue::Text(s.trim().to_string())),
            Value::Number(n) => Some(ParamValue::Text(n.to_string())),
            _ => None,
        },
    }
}

/// Archive flag columns are 0/1 integers (limits also use -1).
fn flag_is_set(cell: &Value) -> bool {
    match cell {
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim(), "1" | "-1" | "true"),
        _ => false,
    }
}

/// Citation columns arrive as HTML anchors
/// (`<a refstr=… href=…>Faedi et al. 2011</a>`); keep the link text.
pub fn strip_reflink(reflink: &str) -> String {
    let text = match (reflink.find('>'), reflink.rfind("</a>")) {
        (Some(start), Some(end)) if start + 1 < end => &reflink[start + 1..end],
        _ => reflink,
    };
    text.trim().to_string()
}
