//! ADQL query construction.
//!
//! The archive exposes a TAP service; one query fetches every solution row
//! for a whole cycle's worth of planets. Each measured field expands into
//! its archive column plus the `err1`/`err2`/`_reflink`/`lim` companion
//! columns; identity columns pass through bare.

use exoquery_core::FieldCatalogue;

/// Row-level columns queried for every solution, independent of the field
/// catalogue.
const ROW_COLUMNS: [&str; 3] = ["pl_name", "default_flag", "pl_pubdate"];

/// All archive columns the catalogue requires, in stable order.
pub fn select_columns(catalogue: &FieldCatalogue) -> Vec<String> {
    let mut columns: Vec<String> = ROW_COLUMNS.iter().map(|c| c.to_string()).collect();
    for field in catalogue.iter() {
        columns.push(field.column.clone());
        if field.measured {
            columns.push(format!("{}err1", field.column));
            columns.push(format!("{}err2", field.column));
            columns.push(format!("{}_reflink", field.column));
            columns.push(format!("{}lim", field.column));
        }
    }
    columns
}

/// Build the full ADQL query for a batch of planet names.
pub fn build_query(catalogue: &FieldCatalogue, table: &str, planet_names: &[String]) -> String {
    let selection = select_columns(catalogue).join(",");
    let names = planet_names
        .iter()
        .map(|name| format!("'{}'", escape(name)))
        .collect::<Vec<_>>()
        .join(",");

    format!("SELECT {selection} FROM {table} WHERE pl_name IN ({names})")
}

/// ADQL string literal escaping: single quotes double.
fn escape(name: &str) -> String {
    name.replace('\'', "''")
}
