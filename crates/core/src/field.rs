//! The parameter field catalogue.
//!
//! A [`FieldSpec`] names one physical quantity the pipeline queries and
//! reports: its report name, the archive column it maps to, the adopted
//! unit, and whether the archive carries companion uncertainty/reference
//! columns for it. The catalogue is plain configuration data — it is passed
//! explicitly into the reconciler's callers, never held as ambient state.

use serde::{Deserialize, Serialize};

/// Whether a field's values are numbers or free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Numeric,
    Categorical,
}

/// One named physical quantity (or identity column) to query and report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Report-facing name, e.g. `radius`.
    pub name: String,

    /// Archive column name, e.g. `pl_rade`.
    pub column: String,

    /// Adopted unit, e.g. `rearth`. Identity columns have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Value kind (default: numeric).
    #[serde(default = "default_kind")]
    pub kind: ValueKind,

    /// Whether the archive carries `<col>err1`, `<col>err2`, `<col>_reflink`
    /// and `<col>lim` companion columns for this field.
    #[serde(default = "default_true")]
    pub measured: bool,
}

fn default_kind() -> ValueKind {
    ValueKind::Numeric
}
fn default_true() -> bool {
    true
}

impl FieldSpec {
    /// A measured numeric quantity with uncertainty/reference columns.
    pub fn measured(
        name: impl Into<String>,
        column: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            unit: Some(unit.into()),
            kind: ValueKind::Numeric,
            measured: true,
        }
    }

    /// An identity column (no uncertainties, no source).
    pub fn identity(name: impl Into<String>, column: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            unit: None,
            kind,
            measured: false,
        }
    }

    /// Column header used in reports: `<name>_<unit>`, or the bare name for
    /// unitless fields.
    pub fn report_column(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{}_{}", self.name, unit),
            None => self.name.clone(),
        }
    }
}

/// The ordered set of fields a query resolves. Order is report column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCatalogue {
    pub fields: Vec<FieldSpec>,
}

impl FieldCatalogue {
    /// The standard catalogue: system identity columns plus the planet and
    /// stellar parameters the archive publishes for transiting systems.
    pub fn standard() -> Self {
        Self {
            fields: vec![
                // Auxiliary information
                FieldSpec::identity("host_name", "hostname", ValueKind::Categorical),
                FieldSpec::identity("planet_id", "pl_letter", ValueKind::Categorical),
                FieldSpec::identity("system_p-num", "sy_pnum", ValueKind::Numeric),
                FieldSpec::identity("system_s-num", "sy_snum", ValueKind::Numeric),
                FieldSpec::measured("system-distance", "sy_dist", "pc"),
                // Planet parameters
                FieldSpec::measured("period", "pl_orbper", "day"),
                FieldSpec::measured("sma", "pl_orbsmax", "au"),
                FieldSpec::measured("radius", "pl_rade", "rearth"),
                FieldSpec::measured("mass", "pl_bmasse", "mearth"),
                FieldSpec::measured("eq-temp", "pl_eqt", "kelvin"),
                // Stellar parameters
                FieldSpec::measured("star-teff", "st_teff", "kelvin"),
                FieldSpec::measured("star-radius", "st_rad", "rsol"),
                FieldSpec::measured("star-mass", "st_mass", "msol"),
                FieldSpec::measured("star-log10-lbol", "st_lum", "lsol"),
                FieldSpec::measured("star-age", "st_age", "ga"),
                FieldSpec::measured("star-rotvel", "st_vsin", "kms"),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by report name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl Default for FieldCatalogue {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalogue_has_known_fields() {
        let cat = FieldCatalogue::standard();
        assert!(cat.get("radius").is_some());
        assert!(cat.get("star-teff").is_some());
        assert!(cat.get("nonexistent").is_none());
        assert_eq!(cat.get("radius").unwrap().column, "pl_rade");
    }

    #[test]
    fn identity_fields_are_not_measured() {
        let cat = FieldCatalogue::standard();
        assert!(!cat.get("host_name").unwrap().measured);
        assert!(!cat.get("system_p-num").unwrap().measured);
        assert!(cat.get("mass").unwrap().measured);
    }

    #[test]
    fn report_column_appends_unit() {
        let field = FieldSpec::measured("radius", "pl_rade", "rearth");
        assert_eq!(field.report_column(), "radius_rearth");

        let ident = FieldSpec::identity("host_name", "hostname", ValueKind::Categorical);
        assert_eq!(ident.report_column(), "host_name");
    }

    #[test]
    fn catalogue_roundtrips_through_toml_style_serde() {
        let cat = FieldCatalogue::standard();
        let json = serde_json::to_string(&cat).unwrap();
        let parsed: FieldCatalogue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cat);
    }

    #[test]
    fn field_defaults_apply_when_omitted() {
        let field: FieldSpec =
            serde_json::from_str(r#"{"name": "period", "column": "pl_orbper"}"#).unwrap();
        assert_eq!(field.kind, ValueKind::Numeric);
        assert!(field.measured);
        assert!(field.unit.is_none());
    }
}
