//! Observation targets.
//!
//! One [`TargetEntry`] is one planet observed in one observational cycle,
//! as listed in the hand-maintained per-cycle input tables.

use serde::{Deserialize, Serialize};

/// One row of a cycle's target list: the planet plus the observation's
/// instrument configuration and campaign bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetEntry {
    pub planet_name: String,

    pub instrument: String,

    pub disperser: String,

    pub filter: String,

    /// Observation type, e.g. `transit` or `eclipse`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub obs_type: Option<String>,

    /// Number of scheduled observations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_obs: Option<u32>,

    /// Program id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,

    /// Exclusive-access period in months.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eap_months: Option<u32>,

    /// Observational cycle number. Not a column of the input table — the
    /// loader assigns it from the file name.
    #[serde(default)]
    pub cycle: u32,
}

impl TargetEntry {
    pub fn new(
        planet_name: impl Into<String>,
        instrument: impl Into<String>,
        disperser: impl Into<String>,
        filter: impl Into<String>,
    ) -> Self {
        Self {
            planet_name: planet_name.into(),
            instrument: instrument.into(),
            disperser: disperser.into(),
            filter: filter.into(),
            obs_type: None,
            num_obs: None,
            pid: None,
            eap_months: None,
            cycle: 0,
        }
    }

    /// Campaign column headers, in report order.
    pub fn report_headers() -> [&'static str; 9] {
        [
            "planet_name",
            "instrument",
            "disperser",
            "filter",
            "type",
            "num_obs",
            "pid",
            "eap_months",
            "cycle",
        ]
    }

    /// Campaign column cells, matching [`Self::report_headers`]. Optional
    /// bookkeeping columns render as empty cells when absent.
    pub fn report_cells(&self) -> [String; 9] {
        [
            self.planet_name.clone(),
            self.instrument.clone(),
            self.disperser.clone(),
            self.filter.clone(),
            self.obs_type.clone().unwrap_or_default(),
            self.num_obs.map(|n| n.to_string()).unwrap_or_default(),
            self.pid.clone().unwrap_or_default(),
            self.eap_months.map(|n| n.to_string()).unwrap_or_default(),
            self.cycle.to_string(),
        ]
    }
}
