// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A lowercase lookup key produced by one of the normalizers.
pub type NormalizedKey = String;

/// A single KPI definition as one team reports it.
/// Field names on the wire (`Team`, `Metric_Name`, `Definition`) follow the
/// upstream spreadsheet export, so serialization keeps the original casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiRecord {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Metric_Name")]
    pub metric_name: String,
    #[serde(rename = "Definition")]
    pub definition: String,
}

impl KpiRecord {
    pub fn new(team: &str, metric_name: &str, definition: &str) -> Self {
        Self {
            team: team.to_string(),
            metric_name: metric_name.to_string(),
            definition: definition.to_string(),
        }
    }
}
