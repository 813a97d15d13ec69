// src/core/glossary.rs
use crate::core::group::group_by;
use crate::core::normalize::normalize_metric_name;
use crate::core::types::KpiRecord;
use serde::{Deserialize, Serialize};

/// One row of the unified glossary: every spelling of a metric collapsed
/// under its canonical key, with the most detailed definition promoted to
/// the standard one. Wire names match the spreadsheet export columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    #[serde(rename = "Standard_Metric_Name")]
    pub standard_name: String,
    #[serde(rename = "Teams")]
    pub teams: Vec<String>,
    #[serde(rename = "Original_Metrics")]
    pub original_metric_names: Vec<String>,
    #[serde(rename = "Standard_Definition")]
    pub standard_definition: String,
    #[serde(rename = "Original_Definitions")]
    pub original_definitions: Vec<String>,
}

impl GlossaryEntry {
    /// Case-insensitive search across name, definition and the joined team
    /// list. An empty query matches every entry.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.standard_name.to_lowercase().contains(&q)
            || self.standard_definition.to_lowercase().contains(&q)
            || self.teams.join(", ").to_lowercase().contains(&q)
    }
}

/// Builds the unified glossary: cluster by canonical key, merge each cluster
/// into one entry, then sort entries by name case-insensitively.
pub fn build_glossary(records: &[KpiRecord]) -> Vec<GlossaryEntry> {
    let clusters = group_by(records, |r| normalize_metric_name(&r.metric_name));

    let mut entries: Vec<GlossaryEntry> = clusters
        .into_iter()
        .map(|(key, members)| merge_cluster(&key, &members))
        .collect();

    entries.sort_by(|a, b| {
        a.standard_name
            .to_lowercase()
            .cmp(&b.standard_name.to_lowercase())
    });
    entries
}

fn merge_cluster(key: &str, members: &[KpiRecord]) -> GlossaryEntry {
    let mut teams: Vec<String> = Vec::new();
    let mut original_metric_names: Vec<String> = Vec::new();
    for member in members {
        if !teams.contains(&member.team) {
            teams.push(member.team.clone());
        }
        if !original_metric_names.contains(&member.metric_name) {
            original_metric_names.push(member.metric_name.clone());
        }
    }

    // Definitions are kept verbatim and in arrival order, duplicates included.
    let original_definitions: Vec<String> =
        members.iter().map(|m| m.definition.clone()).collect();

    GlossaryEntry {
        standard_name: capitalize_first(key),
        teams,
        original_metric_names,
        standard_definition: unified_definition(&original_definitions),
        original_definitions,
    }
}

/// Picks the most comprehensive definition, measured by character count.
/// The earliest of equally long candidates wins.
fn unified_definition(definitions: &[String]) -> String {
    let mut best: Option<&String> = None;
    for definition in definitions {
        match best {
            Some(current) if definition.chars().count() <= current.chars().count() => {}
            _ => best = Some(definition),
        }
    }
    best.cloned().unwrap_or_default()
}

/// Uppercases the first character only. The rest of the key is already
/// lowercase from normalization.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
