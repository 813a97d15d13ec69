// src/core/priority.rs
use crate::core::group::group_by;
use crate::core::normalize::strict_key;
use crate::core::types::{KpiRecord, NormalizedKey};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Relative importance assigned to each team's KPIs. Unknown teams weigh 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamWeights {
    weights: HashMap<String, f64>,
}

impl TeamWeights {
    pub fn empty() -> Self {
        Self {
            weights: HashMap::new(),
        }
    }

    pub fn weight_for(&self, team: &str) -> f64 {
        self.weights.get(team).copied().unwrap_or(1.0)
    }

    /// Sets a team's weight. Non-finite values are ignored.
    pub fn set(&mut self, team: &str, weight: f64) {
        if weight.is_finite() {
            self.weights.insert(team.to_string(), weight);
        }
    }
}

impl Default for TeamWeights {
    fn default() -> Self {
        let mut weights = HashMap::new();
        weights.insert("Marketing".to_string(), 1.0);
        weights.insert("Sales".to_string(), 1.5);
        weights.insert("Product".to_string(), 2.0);
        weights.insert("Customer Success".to_string(), 1.2);
        weights.insert("Data".to_string(), 0.8);
        weights.insert("Finance".to_string(), 1.0);
        weights.insert("Legal".to_string(), 0.7);
        Self { weights }
    }
}

/// A KPI record annotated with its cluster's priority figures. Every member
/// of a cluster carries the same totals; only `team_weight` is per-record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityRecord {
    #[serde(flatten)]
    pub record: KpiRecord,
    #[serde(rename = "Normalized_Metric")]
    pub normalized_metric: NormalizedKey,
    #[serde(rename = "Team_Weight")]
    pub team_weight: f64,
    #[serde(rename = "Total_Team_Weight")]
    pub total_team_weight: f64,
    #[serde(rename = "Definition_Variants")]
    pub definition_variant_count: usize,
    #[serde(rename = "Priority_Index")]
    pub priority_index: f64,
}

impl PriorityRecord {
    /// Case-insensitive search over metric name and team.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.record.metric_name.to_lowercase().contains(&q)
            || self.record.team.to_lowercase().contains(&q)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    PriorityIndex,
    DefinitionVariants,
    TotalTeamWeight,
    MetricName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Scores every record. Records cluster under the strict key of their metric
/// name; a cluster's priority index is its summed team weight divided by the
/// number of distinct definitions, so broad agreement scores high and
/// contested definitions drag the score down. Output order is the flattened
/// cluster order, not the input order.
pub fn compute_priority(records: &[KpiRecord], weights: &TeamWeights) -> Vec<PriorityRecord> {
    let clusters = group_by(records, |r| strict_key(&r.metric_name));
    let mut annotated = Vec::with_capacity(records.len());

    for (key, members) in clusters {
        let total_team_weight: f64 = members.iter().map(|m| weights.weight_for(&m.team)).sum();
        let definition_variant_count = members
            .iter()
            .map(|m| strict_key(&m.definition))
            .collect::<HashSet<_>>()
            .len();
        let priority_index = total_team_weight / definition_variant_count as f64;

        for member in members {
            annotated.push(PriorityRecord {
                team_weight: weights.weight_for(&member.team),
                record: member,
                normalized_metric: key.clone(),
                total_team_weight,
                definition_variant_count,
                priority_index,
            });
        }
    }

    annotated
}

/// Returns a sorted copy. The sort is stable, so equal keys keep their
/// cluster fan-out order.
pub fn sorted_by(
    records: &[PriorityRecord],
    field: SortField,
    direction: SortDirection,
) -> Vec<PriorityRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match field {
            SortField::PriorityIndex => a.priority_index.total_cmp(&b.priority_index),
            SortField::DefinitionVariants => {
                a.definition_variant_count.cmp(&b.definition_variant_count)
            }
            SortField::TotalTeamWeight => a.total_team_weight.total_cmp(&b.total_team_weight),
            SortField::MetricName => a
                .record
                .metric_name
                .to_lowercase()
                .cmp(&b.record.metric_name.to_lowercase()),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

/// Regroups annotated records into display clusters, ordered by the leading
/// member's priority index, highest first. The leading member decides, so
/// re-sorting the input changes which clusters rise.
pub fn group_into_clusters(
    records: &[PriorityRecord],
) -> Vec<(NormalizedKey, Vec<PriorityRecord>)> {
    let mut clusters = group_by(records, |r| r.normalized_metric.clone());
    clusters.sort_by(|(_, a), (_, b)| {
        let lead_a = a.first().map(|r| r.priority_index).unwrap_or(0.0);
        let lead_b = b.first().map(|r| r.priority_index).unwrap_or(0.0);
        lead_b.total_cmp(&lead_a)
    });
    clusters
}
