// src/core/analyzer.rs
use crate::core::group::group_by;
use crate::core::normalize::strict_key;
use crate::core::types::{KpiRecord, NormalizedKey};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

type Clusters = Vec<(NormalizedKey, Vec<KpiRecord>)>;

const CONFLICT_IMPACT: &str = "This misalignment could lead to teams optimizing for different outcomes while thinking they're working toward the same goal.";

const DEFAULT_TEAM_CONTEXT: &str = "uses this metric in their specific context";

/// How each team typically reads a shared metric. Lookup is by exact name.
const TEAM_CONTEXTS: [(&str, &str); 7] = [
    ("Marketing", "typically focuses on acquisition and awareness metrics"),
    ("Sales", "typically focuses on conversion and revenue metrics"),
    ("Product", "typically focuses on engagement and retention metrics"),
    ("Engineering", "typically focuses on performance and reliability metrics"),
    ("Data", "typically focuses on data quality and integrity metrics"),
    ("Customer Success", "typically focuses on satisfaction and retention metrics"),
    ("Finance", "typically focuses on revenue and cost metrics"),
];

/// Well-known abbreviations for common SaaS metrics, matched by full name
/// case-insensitively. Anything else gets no alternatives.
const EQUIVALENT_TERMS: [(&str, &[&str]); 7] = [
    ("Conversion Rate", &["CR", "CVR", "Conversion %"]),
    ("Customer Acquisition Cost", &["CAC", "Cost per Acquisition", "CPA"]),
    ("Churn Rate", &["Attrition Rate", "Customer Churn", "Turnover Rate"]),
    ("Monthly Recurring Revenue", &["MRR", "Monthly Revenue"]),
    ("Customer Lifetime Value", &["CLV", "CLTV", "LTV"]),
    ("Net Promoter Score", &["NPS"]),
    ("Return on Investment", &["ROI", "Return on Ad Spend", "ROAS"]),
];

const IMPLEMENTATION_STEPS: [&str; 4] = [
    "Document the agreed definition in a central metrics dictionary",
    "Update dashboards and reports to reflect the unified definition",
    "Ensure all teams understand how this metric relates to their goals",
    "Review the definition quarterly to ensure continued alignment",
];

/// One team's wording of a metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDefinition {
    pub team: String,
    pub definition: String,
}

/// Per-cluster roll-up: every team and every definition, nothing judged yet.
/// Teams repeat when a team registered the same metric twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub metric_name: String,
    pub teams: Vec<String>,
    pub definitions: Vec<TeamDefinition>,
}

/// A metric that several teams define in genuinely different words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub metric_name: String,
    pub description: String,
    pub details: Vec<TeamDefinition>,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTranslation {
    pub team: String,
    pub meaning: String,
    pub context: String,
}

/// Side-by-side reading guide for a metric shared by several teams, present
/// whether or not the definitions conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationView {
    pub metric_name: String,
    pub team_translations: Vec<TeamTranslation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub metric_name: String,
    pub recommended_definition: String,
    pub source_team: String,
    pub alternative_names: Vec<String>,
    pub implementation_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summaries: Vec<Summary>,
    pub conflicts: Vec<Conflict>,
    pub translations: Vec<TranslationView>,
    pub recommendations: Vec<Recommendation>,
}

/// Runs the full conflict analysis over one record set.
pub fn analyze(records: &[KpiRecord]) -> AnalysisResult {
    // 1. Cluster records under the strict key of their metric name.
    let clusters = group_by(records, |r| strict_key(&r.metric_name));

    // 2. Summarize every cluster.
    let summaries = build_summaries(&clusters);

    // 3. Flag clusters whose definitions genuinely diverge.
    let conflicts = identify_conflicts(&clusters);

    // 4. Explain shared metrics team by team.
    let translations = build_translations(&clusters);

    // 5. Recommend a canonical definition for each conflicted cluster.
    let recommendations = build_recommendations(&clusters, &conflicts);

    AnalysisResult {
        summaries,
        conflicts,
        translations,
        recommendations,
    }
}

fn build_summaries(clusters: &Clusters) -> Vec<Summary> {
    clusters
        .iter()
        .map(|(_, members)| Summary {
            // The first member's spelling becomes the display name.
            metric_name: members[0].metric_name.clone(),
            teams: members.iter().map(|m| m.team.clone()).collect(),
            definitions: members
                .iter()
                .map(|m| TeamDefinition {
                    team: m.team.clone(),
                    definition: m.definition.clone(),
                })
                .collect(),
        })
        .collect()
}

/// A cluster conflicts when more than one record shares the name and the
/// strict-normalized definitions are not all identical.
fn identify_conflicts(clusters: &Clusters) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for (_, members) in clusters {
        if members.len() <= 1 {
            continue;
        }
        let distinct: HashSet<NormalizedKey> =
            members.iter().map(|m| strict_key(&m.definition)).collect();
        if distinct.len() > 1 {
            conflicts.push(Conflict {
                metric_name: members[0].metric_name.clone(),
                description: format!(
                    "Different teams have conflicting definitions for \"{}\"",
                    members[0].metric_name
                ),
                details: members
                    .iter()
                    .map(|m| TeamDefinition {
                        team: m.team.clone(),
                        definition: m.definition.clone(),
                    })
                    .collect(),
                impact: CONFLICT_IMPACT.to_string(),
            });
        }
    }

    conflicts
}

fn build_translations(clusters: &Clusters) -> Vec<TranslationView> {
    clusters
        .iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(_, members)| TranslationView {
            metric_name: members[0].metric_name.clone(),
            team_translations: members
                .iter()
                .map(|m| TeamTranslation {
                    team: m.team.clone(),
                    meaning: m.definition.clone(),
                    context: team_context(&m.team).to_string(),
                })
                .collect(),
        })
        .collect()
}

fn team_context(team: &str) -> &'static str {
    TEAM_CONTEXTS
        .iter()
        .find(|(name, _)| *name == team)
        .map(|(_, context)| *context)
        .unwrap_or(DEFAULT_TEAM_CONTEXT)
}

fn build_recommendations(clusters: &Clusters, conflicts: &[Conflict]) -> Vec<Recommendation> {
    clusters
        .iter()
        .filter(|(_, members)| {
            let lead = members[0].metric_name.to_lowercase();
            conflicts
                .iter()
                .any(|conflict| conflict.metric_name.to_lowercase() == lead)
        })
        .map(|(_, members)| {
            let chosen = most_detailed(members);
            Recommendation {
                metric_name: chosen.metric_name.clone(),
                recommended_definition: chosen.definition.clone(),
                source_team: chosen.team.clone(),
                alternative_names: equivalent_terms(&chosen.metric_name),
                implementation_steps: IMPLEMENTATION_STEPS
                    .iter()
                    .map(|step| step.to_string())
                    .collect(),
            }
        })
        .collect()
}

/// The record with the longest definition by character count, earliest first
/// on ties. Callers guarantee a non-empty slice.
fn most_detailed(members: &[KpiRecord]) -> &KpiRecord {
    let mut best = &members[0];
    for member in &members[1..] {
        if member.definition.chars().count() > best.definition.chars().count() {
            best = member;
        }
    }
    best
}

fn equivalent_terms(metric_name: &str) -> Vec<String> {
    let lower = metric_name.to_lowercase();
    EQUIVALENT_TERMS
        .iter()
        .find(|(name, _)| name.to_lowercase() == lower)
        .map(|(_, terms)| terms.iter().map(|t| t.to_string()).collect())
        .unwrap_or_default()
}
