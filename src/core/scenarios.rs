// src/core/scenarios.rs
use crate::core::types::KpiRecord;
use serde::{Deserialize, Serialize};

/// The measurement concepts that scenario cards are built around. Ordering
/// here fixes the ordering of the generated cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concept {
    Engagement,
    Conversion,
    Retention,
    UserActivity,
    CustomerSuccess,
    LeadQuality,
    Revenue,
}

impl Concept {
    pub const ALL: [Concept; 7] = [
        Concept::Engagement,
        Concept::Conversion,
        Concept::Retention,
        Concept::UserActivity,
        Concept::CustomerSuccess,
        Concept::LeadQuality,
        Concept::Revenue,
    ];

    /// Human form used in card titles.
    pub fn display(self) -> &'static str {
        match self {
            Concept::Engagement => "engagement",
            Concept::Conversion => "conversion",
            Concept::Retention => "retention",
            Concept::UserActivity => "user activity",
            Concept::CustomerSuccess => "customer success",
            Concept::LeadQuality => "lead quality",
            Concept::Revenue => "revenue",
        }
    }
}

/// A concrete disagreement between two teams (or within one team) inside a
/// scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConflict {
    pub teams: Vec<String>,
    pub conflict: String,
}

/// A worked example of how one measurement concept splinters across teams,
/// with the records that landed in the concept's bucket attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub concept: Concept,
    pub title: String,
    pub metrics: Vec<KpiRecord>,
    pub real_world_example: String,
    pub conflict_details: Vec<ScenarioConflict>,
}

struct Narrative {
    example: &'static str,
    conflicts: &'static [(&'static [&'static str], &'static str)],
}

/// Tags a record with every concept whose keyword filter it passes. Matching
/// is substring-based over the lowercased definition and metric name, plus
/// team rules for customer success and revenue. A record can land in several
/// buckets or in none.
pub fn classify(record: &KpiRecord) -> Vec<Concept> {
    let definition = record.definition.to_lowercase();
    let name = record.metric_name.to_lowercase();
    let team = record.team.to_lowercase();

    Concept::ALL
        .into_iter()
        .filter(|&concept| concept_applies(concept, &definition, &name, &team))
        .collect()
}

fn concept_applies(concept: Concept, definition: &str, name: &str, team: &str) -> bool {
    match concept {
        Concept::Engagement => {
            contains_any(definition, &["email", "click", "open", "session", "login", "webinar"])
                || name.contains("engagement")
        }
        Concept::Conversion => {
            contains_any(definition, &["sign up", "trial", "cta", "deal", "closed"])
                || name.contains("conversion")
                || name.contains("qualified")
        }
        Concept::Retention => {
            contains_any(definition, &["return", "churn", "support ticket", "nps"])
                || name.contains("retention")
                || name.contains("churn")
        }
        Concept::UserActivity => {
            contains_any(definition, &["feature", "onboarding", "session", "log in", "usage"])
                || name.contains("activation")
                || name.contains("feature")
                || name.contains("user")
        }
        Concept::CustomerSuccess => {
            contains_any(definition, &["support", "nps", "satisfaction", "feedback"])
                || team.contains("success")
                || name.contains("satisfaction")
        }
        Concept::LeadQuality => {
            contains_any(definition, &["lead", "score", "sdr"])
                || name.contains("lead")
                || name.contains("pipeline")
        }
        Concept::Revenue => {
            contains_any(definition, &["revenue", "cost", "mrr", "cac", "roi", "clv"])
                || team == "finance"
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Buckets records by concept and turns every bucket holding at least two
/// records into a scenario card. Buckets keep record arrival order.
pub fn build_scenarios(records: &[KpiRecord]) -> Vec<Scenario> {
    let mut buckets: Vec<(Concept, Vec<KpiRecord>)> = Concept::ALL
        .iter()
        .map(|&concept| (concept, Vec::new()))
        .collect();

    for record in records {
        for concept in classify(record) {
            if let Some((_, bucket)) = buckets.iter_mut().find(|(c, _)| *c == concept) {
                bucket.push(record.clone());
            }
        }
    }

    buckets
        .into_iter()
        .filter(|(_, metrics)| metrics.len() > 1)
        .map(|(concept, metrics)| {
            let narrative = narrative_for(concept);
            Scenario {
                concept,
                title: format!("Conflict in {} measurement", concept.display()),
                metrics,
                real_world_example: narrative.example.to_string(),
                conflict_details: narrative
                    .conflicts
                    .iter()
                    .map(|(teams, conflict)| ScenarioConflict {
                        teams: teams.iter().map(|t| t.to_string()).collect(),
                        conflict: conflict.to_string(),
                    })
                    .collect(),
            }
        })
        .collect()
}

fn narrative_for(concept: Concept) -> Narrative {
    match concept {
        Concept::Engagement => Narrative {
            example: "A user scrolls through the entire product page for 5 minutes, watches a demo video, but doesn't click any buttons or forms.",
            conflicts: &[
                (
                    &["Marketing", "Data"],
                    "Marketing's Engagement Rate (based on clicks) shows 0% engagement while Data's Session Duration shows high engagement (5 minutes).",
                ),
                (
                    &["Marketing", "Customer Success"],
                    "Marketing's Bounce Rate classifies this as a bounce (no interaction), but Customer Success's Engagement Score counts the video view as engagement.",
                ),
            ],
        },
        Concept::Conversion => Narrative {
            example: "A lead from a paid campaign downloads a whitepaper, enters their email, but doesn't book a demo call or respond to follow-ups.",
            conflicts: &[
                (
                    &["Marketing", "Sales"],
                    "Marketing counts this as a conversion (lead from paid campaign that completed a CTA), but Sales doesn't consider it a Qualified Lead.",
                ),
                (
                    &["Marketing", "Sales"],
                    "This lead appears in Marketing's conversion metrics but hurts Sales' Close Rate when counted among total leads.",
                ),
            ],
        },
        Concept::Retention => Narrative {
            example: "A user who had 3 support tickets last month returns to the platform after 30 days but only checks account settings and leaves.",
            conflicts: &[
                (
                    &["Customer Success", "Data"],
                    "Customer Success flags them as Churn Risk (>2 support tickets) while Data counts them as Retained (returned after 30 days).",
                ),
                (
                    &["Customer Success", "Customer Success"],
                    "Within CS's own metrics, this user is both a Churn Risk (tickets) and not a Churn Risk (NPS > 7).",
                ),
            ],
        },
        Concept::UserActivity => Narrative {
            example: "A user logs in 6 times per week but only uses the reporting dashboard, ignoring newly released features.",
            conflicts: &[
                (
                    &["Product", "Product"],
                    "Counted as a Power User (>5 logins, completes core flows) but has 0% Feature Adoption (no usage of new features).",
                ),
                (
                    &["Product", "Customer Success"],
                    "Product sees them as highly engaged (Power User), while Customer Success may see lower Engagement Score (limited feature usage).",
                ),
            ],
        },
        Concept::CustomerSuccess => Narrative {
            example: "A customer submits 3 support tickets in a month, all requesting advanced functionality, but gives a 9/10 NPS rating.",
            conflicts: &[
                (
                    &["Customer Success", "Customer Success"],
                    "CS flags them as potential Churn Risk due to ticket volume but also as a promoter due to high NPS.",
                ),
                (
                    &["Customer Success", "Product"],
                    "CS sees the high ticket volume as concerning, but Product might see this as valuable User Satisfaction feedback for new features.",
                ),
            ],
        },
        Concept::LeadQuality => Narrative {
            example: "A lead from a Fortune 500 company with perfect demographic match has clicked on only one email and hasn't booked a demo.",
            conflicts: &[
                (
                    &["Sales", "Marketing"],
                    "Sales rates this as high Lead Quality based on demographics, but Marketing shows low Conversion metrics.",
                ),
                (
                    &["Sales", "Sales"],
                    "This lead has high Pipeline Velocity potential (high value) but decreases Close Rate when counted in the denominator.",
                ),
            ],
        },
        Concept::Revenue => Narrative {
            example: "A customer signs up for the lowest-tier plan ($10/month) but uses every feature extensively and has been active for 2 years.",
            conflicts: &[
                (
                    &["Finance", "Product"],
                    "Finance counts them as low Customer Lifetime Value based on revenue, but Product sees them as a high-value Power User.",
                ),
                (
                    &["Finance", "Customer Success"],
                    "Finance's CAC calculation may exclude them as a 'qualified' customer due to low plan tier, but Customer Success shows them as a promoter.",
                ),
            ],
        },
    }
}
