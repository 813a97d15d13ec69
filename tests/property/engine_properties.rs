use kpi_core::core::analyzer::analyze;
use kpi_core::core::glossary::build_glossary;
use kpi_core::core::normalize::strict_key;
use kpi_core::core::priority::{compute_priority, TeamWeights};
use kpi_core::core::scenarios::build_scenarios;
use kpi_core::core::translator::translate;
use kpi_core::core::types::KpiRecord;
use kpi_core::KpiEngine;
use proptest::prelude::*;
use std::collections::HashMap;

fn arb_team() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Marketing".to_string()),
        Just("Sales".to_string()),
        Just("Product".to_string()),
        Just("Data".to_string()),
        Just("Customer Success".to_string()),
        Just("Platform Ops".to_string()),
    ]
}

fn arb_metric_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Conversion Rate".to_string()),
        Just("conversion ratio".to_string()),
        Just("Engagement Rate".to_string()),
        Just("Churn".to_string()),
        Just("Net Promoter Score".to_string()),
        "[A-Za-z][A-Za-z ]{0,11}",
    ]
}

fn arb_definition() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Closed deals over opportunities".to_string()),
        Just("CTA completions over visits".to_string()),
        Just("Average session duration".to_string()),
        "[a-z ]{0,30}",
    ]
}

fn arb_records() -> impl Strategy<Value = Vec<KpiRecord>> {
    prop::collection::vec(
        (arb_team(), arb_metric_name(), arb_definition())
            .prop_map(|(team, name, def)| KpiRecord::new(&team, &name, &def)),
        0..24,
    )
}

// ── Determinism ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn every_view_is_deterministic(records in arb_records()) {
        let first = KpiEngine::with_records(records.clone());
        let second = KpiEngine::with_records(records);

        let glossary_a = serde_json::to_string(&first.glossary()).unwrap();
        let glossary_b = serde_json::to_string(&second.glossary()).unwrap();
        prop_assert_eq!(glossary_a, glossary_b);

        let analysis_a = serde_json::to_string(&first.analyze()).unwrap();
        let analysis_b = serde_json::to_string(&second.analyze()).unwrap();
        prop_assert_eq!(analysis_a, analysis_b);

        let priority_a = serde_json::to_string(&first.priority()).unwrap();
        let priority_b = serde_json::to_string(&second.priority()).unwrap();
        prop_assert_eq!(priority_a, priority_b);

        let scenarios_a = serde_json::to_string(&first.scenarios()).unwrap();
        let scenarios_b = serde_json::to_string(&second.scenarios()).unwrap();
        prop_assert_eq!(scenarios_a, scenarios_b);
    }
}

// ── Glossary shape ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn glossary_is_sorted_with_unique_keys(records in arb_records()) {
        let glossary = build_glossary(&records);

        for pair in glossary.windows(2) {
            let left = pair[0].standard_name.to_lowercase();
            let right = pair[1].standard_name.to_lowercase();
            prop_assert!(left < right, "entries out of order: {:?} vs {:?}", left, right);
        }
    }

    #[test]
    fn every_record_lands_in_exactly_one_entry(records in arb_records()) {
        let glossary = build_glossary(&records);
        let total: usize = glossary.iter().map(|e| e.original_definitions.len()).sum();
        prop_assert_eq!(total, records.len());
    }
}

// ── Priority arithmetic ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn annotation_preserves_records_and_cluster_figures(records in arb_records()) {
        let annotated = compute_priority(&records, &TeamWeights::default());
        prop_assert_eq!(annotated.len(), records.len());

        let mut cluster_figures: HashMap<&str, (f64, usize)> = HashMap::new();
        for entry in &annotated {
            prop_assert!(entry.definition_variant_count >= 1);
            prop_assert_eq!(
                entry.priority_index,
                entry.total_team_weight / entry.definition_variant_count as f64
            );

            let figures = cluster_figures
                .entry(entry.normalized_metric.as_str())
                .or_insert((entry.total_team_weight, entry.definition_variant_count));
            let (total, variants) = *figures;
            prop_assert_eq!(total, entry.total_team_weight);
            prop_assert_eq!(variants, entry.definition_variant_count);
        }
    }
}

// ── Analysis relationships ───────────────────────────────────────────────

proptest! {
    #[test]
    fn summaries_cover_all_records(records in arb_records()) {
        let analysis = analyze(&records);
        let total: usize = analysis.summaries.iter().map(|s| s.definitions.len()).sum();
        prop_assert_eq!(total, records.len());
    }

    #[test]
    fn conflicts_never_outnumber_shared_metrics(records in arb_records()) {
        let analysis = analyze(&records);
        prop_assert!(analysis.conflicts.len() <= analysis.translations.len());
    }

    #[test]
    fn every_recommendation_traces_to_a_conflict(records in arb_records()) {
        let analysis = analyze(&records);
        for rec in &analysis.recommendations {
            let key = strict_key(&rec.metric_name);
            prop_assert!(
                analysis
                    .conflicts
                    .iter()
                    .any(|c| strict_key(&c.metric_name) == key),
                "recommendation for {:?} has no matching conflict",
                rec.metric_name
            );
            prop_assert_eq!(rec.implementation_steps.len(), 4);
        }
    }
}

// ── Scenarios ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn scenarios_need_at_least_two_metrics(records in arb_records()) {
        for scenario in build_scenarios(&records) {
            prop_assert!(scenario.metrics.len() >= 2);
            prop_assert!(scenario.title.starts_with("Conflict in "));
            prop_assert!(!scenario.conflict_details.is_empty());
        }
    }
}

// ── Translator ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn same_team_translation_is_identity(
        records in arb_records(),
        message in "[A-Za-z][A-Za-z ]{0,39}"
    ) {
        let result = translate(&records, &message, "Sales", "Sales").unwrap();
        prop_assert_eq!(result.translated_message, message);
        prop_assert!(result.matched_terms.is_empty());
    }

    #[test]
    fn translation_never_fails_on_known_shape(records in arb_records()) {
        let result = translate(&records, "How is churn tracking this week", "Data", "Sales");
        prop_assert!(result.is_ok());
    }
}
