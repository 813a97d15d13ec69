use kpi_core::core::analyzer::analyze;
use kpi_core::core::types::KpiRecord;

fn record(team: &str, name: &str, definition: &str) -> KpiRecord {
    KpiRecord::new(team, name, definition)
}

#[test]
fn conflict_requires_multiple_distinct_definitions() {
    let records = vec![
        record("Sales", "Conversion Rate", "Closed deals over opportunities"),
        record("Marketing", "conversion rate", "CTA completions over visits"),
        record("Data", "Session Length", "Average minutes per visit"),
    ];

    let analysis = analyze(&records);
    assert_eq!(analysis.conflicts.len(), 1);

    let conflict = &analysis.conflicts[0];
    // The first member's spelling is the display name.
    assert_eq!(conflict.metric_name, "Conversion Rate");
    assert_eq!(
        conflict.description,
        "Different teams have conflicting definitions for \"Conversion Rate\""
    );
    assert_eq!(conflict.details.len(), 2);
    assert!(conflict.impact.contains("optimizing for different outcomes"));
}

#[test]
fn agreeing_teams_do_not_conflict() {
    let records = vec![
        record("Sales", "NPS", "Promoters minus detractors"),
        record("Data", "NPS", "promoters minus detractors  "),
    ];

    let analysis = analyze(&records);
    assert!(analysis.conflicts.is_empty());
    // Still summarized and still translated, just not flagged.
    assert_eq!(analysis.summaries.len(), 1);
    assert_eq!(analysis.translations.len(), 1);
    assert!(analysis.recommendations.is_empty());
}

#[test]
fn single_team_metrics_are_never_conflicts() {
    let records = vec![record("Finance", "MRR", "Sum of active subscriptions")];
    let analysis = analyze(&records);
    assert!(analysis.conflicts.is_empty());
    assert!(analysis.translations.is_empty());
    assert_eq!(analysis.summaries.len(), 1);
}

#[test]
fn summaries_keep_duplicate_teams() {
    let records = vec![
        record("Sales", "Pipeline", "Open deal value"),
        record("Sales", "Pipeline", "Weighted open deal value"),
    ];

    let analysis = analyze(&records);
    assert_eq!(analysis.summaries[0].teams, ["Sales", "Sales"]);
    assert_eq!(analysis.summaries[0].definitions.len(), 2);
}

#[test]
fn translations_carry_team_context() {
    let records = vec![
        record("Marketing", "Engagement Rate", "Clicks over sends"),
        record("Platform Ops", "Engagement Rate", "Sessions over installs"),
    ];

    let analysis = analyze(&records);
    let translations = &analysis.translations[0].team_translations;
    assert_eq!(
        translations[0].context,
        "typically focuses on acquisition and awareness metrics"
    );
    // Unknown teams fall back to the generic context.
    assert_eq!(
        translations[1].context,
        "uses this metric in their specific context"
    );
    assert_eq!(translations[1].meaning, "Sessions over installs");
}

#[test]
fn recommendation_picks_the_longest_definition() {
    let records = vec![
        record("Sales", "Churn Rate", "Lost accounts"),
        record(
            "Data",
            "Churn Rate",
            "Percentage of accounts with no activity in thirty days",
        ),
    ];

    let analysis = analyze(&records);
    assert_eq!(analysis.recommendations.len(), 1);

    let rec = &analysis.recommendations[0];
    assert_eq!(rec.source_team, "Data");
    assert_eq!(
        rec.recommended_definition,
        "Percentage of accounts with no activity in thirty days"
    );
    assert_eq!(
        rec.alternative_names,
        ["Attrition Rate", "Customer Churn", "Turnover Rate"]
    );
    assert_eq!(rec.implementation_steps.len(), 4);
    assert_eq!(
        rec.implementation_steps[0],
        "Document the agreed definition in a central metrics dictionary"
    );
}

#[test]
fn alternative_names_match_case_insensitively() {
    let records = vec![
        record("Sales", "conversion rate", "Closed deals over opportunities"),
        record("Marketing", "conversion rate", "CTA completions over visits longer"),
    ];

    let analysis = analyze(&records);
    assert_eq!(
        analysis.recommendations[0].alternative_names,
        ["CR", "CVR", "Conversion %"]
    );
}

#[test]
fn unlisted_metrics_get_no_alternative_names() {
    let records = vec![
        record("Sales", "Widget Velocity", "Widgets per sprint"),
        record("Product", "Widget Velocity", "Widgets shipped per week"),
    ];

    let analysis = analyze(&records);
    assert!(analysis.recommendations[0].alternative_names.is_empty());
}

#[test]
fn empty_records_produce_empty_analysis() {
    let analysis = analyze(&[]);
    assert!(analysis.summaries.is_empty());
    assert!(analysis.conflicts.is_empty());
    assert!(analysis.translations.is_empty());
    assert!(analysis.recommendations.is_empty());
}
