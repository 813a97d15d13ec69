use kpi_core::core::scenarios::{build_scenarios, classify, Concept};
use kpi_core::core::types::KpiRecord;

fn record(team: &str, name: &str, definition: &str) -> KpiRecord {
    KpiRecord::new(team, name, definition)
}

#[test]
fn classification_is_multi_label() {
    let kpi = record(
        "Customer Success",
        "Engagement Score",
        "Weighted mix of product logins, support interactions and webinar attendance",
    );

    let concepts = classify(&kpi);
    // "login"/"webinar" in the definition plus "engagement" in the name.
    assert!(concepts.contains(&Concept::Engagement));
    // "support" in the definition plus the team containing "success".
    assert!(concepts.contains(&Concept::CustomerSuccess));
}

#[test]
fn team_rules_apply_for_success_and_finance() {
    let success = record("Client Success", "Renewals", "Contracts extended this quarter");
    assert!(classify(&success).contains(&Concept::CustomerSuccess));

    let finance = record("Finance", "Run Rate", "Annualized current quarter");
    assert!(classify(&finance).contains(&Concept::Revenue));

    // The revenue team rule is an exact match, unlike the success rule.
    let adjacent = record("Finance Ops", "Run Rate", "Annualized current quarter");
    assert!(!classify(&adjacent).contains(&Concept::Revenue));
}

#[test]
fn unrelated_records_classify_nowhere() {
    let kpi = record("Legal", "Contract Redlines", "Edits per agreement draft");
    assert!(classify(&kpi).is_empty());
}

#[test]
fn buckets_under_two_records_are_dropped() {
    let records = vec![
        record("Finance", "MRR", "Monthly recurring revenue total"),
        record("Marketing", "Engagement Rate", "Clicks over sends in campaign email"),
        record("Data", "Session Duration", "Average session length"),
    ];

    let scenarios = build_scenarios(&records);
    // Engagement collects both the email and the session records; revenue
    // holds only the MRR record and is dropped.
    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0].concept, Concept::Engagement);
    assert_eq!(scenarios[0].metrics.len(), 2);
}

#[test]
fn titles_use_the_spaced_concept_name() {
    let records = vec![
        record("Product", "Feature Adoption", "New feature usage share"),
        record("Product", "Activation Rate", "Completed onboarding steps"),
    ];

    let scenarios = build_scenarios(&records);
    let user_activity = scenarios
        .iter()
        .find(|s| s.concept == Concept::UserActivity)
        .unwrap();
    assert_eq!(user_activity.title, "Conflict in user activity measurement");
}

#[test]
fn scenario_order_follows_concept_order() {
    let records = vec![
        record("Finance", "CLV", "Average revenue per account lifetime"),
        record("Finance", "CAC", "Acquisition cost per customer"),
        record("Marketing", "Engagement Rate", "Email click share"),
        record("Data", "Engagement Rate", "Average session duration"),
    ];

    let scenarios = build_scenarios(&records);
    let concepts: Vec<Concept> = scenarios.iter().map(|s| s.concept).collect();
    assert_eq!(concepts, [Concept::Engagement, Concept::Revenue]);
}

#[test]
fn metrics_keep_arrival_order_within_a_bucket() {
    let records = vec![
        record("Marketing", "First", "webinar attendance share"),
        record("Data", "Second", "average session duration"),
        record("Product", "Third", "login streak length"),
    ];

    let scenarios = build_scenarios(&records);
    let names: Vec<&str> = scenarios[0]
        .metrics
        .iter()
        .map(|m| m.metric_name.as_str())
        .collect();
    assert_eq!(names, ["First", "Second", "Third"]);
}

#[test]
fn narratives_come_with_team_pairings() {
    let records = vec![
        record("Marketing", "Engagement Rate", "Email click share"),
        record("Data", "Engagement Rate", "Average session duration"),
    ];

    let scenarios = build_scenarios(&records);
    let engagement = &scenarios[0];
    assert!(engagement
        .real_world_example
        .contains("watches a demo video"));
    assert_eq!(engagement.conflict_details.len(), 2);
    assert_eq!(engagement.conflict_details[0].teams, ["Marketing", "Data"]);
    assert!(engagement.conflict_details[0]
        .conflict
        .contains("Session Duration"));
}

#[test]
fn no_records_no_scenarios() {
    assert!(build_scenarios(&[]).is_empty());
}
