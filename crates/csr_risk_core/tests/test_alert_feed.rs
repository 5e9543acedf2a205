//! Feed-level tests: ordering, determinism, deduplication, metrics.

mod common;

use common::{company, mixed_portfolio, project};
use csr_risk_core::PortfolioSnapshot;
use csr_risk_core::alerts::{
    AlertMetrics, AlertSummary, AlertThresholds, RuleKind, Severity, alerts_for_company,
    derive_alerts, derive_alerts_with_metrics, filter_by_severity,
};

#[test]
fn test_feed_is_deterministic() {
    let snap = mixed_portfolio();
    let first = derive_alerts(&snap);
    let second = derive_alerts(&snap);
    assert_eq!(first, second);
    let ids_a: Vec<String> = first.iter().map(|a| a.id.to_string()).collect();
    let ids_b: Vec<String> = second.iter().map(|a| a.id.to_string()).collect();
    assert_eq!(ids_a, ids_b);
}

#[test]
fn test_feed_is_sorted_by_severity_rank() {
    let alerts = derive_alerts(&mixed_portfolio());
    assert!(!alerts.is_empty());
    for pair in alerts.windows(2) {
        assert!(
            pair[0].severity.rank() <= pair[1].severity.rank(),
            "{:?} before {:?}",
            pair[0].severity,
            pair[1].severity
        );
    }
}

#[test]
fn test_equal_severity_keeps_generation_order() {
    let alerts = derive_alerts(&mixed_portfolio());
    let order: Vec<(RuleKind, &str)> = alerts
        .iter()
        .map(|a| (a.rule_kind, a.project_id.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            (RuleKind::CriticalRisk, "p2"),
            (RuleKind::BudgetOverrun, "p2"),
            // p1's elevated-risk was generated before p2's progress-delay
            (RuleKind::ElevatedRisk, "p1"),
            (RuleKind::ProgressDelay, "p2"),
            (RuleKind::HighValueModerateRisk, "p3"),
        ]
    );
}

#[test]
fn test_alert_id_independent_of_numeric_fields() {
    let before = PortfolioSnapshot::new(vec![company(
        "c1",
        vec![project("p1", 85.0, 90.0, 0.0, 0.0)],
    )]);
    let after = PortfolioSnapshot::new(vec![company(
        "c1",
        vec![project("p1", 97.0, 95.0, 0.0, 0.0)],
    )]);
    assert_eq!(derive_alerts(&before)[0].id, derive_alerts(&after)[0].id);
}

#[test]
fn test_alert_ids_distinct_across_rules_on_same_project() {
    let snap = PortfolioSnapshot::new(vec![company(
        "c1",
        vec![project("p1", 85.0, 40.0, 2_000_000.0, 1_900_000.0)],
    )]);
    let alerts = derive_alerts(&snap);
    assert_eq!(alerts.len(), 3);
    assert_ne!(alerts[0].id, alerts[1].id);
    assert_ne!(alerts[1].id, alerts[2].id);
    assert_ne!(alerts[0].id, alerts[2].id);
}

#[test]
fn test_duplicate_project_entries_do_not_duplicate_alerts() {
    let snap = PortfolioSnapshot::new(vec![company(
        "c1",
        vec![
            project("p1", 90.0, 95.0, 0.0, 0.0),
            project("p1", 90.0, 95.0, 0.0, 0.0),
        ],
    )]);
    let mut metrics = AlertMetrics::new();
    let alerts =
        derive_alerts_with_metrics(&snap, &AlertThresholds::default(), &mut metrics).unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(metrics.duplicates_suppressed_total(), 1);
    assert_eq!(metrics.projects_evaluated_total(), 2);
}

#[test]
fn test_same_project_id_in_different_companies_is_not_a_duplicate() {
    let snap = PortfolioSnapshot::new(vec![
        company("c1", vec![project("p1", 90.0, 95.0, 0.0, 0.0)]),
        company("c2", vec![project("p1", 90.0, 95.0, 0.0, 0.0)]),
    ]);
    assert_eq!(derive_alerts(&snap).len(), 2);
}

#[test]
fn test_metrics_count_emitted_rules_and_defaults() {
    let mut snap = mixed_portfolio();
    snap.companies[1]
        .projects
        .push(csr_risk_core::ProjectRecord::new("p5", "Bare"));
    let mut metrics = AlertMetrics::new();
    let alerts =
        derive_alerts_with_metrics(&snap, &AlertThresholds::default(), &mut metrics).unwrap();

    assert_eq!(metrics.emitted_all_rules_total(), alerts.len() as u64);
    assert_eq!(metrics.emitted_total(RuleKind::CriticalRisk), 1);
    assert_eq!(metrics.emitted_total(RuleKind::HighValueModerateRisk), 1);
    assert_eq!(metrics.projects_evaluated_total(), 5);
    assert_eq!(metrics.fields_defaulted_total(), 4);
}

#[test]
fn test_summary_and_filters() {
    let alerts = derive_alerts(&mixed_portfolio());
    let summary = AlertSummary::from_alerts(&alerts);
    assert_eq!(summary.count(Severity::Critical), 2);
    assert_eq!(summary.count(Severity::Medium), 2);
    assert_eq!(summary.count(Severity::Low), 1);
    assert_eq!(summary.total(), 5);

    let medium = filter_by_severity(&alerts, Severity::Medium);
    assert_eq!(medium.len(), 2);
    assert!(medium.iter().all(|a| a.severity == Severity::Medium));

    let c2 = alerts_for_company(&alerts, "c2");
    assert_eq!(c2.len(), 1);
    assert_eq!(c2[0].rule_kind, RuleKind::HighValueModerateRisk);
    assert!(alerts_for_company(&alerts, "missing").is_empty());
}

#[test]
fn test_snapshot_is_not_mutated() {
    let snap = mixed_portfolio();
    let copy = snap.clone();
    let _ = derive_alerts(&snap);
    assert_eq!(snap, copy);
}
