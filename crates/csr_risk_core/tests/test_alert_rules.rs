//! Rule table tests: thresholds, zero-budget guard, missing fields.

mod common;

use common::{company, project, quiet_project};
use csr_risk_core::alerts::{RuleKind, Severity, derive_alerts};
use csr_risk_core::{PortfolioSnapshot, ProjectRecord};

fn kinds_for(p: ProjectRecord) -> Vec<RuleKind> {
    let snap = PortfolioSnapshot::new(vec![company("c1", vec![p])]);
    derive_alerts(&snap).iter().map(|a| a.rule_kind).collect()
}

#[test]
fn test_empty_snapshot_yields_no_alerts() {
    assert!(derive_alerts(&PortfolioSnapshot::default()).is_empty());
}

#[test]
fn test_company_without_projects_yields_no_alerts() {
    let snap = PortfolioSnapshot::new(vec![company("c1", Vec::new())]);
    assert!(derive_alerts(&snap).is_empty());
}

#[test]
fn test_quiet_project_yields_no_alerts() {
    assert!(kinds_for(quiet_project("p1")).is_empty());
}

#[test]
fn test_multi_rule_project_emits_three_distinct_alerts() {
    let kinds = kinds_for(project("p1", 85.0, 40.0, 2_000_000.0, 1_900_000.0));
    assert_eq!(kinds.len(), 3);
    assert!(kinds.contains(&RuleKind::CriticalRisk));
    assert!(kinds.contains(&RuleKind::BudgetOverrun));
    assert!(kinds.contains(&RuleKind::ProgressDelay));
}

#[test]
fn test_zero_budget_never_triggers_overrun() {
    let kinds = kinds_for(project("p1", 0.0, 10.0, 0.0, 500.0));
    assert!(!kinds.contains(&RuleKind::BudgetOverrun));
}

#[test]
fn test_missing_budget_never_triggers_overrun() {
    let p = ProjectRecord::new("p1", "No budget")
        .with_spent(500.0)
        .with_progress(10.0);
    assert!(kinds_for(p).is_empty());
}

#[test]
fn test_overrun_requires_spend_strictly_above_ratio() {
    // 900 == 1000 * 0.9 is not "above"
    let at_ratio = kinds_for(project("p1", 0.0, 10.0, 1000.0, 900.0));
    assert!(!at_ratio.contains(&RuleKind::BudgetOverrun));
    let above_ratio = kinds_for(project("p1", 0.0, 10.0, 1000.0, 901.0));
    assert!(above_ratio.contains(&RuleKind::BudgetOverrun));
}

#[test]
fn test_overrun_suppressed_once_progress_reaches_80() {
    let kinds = kinds_for(project("p1", 0.0, 80.0, 1000.0, 1500.0));
    assert!(!kinds.contains(&RuleKind::BudgetOverrun));
}

#[test]
fn test_missing_risk_score_triggers_no_risk_rule() {
    let p = ProjectRecord::new("p1", "Unscored")
        .with_progress(10.0)
        .with_budget(5_000_000.0)
        .with_spent(0.0);
    assert!(kinds_for(p).is_empty());
}

#[test]
fn test_elevated_band_is_half_open() {
    assert_eq!(
        kinds_for(project("p1", 60.0, 90.0, 0.0, 0.0)),
        vec![RuleKind::ElevatedRisk]
    );
    assert_eq!(
        kinds_for(project("p1", 79.99, 90.0, 0.0, 0.0)),
        vec![RuleKind::ElevatedRisk]
    );
    assert_eq!(
        kinds_for(project("p1", 80.0, 90.0, 0.0, 0.0)),
        vec![RuleKind::CriticalRisk]
    );
}

#[test]
fn test_high_value_moderate_requires_budget_above_one_million() {
    assert!(kinds_for(project("p1", 45.0, 90.0, 1_000_000.0, 0.0)).is_empty());
    assert_eq!(
        kinds_for(project("p1", 45.0, 90.0, 1_000_001.0, 0.0)),
        vec![RuleKind::HighValueModerateRisk]
    );
}

#[test]
fn test_out_of_range_scores_are_not_clamped() {
    // 150 is processed as given: still >= 80.
    assert_eq!(
        kinds_for(project("p1", 150.0, 90.0, 0.0, 0.0)),
        vec![RuleKind::CriticalRisk]
    );
    assert!(kinds_for(project("p1", -20.0, 90.0, 0.0, 0.0)).is_empty());
}

#[test]
fn test_nan_fields_trip_nothing() {
    assert!(kinds_for(project("p1", f64::NAN, f64::NAN, f64::NAN, f64::NAN)).is_empty());
}

#[test]
fn test_alert_carries_denormalized_fields() {
    let snap = PortfolioSnapshot::new(vec![company(
        "c9",
        vec![project("p7", 92.0, 95.0, 0.0, 0.0)],
    )]);
    let alerts = derive_alerts(&snap);
    assert_eq!(alerts.len(), 1);
    let a = &alerts[0];
    assert_eq!(a.severity, Severity::Critical);
    assert_eq!(a.company_name, "Company c9");
    assert_eq!(a.project_title, "Project p7");
    assert_eq!(a.risk_score, 92.0);
    assert_eq!(a.message, "Risk score of 92 requires immediate attention");
}

#[test]
fn test_negative_budget_evaluated_without_clamping() {
    let kinds = kinds_for(project("p1", 0.0, 10.0, -100.0, 50.0));
    assert_eq!(kinds, vec![RuleKind::BudgetOverrun]);
}
