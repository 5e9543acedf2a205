//! Alert feed derivation.
//!
//! - Every `(company, project)` pair is checked against every rule.
//! - Alerts sharing an id (same rule, company and project) are emitted once.
//! - Output is stable-sorted by severity rank; equal severities keep
//!   generation order (company, then project, then rule table order).
//! - Pure: no clock, no randomness, snapshot is only borrowed.

use std::collections::HashSet;

use super::metrics::AlertMetrics;
use super::rules::{RuleKind, Severity};
use super::thresholds::{AlertThresholds, ThresholdError};
use crate::idempotency::{AlertId, AlertIdInput};
use crate::portfolio::{CompanyRecord, PortfolioSnapshot, ProjectRecord};

/// One flagged condition on one project.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: AlertId,
    pub severity: Severity,
    pub rule_kind: RuleKind,
    pub company_id: String,
    pub company_name: String,
    pub project_id: String,
    pub project_title: String,
    pub message: String,
    /// Triggering project's risk score (missing reads as zero).
    pub risk_score: f64,
}

impl Alert {
    fn new(rule: RuleKind, company: &CompanyRecord, project: &ProjectRecord) -> Self {
        let id = AlertId::from_input(&AlertIdInput {
            rule_kind: rule.as_str(),
            company_id: &company.company_id,
            project_id: &project.project_id,
        });
        Self {
            id,
            severity: rule.severity(),
            rule_kind: rule,
            company_id: company.company_id.clone(),
            company_name: company.company_name.clone(),
            project_id: project.project_id.clone(),
            project_title: project.project_title.clone(),
            message: rule.message(project),
            risk_score: project.risk_score(),
        }
    }
}

/// Derive the alert feed using default thresholds.
pub fn derive_alerts(snapshot: &PortfolioSnapshot) -> Vec<Alert> {
    collect_alerts(snapshot, &AlertThresholds::default(), None)
}

/// Derive the alert feed using explicit thresholds.
pub fn derive_alerts_with(
    snapshot: &PortfolioSnapshot,
    thresholds: &AlertThresholds,
) -> Result<Vec<Alert>, ThresholdError> {
    thresholds.validate()?;
    Ok(collect_alerts(snapshot, thresholds, None))
}

/// Derive the alert feed and record counters into `metrics`.
pub fn derive_alerts_with_metrics(
    snapshot: &PortfolioSnapshot,
    thresholds: &AlertThresholds,
    metrics: &mut AlertMetrics,
) -> Result<Vec<Alert>, ThresholdError> {
    thresholds.validate()?;
    Ok(collect_alerts(snapshot, thresholds, Some(metrics)))
}

fn collect_alerts(
    snapshot: &PortfolioSnapshot,
    thresholds: &AlertThresholds,
    mut metrics: Option<&mut AlertMetrics>,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let mut seen: HashSet<AlertId> = HashSet::new();
    let mut duplicates = 0usize;

    for (company, project) in snapshot.projects() {
        if let Some(m) = metrics.as_deref_mut() {
            m.record_project(project.missing_field_count());
        }
        for rule in RuleKind::ALL {
            if !rule.fires(project, thresholds) {
                continue;
            }
            let alert = Alert::new(rule, company, project);
            if !seen.insert(alert.id) {
                duplicates += 1;
                if let Some(m) = metrics.as_deref_mut() {
                    m.record_duplicate();
                }
                continue;
            }
            if let Some(m) = metrics.as_deref_mut() {
                m.record_emitted(rule);
            }
            alerts.push(alert);
        }
    }

    // sort_by_key is stable: equal severities keep generation order.
    alerts.sort_by_key(|a| a.severity.rank());

    tracing::debug!(
        "derive_alerts projects={} alerts={} duplicates_suppressed={}",
        snapshot.project_count(),
        alerts.len(),
        duplicates
    );
    alerts
}

// --- Feed utilities ------------------------------------------------------

/// Alert counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertSummary {
    pub critical: usize,
    pub medium: usize,
    pub low: usize,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        let mut summary = Self::default();
        for alert in alerts {
            match alert.severity {
                Severity::Critical => summary.critical += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
        }
        summary
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.medium + self.low
    }
}

/// Alerts of one severity, feed order preserved.
pub fn filter_by_severity(alerts: &[Alert], severity: Severity) -> Vec<&Alert> {
    alerts.iter().filter(|a| a.severity == severity).collect()
}

/// Alerts raised on one company's projects, feed order preserved.
pub fn alerts_for_company<'a>(alerts: &'a [Alert], company_id: &str) -> Vec<&'a Alert> {
    alerts.iter().filter(|a| a.company_id == company_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_each_severity() {
        let done = |id: &str, risk: f64| {
            ProjectRecord::new(id, id)
                .with_risk_score(risk)
                .with_progress(100.0)
        };
        let snap = PortfolioSnapshot::new(vec![
            CompanyRecord::new("c1", "Acme")
                .with_project(done("p1", 90.0))
                .with_project(done("p2", 65.0)),
        ]);
        let alerts = derive_alerts(&snap);
        let summary = AlertSummary::from_alerts(&alerts);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.medium, 1);
        assert_eq!(summary.low, 0);
        assert_eq!(summary.total(), alerts.len());
    }
}
