//! Alert rule table.
//!
//! Rules are independent: a project may trip any subset of them, and each
//! tripped rule yields its own alert.
//!
//! | rule                       | condition                                   | severity |
//! |----------------------------|---------------------------------------------|----------|
//! | `critical-risk`            | `risk >= critical`                          | critical |
//! | `budget-overrun`           | `spent > budget * ratio && progress < max`  | critical |
//! | `progress-delay`           | `progress < delay_max && risk > delay_floor`| medium   |
//! | `elevated-risk`            | `elevated <= risk < critical`               | medium   |
//! | `high-value-moderate-risk` | `moderate <= risk < elevated && budget > hv`| low      |

use super::thresholds::AlertThresholds;
use crate::portfolio::ProjectRecord;

/// Alert severity. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Medium, Severity::Low];

    /// Sort rank: critical=0, medium=1, low=2.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

/// Rule identifier carried by every alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    CriticalRisk,
    BudgetOverrun,
    ProgressDelay,
    ElevatedRisk,
    HighValueModerateRisk,
}

impl RuleKind {
    /// Evaluation order. Also the generation order within one project.
    pub const ALL: [RuleKind; 5] = [
        RuleKind::CriticalRisk,
        RuleKind::BudgetOverrun,
        RuleKind::ProgressDelay,
        RuleKind::ElevatedRisk,
        RuleKind::HighValueModerateRisk,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::CriticalRisk => "critical-risk",
            RuleKind::BudgetOverrun => "budget-overrun",
            RuleKind::ProgressDelay => "progress-delay",
            RuleKind::ElevatedRisk => "elevated-risk",
            RuleKind::HighValueModerateRisk => "high-value-moderate-risk",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            RuleKind::CriticalRisk | RuleKind::BudgetOverrun => Severity::Critical,
            RuleKind::ProgressDelay | RuleKind::ElevatedRisk => Severity::Medium,
            RuleKind::HighValueModerateRisk => Severity::Low,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            RuleKind::CriticalRisk => 0,
            RuleKind::BudgetOverrun => 1,
            RuleKind::ProgressDelay => 2,
            RuleKind::ElevatedRisk => 3,
            RuleKind::HighValueModerateRisk => 4,
        }
    }

    /// Whether this rule trips for `project`. Missing fields read as zero.
    pub fn fires(self, project: &ProjectRecord, t: &AlertThresholds) -> bool {
        let risk = project.risk_score();
        match self {
            RuleKind::CriticalRisk => risk >= t.critical_risk_score,
            RuleKind::BudgetOverrun => {
                let budget = project.budget();
                // Zero budget has no spend ratio. NaN already compares false.
                if budget == 0.0 {
                    return false;
                }
                project.spent_amount() > budget * t.budget_overrun_spend_ratio
                    && project.progress_percentage() < t.budget_overrun_progress_max
            }
            RuleKind::ProgressDelay => {
                project.progress_percentage() < t.progress_delay_max
                    && risk > t.progress_delay_risk_floor
            }
            RuleKind::ElevatedRisk => {
                risk >= t.elevated_risk_score && risk < t.critical_risk_score
            }
            RuleKind::HighValueModerateRisk => {
                risk >= t.moderate_risk_score
                    && risk < t.elevated_risk_score
                    && project.budget() > t.high_value_budget
            }
        }
    }

    /// Human-readable alert text built from the project's numeric fields.
    pub fn message(self, project: &ProjectRecord) -> String {
        let risk = project.risk_score();
        let progress = project.progress_percentage();
        match self {
            RuleKind::CriticalRisk => {
                format!("Risk score of {risk:.0} requires immediate attention")
            }
            RuleKind::BudgetOverrun => {
                let used_pct = project.spent_amount() / project.budget() * 100.0;
                format!("Budget {used_pct:.0}% utilized with only {progress:.0}% progress")
            }
            RuleKind::ProgressDelay => {
                format!("Progress at {progress:.0}% with elevated risk score of {risk:.0}")
            }
            RuleKind::ElevatedRisk => {
                format!("Risk score of {risk:.0} is elevated and should be monitored")
            }
            RuleKind::HighValueModerateRisk => format!(
                "Moderate risk score of {risk:.0} on a high-value budget of {:.0}",
                project.budget()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(risk: f64, progress: f64, budget: f64, spent: f64) -> ProjectRecord {
        ProjectRecord::new("p", "P")
            .with_risk_score(risk)
            .with_progress(progress)
            .with_budget(budget)
            .with_spent(spent)
    }

    #[test]
    fn severity_rank_matches_declaration_order() {
        let ranks: Vec<u8> = Severity::ALL.iter().map(|s| s.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
        assert!(Severity::Critical < Severity::Low);
    }

    #[test]
    fn band_boundaries() {
        let t = AlertThresholds::default();
        assert!(RuleKind::CriticalRisk.fires(&project(80.0, 100.0, 0.0, 0.0), &t));
        assert!(!RuleKind::ElevatedRisk.fires(&project(80.0, 100.0, 0.0, 0.0), &t));
        assert!(RuleKind::ElevatedRisk.fires(&project(60.0, 100.0, 0.0, 0.0), &t));
        assert!(!RuleKind::ElevatedRisk.fires(&project(59.9, 100.0, 0.0, 0.0), &t));
    }

    #[test]
    fn progress_delay_floor_is_exclusive() {
        let t = AlertThresholds::default();
        assert!(!RuleKind::ProgressDelay.fires(&project(60.0, 10.0, 0.0, 0.0), &t));
        assert!(RuleKind::ProgressDelay.fires(&project(61.0, 10.0, 0.0, 0.0), &t));
    }

    #[test]
    fn negative_budget_evaluated_as_given() {
        let t = AlertThresholds::default();
        // 50 > -100 * 0.9 and 10 < 80
        assert!(RuleKind::BudgetOverrun.fires(&project(0.0, 10.0, -100.0, 50.0), &t));
    }

    #[test]
    fn nan_budget_never_overruns() {
        let t = AlertThresholds::default();
        assert!(!RuleKind::BudgetOverrun.fires(&project(0.0, 10.0, f64::NAN, 50.0), &t));
    }

    #[test]
    fn overrun_message_reports_utilization() {
        let msg = RuleKind::BudgetOverrun.message(&project(85.0, 40.0, 2_000_000.0, 1_900_000.0));
        assert_eq!(msg, "Budget 95% utilized with only 40% progress");
    }
}
