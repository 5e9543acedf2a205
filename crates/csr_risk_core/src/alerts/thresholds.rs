//! Policy thresholds for alert rules.
//!
//! **Defaults** (product-defined, kept for behavioral fidelity):
//! - critical risk: `risk_score >= 80`
//! - elevated risk: `60 <= risk_score < 80`
//! - moderate risk: `40 <= risk_score < 60`
//! - budget overrun: `spent > budget * 0.90` while `progress < 80`
//! - progress delay: `progress < 50` while `risk_score > 60`
//! - high value: `budget > 1_000_000`

use std::fmt;

/// Thresholds consumed by the rule table and by risk banding.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertThresholds {
    /// Inclusive lower bound of the critical band (default: 80).
    pub critical_risk_score: f64,
    /// Inclusive lower bound of the elevated band (default: 60).
    pub elevated_risk_score: f64,
    /// Inclusive lower bound of the moderate band (default: 40).
    pub moderate_risk_score: f64,
    /// Spend/budget ratio above which spend counts as overrun (default: 0.90).
    pub budget_overrun_spend_ratio: f64,
    /// Progress below which an overrun is flagged (default: 80).
    pub budget_overrun_progress_max: f64,
    /// Progress below which a risky project counts as delayed (default: 50).
    pub progress_delay_max: f64,
    /// Exclusive risk floor for the delay rule (default: 60).
    pub progress_delay_risk_floor: f64,
    /// Exclusive budget floor for "high value" (default: 1_000_000).
    pub high_value_budget: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            critical_risk_score: 80.0,
            elevated_risk_score: 60.0,
            moderate_risk_score: 40.0,
            budget_overrun_spend_ratio: 0.90,
            budget_overrun_progress_max: 80.0,
            progress_delay_max: 50.0,
            progress_delay_risk_floor: 60.0,
            high_value_budget: 1_000_000.0,
        }
    }
}

/// Rejected threshold set.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdError {
    pub field: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid alert threshold '{}': {}", self.field, self.reason)
    }
}

impl std::error::Error for ThresholdError {}

impl AlertThresholds {
    fn named_values(&self) -> [(&'static str, f64); 8] {
        [
            ("critical_risk_score", self.critical_risk_score),
            ("elevated_risk_score", self.elevated_risk_score),
            ("moderate_risk_score", self.moderate_risk_score),
            ("budget_overrun_spend_ratio", self.budget_overrun_spend_ratio),
            ("budget_overrun_progress_max", self.budget_overrun_progress_max),
            ("progress_delay_max", self.progress_delay_max),
            ("progress_delay_risk_floor", self.progress_delay_risk_floor),
            ("high_value_budget", self.high_value_budget),
        ]
    }

    /// Reject non-finite or negative values and out-of-order risk bands.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        for (field, value) in self.named_values() {
            if !value.is_finite() {
                return Err(ThresholdError {
                    field,
                    reason: "value is non-finite (NaN or Infinity)",
                });
            }
            if value < 0.0 {
                return Err(ThresholdError {
                    field,
                    reason: "value is negative",
                });
            }
        }
        if self.moderate_risk_score > self.elevated_risk_score {
            return Err(ThresholdError {
                field: "moderate_risk_score",
                reason: "must not exceed elevated_risk_score",
            });
        }
        if self.elevated_risk_score > self.critical_risk_score {
            return Err(ThresholdError {
                field: "elevated_risk_score",
                reason: "must not exceed critical_risk_score",
            });
        }
        Ok(())
    }
}
