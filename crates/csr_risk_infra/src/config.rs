//! Alert policy configuration with fail-safe defaults.
//!
//! Every threshold used by the rule table is a named parameter with a
//! built-in default. A parameter absent from runtime config takes its
//! default; a parameter present with a non-finite or negative value is
//! rejected rather than silently replaced.

use std::fmt;

use csr_risk_core::alerts::{AlertThresholds, ThresholdError};
use serde::Deserialize;

/// Alert policy parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigParam {
    // Risk score bands
    CriticalRiskScore,
    ElevatedRiskScore,
    ModerateRiskScore,

    // Budget overrun
    BudgetOverrunSpendRatio,
    BudgetOverrunProgressMax,

    // Progress delay
    ProgressDelayMax,
    ProgressDelayRiskFloor,

    // High-value projects
    HighValueBudget,
}

/// Configuration failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A supplied value cannot be used.
    InvalidValue {
        param_name: &'static str,
        reason: &'static str,
    },
    /// Override document is not valid JSON or has unknown keys.
    Malformed(String),
    /// Values are individually valid but inconsistent as a set.
    Inconsistent(ThresholdError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { param_name, reason } => {
                write!(f, "config rejected: '{param_name}' {reason}")
            }
            ConfigError::Malformed(detail) => write!(f, "config overrides malformed: {detail}"),
            ConfigError::Inconsistent(err) => write!(f, "config inconsistent: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Inconsistent(err) => Some(err),
            _ => None,
        }
    }
}

/// Returns the built-in default for a parameter.
pub fn default_value(param: ConfigParam) -> f64 {
    let t = AlertThresholds::default();
    match param {
        ConfigParam::CriticalRiskScore => t.critical_risk_score,
        ConfigParam::ElevatedRiskScore => t.elevated_risk_score,
        ConfigParam::ModerateRiskScore => t.moderate_risk_score,
        ConfigParam::BudgetOverrunSpendRatio => t.budget_overrun_spend_ratio,
        ConfigParam::BudgetOverrunProgressMax => t.budget_overrun_progress_max,
        ConfigParam::ProgressDelayMax => t.progress_delay_max,
        ConfigParam::ProgressDelayRiskFloor => t.progress_delay_risk_floor,
        ConfigParam::HighValueBudget => t.high_value_budget,
    }
}

/// Returns the snake_case name for a parameter (matches override keys).
pub fn param_name(param: ConfigParam) -> &'static str {
    match param {
        ConfigParam::CriticalRiskScore => "critical_risk_score",
        ConfigParam::ElevatedRiskScore => "elevated_risk_score",
        ConfigParam::ModerateRiskScore => "moderate_risk_score",
        ConfigParam::BudgetOverrunSpendRatio => "budget_overrun_spend_ratio",
        ConfigParam::BudgetOverrunProgressMax => "budget_overrun_progress_max",
        ConfigParam::ProgressDelayMax => "progress_delay_max",
        ConfigParam::ProgressDelayRiskFloor => "progress_delay_risk_floor",
        ConfigParam::HighValueBudget => "high_value_budget",
    }
}

/// Expected number of ConfigParam variants. Update when adding new variants.
pub const EXPECTED_PARAM_COUNT: usize = 8;

/// All known `ConfigParam` variants (for exhaustive iteration in tests).
pub const ALL_PARAMS: &[ConfigParam] = &[
    ConfigParam::CriticalRiskScore,
    ConfigParam::ElevatedRiskScore,
    ConfigParam::ModerateRiskScore,
    ConfigParam::BudgetOverrunSpendRatio,
    ConfigParam::BudgetOverrunProgressMax,
    ConfigParam::ProgressDelayMax,
    ConfigParam::ProgressDelayRiskFloor,
    ConfigParam::HighValueBudget,
];

/// Resolve a configuration value.
///
/// - `Some(v)` wins over the default, provided it is finite and non-negative.
/// - `None` resolves to the built-in default.
pub fn resolve_config_value(param: ConfigParam, value: Option<f64>) -> Result<f64, ConfigError> {
    let Some(v) = value else {
        return Ok(default_value(param));
    };
    if !v.is_finite() {
        return Err(ConfigError::InvalidValue {
            param_name: param_name(param),
            reason: "is non-finite (NaN or Infinity)",
        });
    }
    if v < 0.0 {
        return Err(ConfigError::InvalidValue {
            param_name: param_name(param),
            reason: "is negative; all thresholds must be non-negative",
        });
    }
    Ok(v)
}

/// Partial threshold overrides, keyed by `param_name`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdOverrides {
    #[serde(default)]
    pub critical_risk_score: Option<f64>,
    #[serde(default)]
    pub elevated_risk_score: Option<f64>,
    #[serde(default)]
    pub moderate_risk_score: Option<f64>,
    #[serde(default)]
    pub budget_overrun_spend_ratio: Option<f64>,
    #[serde(default)]
    pub budget_overrun_progress_max: Option<f64>,
    #[serde(default)]
    pub progress_delay_max: Option<f64>,
    #[serde(default)]
    pub progress_delay_risk_floor: Option<f64>,
    #[serde(default)]
    pub high_value_budget: Option<f64>,
}

impl ThresholdOverrides {
    /// Parse overrides from a JSON object. Unknown keys are rejected.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    pub fn get(&self, param: ConfigParam) -> Option<f64> {
        match param {
            ConfigParam::CriticalRiskScore => self.critical_risk_score,
            ConfigParam::ElevatedRiskScore => self.elevated_risk_score,
            ConfigParam::ModerateRiskScore => self.moderate_risk_score,
            ConfigParam::BudgetOverrunSpendRatio => self.budget_overrun_spend_ratio,
            ConfigParam::BudgetOverrunProgressMax => self.budget_overrun_progress_max,
            ConfigParam::ProgressDelayMax => self.progress_delay_max,
            ConfigParam::ProgressDelayRiskFloor => self.progress_delay_risk_floor,
            ConfigParam::HighValueBudget => self.high_value_budget,
        }
    }

    /// Resolve every parameter and validate the resulting set.
    pub fn resolve(&self) -> Result<AlertThresholds, ConfigError> {
        let r = |param| resolve_config_value(param, self.get(param));
        let thresholds = AlertThresholds {
            critical_risk_score: r(ConfigParam::CriticalRiskScore)?,
            elevated_risk_score: r(ConfigParam::ElevatedRiskScore)?,
            moderate_risk_score: r(ConfigParam::ModerateRiskScore)?,
            budget_overrun_spend_ratio: r(ConfigParam::BudgetOverrunSpendRatio)?,
            budget_overrun_progress_max: r(ConfigParam::BudgetOverrunProgressMax)?,
            progress_delay_max: r(ConfigParam::ProgressDelayMax)?,
            progress_delay_risk_floor: r(ConfigParam::ProgressDelayRiskFloor)?,
            high_value_budget: r(ConfigParam::HighValueBudget)?,
        };
        thresholds.validate().map_err(ConfigError::Inconsistent)?;
        for &param in ALL_PARAMS {
            if let Some(v) = self.get(param) {
                tracing::debug!("threshold override {}={}", param_name(param), v);
            }
        }
        Ok(thresholds)
    }
}

/// Parse and resolve a JSON override document in one step.
pub fn load_thresholds_json(raw: &str) -> Result<AlertThresholds, ConfigError> {
    ThresholdOverrides::from_json(raw)?.resolve()
}
