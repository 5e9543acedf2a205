//! Rule-based alert derivation over a portfolio snapshot.

pub mod feed;
pub mod metrics;
pub mod rules;
pub mod thresholds;

pub use feed::{
    Alert, AlertSummary, alerts_for_company, derive_alerts, derive_alerts_with,
    derive_alerts_with_metrics, filter_by_severity,
};
pub use metrics::AlertMetrics;
pub use rules::{RuleKind, Severity};
pub use thresholds::{AlertThresholds, ThresholdError};
