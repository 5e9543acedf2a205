//! Presentation export: the JSON the dashboard's alert panel and risk meter
//! consume.
//!
//! Output shape (camelCase keys, kebab-case rule kinds):
//!
//! ```text
//! {
//!   "alerts": [{ "id", "severity", "type", "companyId", "company",
//!                "projectId", "project", "message", "riskScore",
//!                "riskBand" }],
//!   "summary": { "critical", "medium", "low", "total" },
//!   "portfolioRiskScore": <rounded mean>,
//!   "riskDistribution": { "critical", "high", "moderate", "low" }
//! }
//! ```

use std::fmt;

use csr_risk_core::alerts::{
    Alert, AlertSummary, AlertThresholds, ThresholdError, derive_alerts_with,
};
use csr_risk_core::portfolio::PortfolioSnapshot;
use csr_risk_core::risk::{PortfolioRiskProfile, RiskBand, RiskDistribution};
use serde::Serialize;

use crate::provider::{SnapshotError, decode_snapshot};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertView {
    pub id: String,
    pub severity: &'static str,
    #[serde(rename = "type")]
    pub rule_kind: &'static str,
    pub company_id: String,
    #[serde(rename = "company")]
    pub company_name: String,
    pub project_id: String,
    #[serde(rename = "project")]
    pub project_title: String,
    pub message: String,
    pub risk_score: f64,
    /// Band of `risk_score` under the thresholds the feed was built with.
    pub risk_band: &'static str,
}

impl AlertView {
    pub fn new(a: &Alert, thresholds: &AlertThresholds) -> Self {
        Self {
            id: a.id.to_string(),
            severity: a.severity.as_str(),
            rule_kind: a.rule_kind.as_str(),
            company_id: a.company_id.clone(),
            company_name: a.company_name.clone(),
            project_id: a.project_id.clone(),
            project_title: a.project_title.clone(),
            message: a.message.clone(),
            risk_score: a.risk_score,
            risk_band: RiskBand::classify(a.risk_score, thresholds).as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub critical: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl From<AlertSummary> for SummaryView {
    fn from(s: AlertSummary) -> Self {
        Self {
            critical: s.critical,
            medium: s.medium,
            low: s.low,
            total: s.total(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistributionView {
    pub critical: usize,
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
}

impl From<RiskDistribution> for DistributionView {
    fn from(d: RiskDistribution) -> Self {
        Self {
            critical: d.critical,
            high: d.high,
            moderate: d.moderate,
            low: d.low,
        }
    }
}

/// Everything the alert panel and risk meter render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertFeedView {
    pub alerts: Vec<AlertView>,
    pub summary: SummaryView,
    pub portfolio_risk_score: i64,
    pub risk_distribution: DistributionView,
}

impl AlertFeedView {
    pub fn build(
        snapshot: &PortfolioSnapshot,
        thresholds: &AlertThresholds,
    ) -> Result<Self, ThresholdError> {
        let alerts = derive_alerts_with(snapshot, thresholds)?;
        let profile = PortfolioRiskProfile::from_snapshot(snapshot, thresholds);
        Ok(Self {
            summary: AlertSummary::from_alerts(&alerts).into(),
            alerts: alerts.iter().map(|a| AlertView::new(a, thresholds)).collect(),
            portfolio_risk_score: profile.aggregate.rounded(),
            risk_distribution: profile.distribution.into(),
        })
    }
}

/// Failure anywhere in the payload-to-feed pipeline.
#[derive(Debug)]
pub enum RenderError {
    Snapshot(SnapshotError),
    Threshold(ThresholdError),
    Encode(serde_json::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Snapshot(e) => write!(f, "{e}"),
            RenderError::Threshold(e) => write!(f, "{e}"),
            RenderError::Encode(e) => write!(f, "failed to encode alert feed: {e}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Snapshot(e) => Some(e),
            RenderError::Threshold(e) => Some(e),
            RenderError::Encode(e) => Some(e),
        }
    }
}

impl From<SnapshotError> for RenderError {
    fn from(e: SnapshotError) -> Self {
        RenderError::Snapshot(e)
    }
}

impl From<ThresholdError> for RenderError {
    fn from(e: ThresholdError) -> Self {
        RenderError::Threshold(e)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        RenderError::Encode(e)
    }
}

/// Provider JSON in, presentation JSON out.
pub fn render_alert_feed(raw: &str, thresholds: &AlertThresholds) -> Result<String, RenderError> {
    let decoded = decode_snapshot(raw)?;
    let view = AlertFeedView::build(&decoded.snapshot, thresholds)?;
    Ok(serde_json::to_string(&view)?)
}
