//! Portfolio risk profile: banding, distribution, rankings.
//!
//! Bands reuse the alert thresholds so a project's band always agrees with
//! the risk-score rule it trips:
//! - Critical: `risk >= critical_risk_score`
//! - High: `elevated_risk_score <= risk < critical_risk_score`
//! - Moderate: `moderate_risk_score <= risk < elevated_risk_score`
//! - Low: everything else (including NaN)

use super::aggregate::{AggregateRiskScore, aggregate_risk_score, mean_risk};
use crate::alerts::AlertThresholds;
use crate::portfolio::{CompanyRecord, PortfolioSnapshot, ProjectRecord};

/// Coarse classification of one project's risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskBand {
    Critical,
    High,
    Moderate,
    Low,
}

impl RiskBand {
    pub fn classify(risk_score: f64, t: &AlertThresholds) -> Self {
        if risk_score >= t.critical_risk_score {
            RiskBand::Critical
        } else if risk_score >= t.elevated_risk_score {
            RiskBand::High
        } else if risk_score >= t.moderate_risk_score {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskBand::Critical => "critical",
            RiskBand::High => "high",
            RiskBand::Moderate => "moderate",
            RiskBand::Low => "low",
        }
    }
}

/// Project counts per risk band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskDistribution {
    pub critical: usize,
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
}

impl RiskDistribution {
    pub fn from_snapshot(snapshot: &PortfolioSnapshot, t: &AlertThresholds) -> Self {
        let mut dist = Self::default();
        for (_, project) in snapshot.projects() {
            dist.record(RiskBand::classify(project.risk_score(), t));
        }
        dist
    }

    fn record(&mut self, band: RiskBand) {
        match band {
            RiskBand::Critical => self.critical += 1,
            RiskBand::High => self.high += 1,
            RiskBand::Moderate => self.moderate += 1,
            RiskBand::Low => self.low += 1,
        }
    }

    pub fn count(&self, band: RiskBand) -> usize {
        match band {
            RiskBand::Critical => self.critical,
            RiskBand::High => self.high,
            RiskBand::Moderate => self.moderate,
            RiskBand::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.moderate + self.low
    }
}

/// A project paired with its owning company, borrowed from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedProject<'a> {
    pub company: &'a CompanyRecord,
    pub project: &'a ProjectRecord,
}

impl RankedProject<'_> {
    pub fn risk_score(&self) -> f64 {
        self.project.risk_score()
    }
}

/// NaN ranks below every real score, matching `RiskBand::classify`.
fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

/// The `limit` riskiest projects, highest first. Ties keep input order.
pub fn top_risk_projects(snapshot: &PortfolioSnapshot, limit: usize) -> Vec<RankedProject<'_>> {
    let mut ranked: Vec<RankedProject<'_>> = snapshot
        .projects()
        .map(|(company, project)| RankedProject { company, project })
        .collect();
    ranked.sort_by(|a, b| rank_key(b.risk_score()).total_cmp(&rank_key(a.risk_score())));
    ranked.truncate(limit);
    ranked
}

/// Mean risk of one company's projects.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRiskScore {
    pub company_id: String,
    pub company_name: String,
    pub score: AggregateRiskScore,
}

/// Per-company mean risk, in snapshot order. Companies without projects
/// score zero.
pub fn company_risk_scores(snapshot: &PortfolioSnapshot) -> Vec<CompanyRiskScore> {
    snapshot
        .companies
        .iter()
        .map(|c| CompanyRiskScore {
            company_id: c.company_id.clone(),
            company_name: c.company_name.clone(),
            score: mean_risk(c.projects.iter().map(|p| p.risk_score())),
        })
        .collect()
}

/// One-shot portfolio summary for the risk meter.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioRiskProfile {
    pub aggregate: AggregateRiskScore,
    pub distribution: RiskDistribution,
    pub company_count: usize,
}

impl PortfolioRiskProfile {
    pub fn from_snapshot(snapshot: &PortfolioSnapshot, t: &AlertThresholds) -> Self {
        Self {
            aggregate: aggregate_risk_score(snapshot),
            distribution: RiskDistribution::from_snapshot(snapshot, t),
            company_count: snapshot.companies.len(),
        }
    }

    pub fn project_count(&self) -> usize {
        self.aggregate.project_count
    }
}
