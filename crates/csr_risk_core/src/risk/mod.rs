//! Portfolio-level risk scoring.

pub mod aggregate;
pub mod profile;

pub use aggregate::{AggregateRiskScore, aggregate_risk_score};
pub use profile::{
    CompanyRiskScore, PortfolioRiskProfile, RankedProject, RiskBand, RiskDistribution,
    company_risk_scores, top_risk_projects,
};
