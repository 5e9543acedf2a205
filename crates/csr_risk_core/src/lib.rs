#![forbid(unsafe_code)]

pub mod alerts;
pub mod idempotency;
pub mod portfolio;
pub mod risk;

pub use alerts::{Alert, AlertThresholds, RuleKind, Severity, derive_alerts};
pub use portfolio::{CompanyRecord, PortfolioSnapshot, ProjectRecord};
pub use risk::{AggregateRiskScore, aggregate_risk_score};
