//! Portfolio snapshot types consumed by the risk engine.

pub mod record;

pub use record::{CompanyRecord, PortfolioSnapshot, ProjectField, ProjectRecord};
