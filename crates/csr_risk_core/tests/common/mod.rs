#![allow(dead_code)]

use csr_risk_core::{CompanyRecord, PortfolioSnapshot, ProjectRecord};

/// Test helper: a project with every numeric field present.
pub fn project(id: &str, risk: f64, progress: f64, budget: f64, spent: f64) -> ProjectRecord {
    ProjectRecord::new(id, format!("Project {id}"))
        .with_risk_score(risk)
        .with_progress(progress)
        .with_budget(budget)
        .with_spent(spent)
}

/// Test helper: a project that trips no rule.
pub fn quiet_project(id: &str) -> ProjectRecord {
    project(id, 10.0, 90.0, 100_000.0, 10_000.0)
}

pub fn company(id: &str, projects: Vec<ProjectRecord>) -> CompanyRecord {
    CompanyRecord {
        company_id: id.to_string(),
        company_name: format!("Company {id}"),
        projects,
    }
}

/// Mixed portfolio touching every rule at least once.
pub fn mixed_portfolio() -> PortfolioSnapshot {
    PortfolioSnapshot::new(vec![
        company(
            "c1",
            vec![
                // elevated-risk only
                project("p1", 65.0, 70.0, 500_000.0, 100_000.0),
                // critical-risk + budget-overrun + progress-delay
                project("p2", 85.0, 40.0, 2_000_000.0, 1_900_000.0),
            ],
        ),
        company(
            "c2",
            vec![
                // high-value-moderate-risk only
                project("p3", 45.0, 90.0, 3_000_000.0, 100_000.0),
                quiet_project("p4"),
            ],
        ),
    ])
}
