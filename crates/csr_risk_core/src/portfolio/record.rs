//! Company / project records as delivered by the Risk Data Provider.
//!
//! **Missing fields:** every numeric project field is stored as
//! `Option<f64>` so that "absent upstream" stays distinguishable from a
//! legitimate zero. Rule evaluation and aggregation read through the
//! accessor methods, which resolve `None` to `0.0`. Nothing else in the
//! engine touches the raw options.

/// Numeric project fields subject to the missing-is-zero default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    RiskScore,
    ProgressPercentage,
    Budget,
    SpentAmount,
}

impl ProjectField {
    pub const ALL: [ProjectField; 4] = [
        ProjectField::RiskScore,
        ProjectField::ProgressPercentage,
        ProjectField::Budget,
        ProjectField::SpentAmount,
    ];

    /// Upstream snake_case field name.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectField::RiskScore => "risk_score",
            ProjectField::ProgressPercentage => "progress_percentage",
            ProjectField::Budget => "budget",
            ProjectField::SpentAmount => "spent_amount",
        }
    }
}

/// A single CSR project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectRecord {
    /// Opaque identifier, unique within the owning company.
    pub project_id: String,
    pub project_title: String,
    /// 0..=100, higher is riskier. Not clamped.
    pub risk_score: Option<f64>,
    /// 0..=100. Not clamped.
    pub progress_percentage: Option<f64>,
    /// Currency-agnostic, non-negative.
    pub budget: Option<f64>,
    /// May exceed `budget`.
    pub spent_amount: Option<f64>,
}

impl ProjectRecord {
    pub fn new(project_id: impl Into<String>, project_title: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            project_title: project_title.into(),
            ..Self::default()
        }
    }

    pub fn with_risk_score(mut self, v: f64) -> Self {
        self.risk_score = Some(v);
        self
    }

    pub fn with_progress(mut self, v: f64) -> Self {
        self.progress_percentage = Some(v);
        self
    }

    pub fn with_budget(mut self, v: f64) -> Self {
        self.budget = Some(v);
        self
    }

    pub fn with_spent(mut self, v: f64) -> Self {
        self.spent_amount = Some(v);
        self
    }

    /// Raw field lookup, `None` when absent upstream.
    pub fn field(&self, field: ProjectField) -> Option<f64> {
        match field {
            ProjectField::RiskScore => self.risk_score,
            ProjectField::ProgressPercentage => self.progress_percentage,
            ProjectField::Budget => self.budget,
            ProjectField::SpentAmount => self.spent_amount,
        }
    }

    pub fn set_field(&mut self, field: ProjectField, value: Option<f64>) {
        let slot = match field {
            ProjectField::RiskScore => &mut self.risk_score,
            ProjectField::ProgressPercentage => &mut self.progress_percentage,
            ProjectField::Budget => &mut self.budget,
            ProjectField::SpentAmount => &mut self.spent_amount,
        };
        *slot = value;
    }

    /// Field value with the missing-is-zero default applied.
    pub fn field_or_zero(&self, field: ProjectField) -> f64 {
        self.field(field).unwrap_or(0.0)
    }

    pub fn risk_score(&self) -> f64 {
        self.field_or_zero(ProjectField::RiskScore)
    }

    pub fn progress_percentage(&self) -> f64 {
        self.field_or_zero(ProjectField::ProgressPercentage)
    }

    pub fn budget(&self) -> f64 {
        self.field_or_zero(ProjectField::Budget)
    }

    pub fn spent_amount(&self) -> f64 {
        self.field_or_zero(ProjectField::SpentAmount)
    }

    /// Number of numeric fields that will fall back to the zero default.
    pub fn missing_field_count(&self) -> usize {
        ProjectField::ALL
            .iter()
            .filter(|&&f| self.field(f).is_none())
            .count()
    }
}

/// A company and the projects it owns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyRecord {
    pub company_id: String,
    pub company_name: String,
    pub projects: Vec<ProjectRecord>,
}

impl CompanyRecord {
    pub fn new(company_id: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            company_name: company_name.into(),
            projects: Vec::new(),
        }
    }

    pub fn with_project(mut self, project: ProjectRecord) -> Self {
        self.projects.push(project);
        self
    }
}

/// Point-in-time portfolio handed to one engine invocation.
///
/// The engine only ever borrows a snapshot; it is never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioSnapshot {
    pub companies: Vec<CompanyRecord>,
}

impl PortfolioSnapshot {
    pub fn new(companies: Vec<CompanyRecord>) -> Self {
        Self { companies }
    }

    /// Iterate every `(company, project)` pair in input order.
    pub fn projects(&self) -> impl Iterator<Item = (&CompanyRecord, &ProjectRecord)> {
        self.companies
            .iter()
            .flat_map(|c| c.projects.iter().map(move |p| (c, p)))
    }

    pub fn project_count(&self) -> usize {
        self.companies.iter().map(|c| c.projects.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.project_count() == 0
    }
}

impl From<Vec<CompanyRecord>> for PortfolioSnapshot {
    fn from(companies: Vec<CompanyRecord>) -> Self {
        Self::new(companies)
    }
}
