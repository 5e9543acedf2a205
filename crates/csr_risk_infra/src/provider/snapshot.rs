//! Snapshot decoding.
//!
//! Accepted top-level shapes:
//! - `{ "companies": [ ... ] }`
//! - `[ ... ]` (bare company list)
//!
//! Anything else fails with `SnapshotError::TypeMismatch`. Below the top
//! level nothing fails:
//! - non-object company or project entries are skipped;
//! - a missing or non-array `projects` reads as empty;
//! - missing or unusable numeric fields stay `None` (engine reads zero);
//! - a missing id becomes the positional id `#<index>`, with extra leading
//!   `#` until it differs from every real id in the same list.

use std::collections::HashSet;
use std::fmt;

use csr_risk_core::portfolio::{CompanyRecord, PortfolioSnapshot, ProjectField, ProjectRecord};
use serde_json::{Map, Value};

use super::fields::{NumberField, id_field, number_field, text_field};

const COMPANY_ID_KEYS: &[&str] = &["company_id", "companyId", "id"];
const COMPANY_NAME_KEYS: &[&str] = &["company_name", "companyName", "name"];
const PROJECT_ID_KEYS: &[&str] = &["project_id", "projectId", "id"];
const PROJECT_TITLE_KEYS: &[&str] = &["project_title", "projectTitle", "title"];

/// Accepted keys for a numeric field: snake_case first, then camelCase.
fn numeric_keys(field: ProjectField) -> [&'static str; 2] {
    let camel = match field {
        ProjectField::RiskScore => "riskScore",
        ProjectField::ProgressPercentage => "progressPercentage",
        ProjectField::Budget => "budget",
        ProjectField::SpentAmount => "spentAmount",
    };
    [field.as_str(), camel]
}

/// Fatal decoding failure.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotError {
    /// Payload is not JSON at all.
    InvalidJson(String),
    /// Payload is JSON but not a sequence of companies.
    TypeMismatch { found: &'static str },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::InvalidJson(detail) => {
                write!(f, "snapshot is not valid JSON: {detail}")
            }
            SnapshotError::TypeMismatch { found } => write!(
                f,
                "snapshot type mismatch: expected a company list or \
                 {{\"companies\": [...]}}, found {found}"
            ),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Malformed-record tallies. Never fatal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub companies_skipped: usize,
    pub projects_skipped: usize,
    /// Companies whose `projects` was present but not an array.
    pub project_lists_invalid: usize,
    /// Numeric fields absent or null.
    pub fields_missing: usize,
    /// Numeric fields present with an unusable value.
    pub fields_invalid: usize,
    /// Ids replaced by a positional `#<index>`.
    pub ids_synthesized: usize,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Decoded snapshot plus what had to be absorbed to produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSnapshot {
    pub snapshot: PortfolioSnapshot,
    pub report: DecodeReport,
}

/// Decode a provider payload from JSON text.
pub fn decode_snapshot(raw: &str) -> Result<DecodedSnapshot, SnapshotError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| SnapshotError::InvalidJson(e.to_string()))?;
    decode_snapshot_value(&value)
}

/// Decode an already-parsed provider payload.
pub fn decode_snapshot_value(value: &Value) -> Result<DecodedSnapshot, SnapshotError> {
    let entries = company_entries(value)?;
    let mut report = DecodeReport::default();

    let mut raw_ids = Vec::with_capacity(entries.len());
    let mut companies = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let Value::Object(obj) = entry else {
            report.companies_skipped += 1;
            continue;
        };
        raw_ids.push((idx, id_field(obj, COMPANY_ID_KEYS)));
        companies.push(decode_company(obj, &mut report));
    }
    for (company, id) in companies.iter_mut().zip(assign_ids(raw_ids, &mut report)) {
        company.company_id = id;
    }

    if !report.is_clean() {
        tracing::warn!(
            "snapshot absorbed malformed records companies_skipped={} projects_skipped={} \
             project_lists_invalid={} fields_missing={} fields_invalid={} ids_synthesized={}",
            report.companies_skipped,
            report.projects_skipped,
            report.project_lists_invalid,
            report.fields_missing,
            report.fields_invalid,
            report.ids_synthesized
        );
    }

    Ok(DecodedSnapshot {
        snapshot: PortfolioSnapshot::new(companies),
        report,
    })
}

fn company_entries(value: &Value) -> Result<&Vec<Value>, SnapshotError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(obj) => match obj.get("companies") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(SnapshotError::TypeMismatch {
                found: json_type_name(other),
            }),
            None => Err(SnapshotError::TypeMismatch {
                found: "object without \"companies\"",
            }),
        },
        other => Err(SnapshotError::TypeMismatch {
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolve `(entry index, upstream id)` pairs into final ids.
///
/// Real ids are kept verbatim. A missing id becomes `#<index>`; if a real id
/// (or an earlier synthesized one) already uses that text, `#` is prepended
/// until it is free, so the dedup by alert id never merges distinct records.
fn assign_ids(raw: Vec<(usize, Option<String>)>, report: &mut DecodeReport) -> Vec<String> {
    let mut taken: HashSet<String> = raw.iter().filter_map(|(_, id)| id.clone()).collect();
    raw.into_iter()
        .map(|(idx, id)| match id {
            Some(id) => id,
            None => {
                report.ids_synthesized += 1;
                let mut candidate = format!("#{idx}");
                while taken.contains(&candidate) {
                    candidate.insert(0, '#');
                }
                taken.insert(candidate.clone());
                candidate
            }
        })
        .collect()
}

/// Company with every field but `company_id`, which `assign_ids` fills.
fn decode_company(obj: &Map<String, Value>, report: &mut DecodeReport) -> CompanyRecord {
    let company_name = text_field(obj, COMPANY_NAME_KEYS).unwrap_or_default();

    let projects = match obj.get("projects") {
        Some(Value::Array(items)) => {
            let mut raw_ids = Vec::with_capacity(items.len());
            let mut projects = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                let Value::Object(p) = item else {
                    report.projects_skipped += 1;
                    continue;
                };
                raw_ids.push((idx, id_field(p, PROJECT_ID_KEYS)));
                projects.push(decode_project(p, report));
            }
            for (project, id) in projects.iter_mut().zip(assign_ids(raw_ids, report)) {
                project.project_id = id;
            }
            projects
        }
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            report.project_lists_invalid += 1;
            Vec::new()
        }
    };

    CompanyRecord {
        company_id: String::new(),
        company_name,
        projects,
    }
}

/// Project with every field but `project_id`, which `assign_ids` fills.
fn decode_project(obj: &Map<String, Value>, report: &mut DecodeReport) -> ProjectRecord {
    let mut project = ProjectRecord {
        project_title: text_field(obj, PROJECT_TITLE_KEYS).unwrap_or_default(),
        ..ProjectRecord::default()
    };
    for field in ProjectField::ALL {
        let value = number_field(obj, &numeric_keys(field));
        match value {
            NumberField::Present(_) => {}
            NumberField::Missing => report.fields_missing += 1,
            NumberField::Invalid => {
                report.fields_invalid += 1;
                tracing::debug!("unusable project field {}", field.as_str());
            }
        }
        project.set_field(field, value.value());
    }
    project
}
