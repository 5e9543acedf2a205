//! Caller-owned counters for alert derivation.

use super::rules::RuleKind;

/// Counters accumulated across `derive_alerts_with_metrics` calls.
#[derive(Debug, Default)]
pub struct AlertMetrics {
    projects_evaluated_total: u64,
    fields_defaulted_total: u64,
    duplicates_suppressed_total: u64,
    emitted_by_rule: [u64; RuleKind::ALL.len()],
}

impl AlertMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects_evaluated_total(&self) -> u64 {
        self.projects_evaluated_total
    }

    /// Numeric project fields that were absent and read as zero.
    pub fn fields_defaulted_total(&self) -> u64 {
        self.fields_defaulted_total
    }

    pub fn duplicates_suppressed_total(&self) -> u64 {
        self.duplicates_suppressed_total
    }

    pub fn emitted_total(&self, rule: RuleKind) -> u64 {
        self.emitted_by_rule[rule.index()]
    }

    pub fn emitted_all_rules_total(&self) -> u64 {
        self.emitted_by_rule.iter().sum()
    }

    pub(crate) fn record_project(&mut self, missing_fields: usize) {
        self.projects_evaluated_total += 1;
        self.fields_defaulted_total += missing_fields as u64;
    }

    pub(crate) fn record_emitted(&mut self, rule: RuleKind) {
        self.emitted_by_rule[rule.index()] += 1;
    }

    pub(crate) fn record_duplicate(&mut self) {
        self.duplicates_suppressed_total += 1;
    }
}
