//! Alert id computation.
//!
//! `alert_id = xxhash64(rule_kind + company_id + project_id)`
//!
//! **Hard rule:** the id depends on nothing but the triple above. No
//! timestamps, no input positions, no numeric field values, so re-running
//! the engine over an unchanged snapshot yields identical ids and a project
//! whose score moves keeps the same alert identity.

use std::fmt;

use xxhash_rust::xxh64::xxh64;

/// Field separator. `0xFF` never occurs in UTF-8, so `("ab", "c")` and
/// `("a", "bc")` cannot collide on buffer contents.
const SEP: u8 = 0xFF;

/// Input fields for computing an alert id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertIdInput<'a> {
    /// Stable rule token (e.g., "budget-overrun").
    pub rule_kind: &'a str,
    pub company_id: &'a str,
    pub project_id: &'a str,
}

/// Compute the raw 64-bit alert hash.
pub fn compute_alert_hash(input: &AlertIdInput<'_>) -> u64 {
    let mut buf = Vec::with_capacity(
        input.rule_kind.len() + input.company_id.len() + input.project_id.len() + 2,
    );

    buf.extend_from_slice(input.rule_kind.as_bytes());
    buf.push(SEP);
    buf.extend_from_slice(input.company_id.as_bytes());
    buf.push(SEP);
    buf.extend_from_slice(input.project_id.as_bytes());

    xxh64(&buf, 0)
}

/// Deterministic alert identity. Displays as 16 lowercase hex chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertId(u64);

impl AlertId {
    pub fn from_input(input: &AlertIdInput<'_>) -> Self {
        Self(compute_alert_hash(input))
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
