//! Idempotency primitives: deterministic alert identity.

pub mod hash;

pub use hash::{AlertId, AlertIdInput, compute_alert_hash};
