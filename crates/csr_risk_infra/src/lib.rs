#![forbid(unsafe_code)]

pub mod config;
pub mod export;
pub mod provider;

pub use export::{AlertFeedView, RenderError, render_alert_feed};
pub use provider::{DecodedSnapshot, SnapshotError, decode_snapshot, decode_snapshot_value};
