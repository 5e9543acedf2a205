//! Risk Data Provider payload decoding.
//!
//! Turns the provider's JSON into a `PortfolioSnapshot`. Only a payload that
//! is not a sequence of companies is an error; everything below that level
//! is absorbed and tallied in a `DecodeReport`.

pub mod fields;
pub mod snapshot;

pub use fields::{NumberField, id_field, number_field, text_field};
pub use snapshot::{
    DecodeReport, DecodedSnapshot, SnapshotError, decode_snapshot, decode_snapshot_value,
};
