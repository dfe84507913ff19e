//! telemetry/mod.rs
//! Scan counters.
//!
//! Notes:
//! - Counters are plain values owned by one scan; merge them to aggregate
//!   across buffers.
//! - Serializable so callers can report them next to the records.

pub mod counters;

pub use counters::*;
