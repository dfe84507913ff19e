//! Signature scanner and record aggregation.
//!
//! Responsibilities:
//! - Find "FSPH" candidates in arbitrary bytes
//! - Decode each candidate into an `FspRecord`
//! - Attach the optional extended header and image bytes
//!
//! Non-responsibilities:
//! - File IO
//! - Rendering

pub mod config;
pub mod record;
pub mod scan;

pub use config::{ExtendedHeaderPlacement, ScanConfig};
pub use record::{decode_one, decode_one_shared, decode_one_with, FspRecord};
pub use scan::{scan, scan_shared, scan_with, scan_with_counters, signature_offsets, SignatureOffsets};
