//! fsp-core
//!
//! Locates and decodes Intel Firmware Support Package (FSP) info headers
//! inside firmware image bytes.
//! No file IO, no printing: bytes in, records and typed errors out.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod utils;

// Wire formats
pub mod headers;

// Discovery
pub mod scanner;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::headers::{
        ComponentAttributes, ComponentType, ExtendedHeader, FspHeader, HeaderError,
        HeaderErrorKind, HeaderRevision, ImageAttributes, InfoHeader,
    };
    pub use crate::scanner::{
        decode_one, decode_one_shared, decode_one_with, scan, scan_shared, scan_with,
        scan_with_counters, ExtendedHeaderPlacement, FspRecord, ScanConfig,
    };
    pub use crate::telemetry::ScanCounters;
}
