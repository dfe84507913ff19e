//! headers/mod.rs
//! Intel FSP info header ("FSPH") and extended header ("FSPE") codecs.
//!
//! Notes:
//! - Layouts are byte-exact copies of the FSP specification revisions
//!   1.0, 1.1, 2.0 and 2.1; all integers are little-endian.
//! - `InfoHeader` is a closed sum over the four revisions; the shared
//!   `FspHeader` trait exposes image size and the optional attribute views.
//! - Decoding never panics on short input; every failure is a `HeaderError`.

pub mod types;
pub mod encode;
pub mod decode;
pub mod extended;

pub use types::*;
pub use encode::*;
pub use decode::*;
pub use extended::*;
