//! scanner/config.rs
//! Knobs for record aggregation.

use crate::constants::DEFAULT_EXT_HEADER_OFFSET;
use crate::headers::{FspHeader, InfoHeader};

/// Where to probe for the extended header, relative to the info header start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedHeaderPlacement {
    /// Fixed distance. The default of 72 matches V2-V4 but lands 8 bytes past
    /// the end of a 64-byte V1 header.
    FixedOffset(usize),
    /// Directly after the decoded revision's fixed structure.
    RevisionSize,
}

impl Default for ExtendedHeaderPlacement {
    fn default() -> Self {
        ExtendedHeaderPlacement::FixedOffset(DEFAULT_EXT_HEADER_OFFSET)
    }
}

impl ExtendedHeaderPlacement {
    pub fn offset_for(&self, header: &InfoHeader) -> usize {
        match self {
            ExtendedHeaderPlacement::FixedOffset(off) => *off,
            ExtendedHeaderPlacement::RevisionSize => header.fixed_len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub extended_header: ExtendedHeaderPlacement,

    /// Copy the image bytes into the record when the declared image size
    /// fits in the remaining buffer.
    pub capture_image: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extended_header: ExtendedHeaderPlacement::default(),
            capture_image: true,
        }
    }
}

impl ScanConfig {
    pub fn new(extended_header: ExtendedHeaderPlacement, capture_image: bool) -> Self {
        Self { extended_header, capture_image }
    }

    /// Probe for the extended header at the revision's true size.
    pub fn revision_sized() -> Self {
        Self { extended_header: ExtendedHeaderPlacement::RevisionSize, ..Default::default() }
    }

    pub fn without_image_capture(mut self) -> Self {
        self.capture_image = false;
        self
    }
}
