//! scanner/scan.rs
//!
//! Best-effort discovery of every FSP info header in a buffer.
//!
//! Every "FSPH" occurrence is tried. Whether the decode succeeds or fails,
//! the search resumes one byte past the start of that occurrence, so
//! overlapping candidates are all tried and a decoded header is never
//! skipped over. Failures are logged and counted, never returned.

use bytes::Bytes;
use log::debug;

use crate::constants::FSP_HEADER_SIGNATURE;
use crate::scanner::config::ScanConfig;
use crate::scanner::record::{build_record, FspRecord};
use crate::telemetry::ScanCounters;
use crate::utils::find_signature;

/// Offsets of every "FSPH" occurrence, in ascending order.
#[derive(Debug, Clone)]
pub struct SignatureOffsets<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SignatureOffsets<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }
}

impl Iterator for SignatureOffsets<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let rest = self.buf.get(self.pos..)?;
        let found = self.pos + find_signature(rest, &FSP_HEADER_SIGNATURE)?;
        self.pos = found + 1;
        Some(found)
    }
}

pub fn signature_offsets(buf: &[u8]) -> SignatureOffsets<'_> {
    SignatureOffsets::new(buf)
}

/// Scan `buf` with the default configuration.
pub fn scan(buf: &[u8]) -> Vec<FspRecord> {
    scan_with(buf, &ScanConfig::default())
}

pub fn scan_with(buf: &[u8], cfg: &ScanConfig) -> Vec<FspRecord> {
    scan_with_counters(buf, cfg).0
}

/// Scan `buf` and also report what happened to every signature hit.
///
/// `buf` is copied into one `Bytes` up front; every record's image and
/// producer data are views of that copy.
pub fn scan_with_counters(buf: &[u8], cfg: &ScanConfig) -> (Vec<FspRecord>, ScanCounters) {
    scan_shared(&Bytes::copy_from_slice(buf), cfg)
}

/// Scan bytes the caller already owns as `Bytes`, without copying them.
pub fn scan_shared(src: &Bytes, cfg: &ScanConfig) -> (Vec<FspRecord>, ScanCounters) {
    let mut records = Vec::new();
    let mut counters = ScanCounters::default();

    for offset in signature_offsets(src) {
        counters.add_hit();
        match build_record(src, offset, cfg) {
            Ok((record, malformed)) => {
                debug!(
                    "FSP {:?} header at {:#x}, image size {:#x}",
                    record.revision(),
                    offset,
                    record.image_size()
                );
                if let Some(e) = malformed {
                    debug!("malformed extended header after {:#x}: {}", offset, e);
                    counters.add_malformed_extended_header();
                }
                counters.add_record(&record);
                records.push(record);
            }
            Err(e) => {
                debug!("skipping candidate at {:#x}: {}", offset, e);
                counters.add_rejection(e.kind());
            }
        }
    }

    (records, counters)
}
