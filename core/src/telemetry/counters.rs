//! telemetry/counters.rs
//! Tallies collected while scanning a buffer.
//!
//! Summary: one counter per outcome of a signature hit, plus a tally of
//! extended headers that were present but malformed. Cheap to clone and
//! merge, so callers scanning several buffers can aggregate.

use serde::Serialize;

use crate::headers::HeaderErrorKind;
use crate::scanner::FspRecord;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScanCounters {
    pub signature_hits: u64,
    pub records: u64,
    pub extended_headers: u64,
    pub images_captured: u64,
    /// "FSPE" found at the probe position but not decodable. The record is
    /// still reported, without an extended header.
    pub extended_headers_malformed: u64,
    pub rejected_too_short: u64,
    pub rejected_bad_signature: u64,
    pub rejected_reserved_nonzero: u64,
    pub rejected_unknown_revision: u64,
}

impl ScanCounters {
    /// Record one "FSPH" occurrence, before decoding.
    pub fn add_hit(&mut self) {
        self.signature_hits += 1;
    }

    /// Record one decoded record.
    pub fn add_record(&mut self, record: &FspRecord) {
        self.records += 1;
        if record.extended_header.is_some() {
            self.extended_headers += 1;
        }
        if record.image.is_some() {
            self.images_captured += 1;
        }
    }

    pub fn add_malformed_extended_header(&mut self) {
        self.extended_headers_malformed += 1;
    }

    /// Record one candidate skipped because decoding failed.
    pub fn add_rejection(&mut self, kind: HeaderErrorKind) {
        match kind {
            HeaderErrorKind::TooShort => self.rejected_too_short += 1,
            HeaderErrorKind::BadSignature => self.rejected_bad_signature += 1,
            HeaderErrorKind::ReservedNonzero => self.rejected_reserved_nonzero += 1,
            HeaderErrorKind::UnknownRevision => self.rejected_unknown_revision += 1,
            // Info header decoding never reports this kind.
            HeaderErrorKind::TruncatedPayload => {}
        }
    }

    pub fn rejected(&self, kind: HeaderErrorKind) -> u64 {
        match kind {
            HeaderErrorKind::TooShort => self.rejected_too_short,
            HeaderErrorKind::BadSignature => self.rejected_bad_signature,
            HeaderErrorKind::ReservedNonzero => self.rejected_reserved_nonzero,
            HeaderErrorKind::UnknownRevision => self.rejected_unknown_revision,
            HeaderErrorKind::TruncatedPayload => 0,
        }
    }

    pub fn rejected_total(&self) -> u64 {
        self.rejected_too_short
            + self.rejected_bad_signature
            + self.rejected_reserved_nonzero
            + self.rejected_unknown_revision
    }

    pub fn merge(&mut self, other: &ScanCounters) {
        self.signature_hits += other.signature_hits;
        self.records += other.records;
        self.extended_headers += other.extended_headers;
        self.images_captured += other.images_captured;
        self.extended_headers_malformed += other.extended_headers_malformed;

        self.rejected_too_short += other.rejected_too_short;
        self.rejected_bad_signature += other.rejected_bad_signature;
        self.rejected_reserved_nonzero += other.rejected_reserved_nonzero;
        self.rejected_unknown_revision += other.rejected_unknown_revision;
    }
}
