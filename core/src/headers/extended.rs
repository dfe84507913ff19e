//! headers/extended.rs
//! Optional "FSPE" producer header that may follow the info header.
//!
//! Layout (24-byte fixed prefix, then `producer_data_size` opaque bytes):
//!
//! ```text
//! [ signature (4) ] "FSPE"
//! [ header_length (4) ]
//! [ revision (1) ]
//! [ reserved1 (1) ]       must be zero
//! [ producer_id (6) ]
//! [ producer_revision (4) ]
//! [ producer_data_size (4) ]
//! [ producer_data (N) ]
//! ```

use std::ops::Range;

use bytes::Bytes;
use serde::Serialize;

use crate::constants::{EXT_HEADER_FIXED_LEN, FSP_EXT_HEADER_SIGNATURE};
use crate::headers::decode::{get_bytes, get_u32, get_u8};
use crate::headers::encode::{put_bytes, put_u32, put_u8};
use crate::headers::types::HeaderError;
use crate::utils::serialize_hex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtendedHeader {
    pub signature: [u8; 4],
    pub header_length: u32,
    pub revision: u8,
    pub reserved1: u8,
    pub producer_id: [u8; 6],
    pub producer_revision: u32,
    pub producer_data_size: u32,
    /// Exactly `producer_data_size` bytes following the fixed prefix.
    #[serde(serialize_with = "serialize_hex")]
    pub producer_data: Bytes,
}

impl ExtendedHeader {
    /// Canonical header for tests, carrying `data` as producer data.
    pub fn test_header(data: &[u8]) -> Self {
        Self {
            signature: FSP_EXT_HEADER_SIGNATURE,
            header_length: (EXT_HEADER_FIXED_LEN + data.len()) as u32,
            revision: 1,
            reserved1: 0,
            producer_id: *b"INTEL ",
            producer_revision: 0x0000_0100,
            producer_data_size: data.len() as u32,
            producer_data: Bytes::copy_from_slice(data),
        }
    }

    /// Producer id as text, trailing NULs and spaces removed.
    pub fn producer_id_str(&self) -> String {
        String::from_utf8_lossy(&self.producer_id)
            .trim_end_matches(|c: char| c == '\0' || c == ' ')
            .to_string()
    }

    /// Bytes occupied on the wire (fixed prefix plus producer data).
    pub fn wire_len(&self) -> usize {
        EXT_HEADER_FIXED_LEN + self.producer_data.len()
    }
}

/// Decode an extended header starting exactly at `buf[0]`. The producer data
/// is copied out of `buf`.
///
/// # Errors
/// - `TooShort` below 24 bytes
/// - `BadSignature` when bytes 0..4 are not "FSPE"
/// - `ReservedNonzero` when the reserved byte is set
/// - `TruncatedPayload` when fewer than `24 + producer_data_size` bytes remain
pub fn decode_extended_header(buf: &[u8]) -> Result<ExtendedHeader, HeaderError> {
    let (mut h, data) = decode_fixed_prefix(buf)?;
    h.producer_data = Bytes::copy_from_slice(&buf[data]);
    Ok(h)
}

/// Same as [`decode_extended_header`], but `producer_data` is a slice of `buf`
/// sharing its allocation.
pub fn decode_extended_header_shared(buf: &Bytes) -> Result<ExtendedHeader, HeaderError> {
    let (mut h, data) = decode_fixed_prefix(buf)?;
    h.producer_data = buf.slice(data);
    Ok(h)
}

/// Validate the fixed prefix. Returns the header with empty `producer_data`
/// and the range of the producer data within `buf`.
fn decode_fixed_prefix(buf: &[u8]) -> Result<(ExtendedHeader, Range<usize>), HeaderError> {
    if buf.len() < EXT_HEADER_FIXED_LEN {
        return Err(HeaderError::TooShort { have: buf.len(), need: EXT_HEADER_FIXED_LEN });
    }

    let mut i = 0usize;
    let signature = get_bytes::<4>(buf, &mut i);        // 0..4   "FSPE"
    let header_length = get_u32(buf, &mut i);           // 4..8   header length
    let revision = get_u8(buf, &mut i);                 // 8      revision
    let reserved1 = get_u8(buf, &mut i);                // 9      reserved
    let producer_id = get_bytes::<6>(buf, &mut i);      // 10..16 producer id
    let producer_revision = get_u32(buf, &mut i);       // 16..20 producer revision
    let producer_data_size = get_u32(buf, &mut i);      // 20..24 producer data size
    debug_assert_eq!(i, EXT_HEADER_FIXED_LEN);

    if signature != FSP_EXT_HEADER_SIGNATURE {
        return Err(HeaderError::BadSignature { have: signature, need: FSP_EXT_HEADER_SIGNATURE });
    }
    if reserved1 != 0 {
        return Err(HeaderError::ReservedNonzero { raw: u16::from(reserved1) });
    }

    let available = buf.len() - EXT_HEADER_FIXED_LEN;
    let end = match EXT_HEADER_FIXED_LEN.checked_add(producer_data_size as usize) {
        Some(end) if end <= buf.len() => end,
        _ => {
            return Err(HeaderError::TruncatedPayload { declared: producer_data_size, available });
        }
    };

    let h = ExtendedHeader {
        signature,
        header_length,
        revision,
        reserved1,
        producer_id,
        producer_revision,
        producer_data_size,
        producer_data: Bytes::new(),
    };
    Ok((h, EXT_HEADER_FIXED_LEN..end))
}

/// Encode an extended header. Writes `producer_data_size` as given, followed
/// by all of `producer_data`.
pub fn encode_extended_header(h: &ExtendedHeader) -> Vec<u8> {
    let mut out = vec![0u8; h.wire_len()];
    let mut i = 0usize;

    put_bytes(&mut out, &mut i, &h.signature);
    put_u32(&mut out, &mut i, h.header_length);
    put_u8(&mut out, &mut i, h.revision);
    put_u8(&mut out, &mut i, h.reserved1);
    put_bytes(&mut out, &mut i, &h.producer_id);
    put_u32(&mut out, &mut i, h.producer_revision);
    put_u32(&mut out, &mut i, h.producer_data_size);
    put_bytes(&mut out, &mut i, &h.producer_data);

    debug_assert_eq!(i, out.len(), "encoding wrote incorrect length");
    out
}
