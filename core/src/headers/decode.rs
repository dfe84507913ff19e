//! headers/decode.rs
//!
//! Info header decoding.
//!
//! Design notes:
//! - `decode_common_header` performs all validation (signature, reserved
//!   field, revision).
//! - Per-revision decoders only check the length and re-read the common
//!   preamble as part of their own layout.
//! - Field order must match `encode.rs` exactly.

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{COMMON_HEADER_LEN, FSP_HEADER_SIGNATURE};
use crate::constants::{HEADER_V1_LEN, HEADER_V2_LEN, HEADER_V3_LEN, HEADER_V4_LEN};
use crate::headers::types::{CommonHeader, HeaderError, HeaderRevision, InfoHeader, SpecVersion};
use crate::headers::types::{InfoHeaderV1, InfoHeaderV2, InfoHeaderV3, InfoHeaderV4};

// Cursor helpers. Callers check the buffer length before reading.
#[inline] pub(crate) fn get_u8(buf: &[u8], i: &mut usize) -> u8 { let v = buf[*i]; *i += 1; v }
#[inline] pub(crate) fn get_u16(buf: &[u8], i: &mut usize) -> u16 { let v = LittleEndian::read_u16(&buf[*i..*i + 2]); *i += 2; v }
#[inline] pub(crate) fn get_u32(buf: &[u8], i: &mut usize) -> u32 { let v = LittleEndian::read_u32(&buf[*i..*i + 4]); *i += 4; v }
#[inline] pub(crate) fn get_bytes<const N: usize>(buf: &[u8], i: &mut usize) -> [u8; N] {
    let mut dst = [0u8; N]; dst.copy_from_slice(&buf[*i..*i + N]); *i += N; dst
}

#[inline]
fn ensure_len(buf: &[u8], need: usize) -> Result<(), HeaderError> {
    if buf.len() < need {
        return Err(HeaderError::TooShort { have: buf.len(), need });
    }
    Ok(())
}

fn read_common(buf: &[u8], i: &mut usize) -> CommonHeader {
    CommonHeader {
        signature: get_bytes::<4>(buf, i),             // 0..4   "FSPH"
        header_length: get_u32(buf, i),                // 4..8   header length
        reserved1: get_u16(buf, i),                    // 8..10  reserved
        spec_version: SpecVersion(get_u8(buf, i)),     // 10     packed BCD
        header_revision: get_u8(buf, i),               // 11     revision
    }
}

/// Decode and validate the 12-byte preamble.
///
/// # Errors
/// - `TooShort` below 12 bytes
/// - `BadSignature` when bytes 0..4 are not "FSPH"
/// - `ReservedNonzero` when bytes 8..10 are not zero
/// - `UnknownRevision` for revisions outside 1..=4
pub fn decode_common_header(buf: &[u8]) -> Result<CommonHeader, HeaderError> {
    ensure_len(buf, COMMON_HEADER_LEN)?;

    let mut i = 0usize;
    let common = read_common(buf, &mut i);
    debug_assert_eq!(i, COMMON_HEADER_LEN);

    if common.signature != FSP_HEADER_SIGNATURE {
        return Err(HeaderError::BadSignature {
            have: common.signature,
            need: FSP_HEADER_SIGNATURE,
        });
    }
    if common.reserved1 != 0 {
        return Err(HeaderError::ReservedNonzero { raw: common.reserved1 });
    }
    common.revision()?;

    Ok(common)
}

/// Decode an FSP 1.0 header. Only the length is checked.
pub fn decode_header_v1(buf: &[u8]) -> Result<InfoHeaderV1, HeaderError> {
    ensure_len(buf, HEADER_V1_LEN)?;

    let mut i = 0usize;
    let h = InfoHeaderV1 {
        common: read_common(buf, &mut i),                 // 0..12
        image_revision: get_u32(buf, &mut i),             // 12..16
        image_id: get_bytes::<8>(buf, &mut i),            // 16..24
        image_size: get_u32(buf, &mut i),                 // 24..28
        image_base: get_u32(buf, &mut i),                 // 28..32
        image_attribute: get_u32(buf, &mut i),            // 32..36
        cfg_region_offset: get_u32(buf, &mut i),          // 36..40
        cfg_region_size: get_u32(buf, &mut i),            // 40..44
        api_entry_num: get_u32(buf, &mut i),              // 44..48
        temp_ram_init_entry_offset: get_u32(buf, &mut i), // 48..52
        fsp_init_entry_offset: get_u32(buf, &mut i),      // 52..56
        notify_phase_entry_offset: get_u32(buf, &mut i),  // 56..60
        reserved: get_u32(buf, &mut i),                   // 60..64
    };
    debug_assert_eq!(i, HEADER_V1_LEN);
    Ok(h)
}

/// Decode an FSP 1.1 header. Only the length is checked.
pub fn decode_header_v2(buf: &[u8]) -> Result<InfoHeaderV2, HeaderError> {
    ensure_len(buf, HEADER_V2_LEN)?;

    let mut i = 0usize;
    let h = InfoHeaderV2 {
        common: read_common(buf, &mut i),                    // 0..12
        image_revision: get_u32(buf, &mut i),                // 12..16
        image_id: get_bytes::<8>(buf, &mut i),               // 16..24
        image_size: get_u32(buf, &mut i),                    // 24..28
        image_base: get_u32(buf, &mut i),                    // 28..32
        image_attribute: get_u32(buf, &mut i),               // 32..36
        cfg_region_offset: get_u32(buf, &mut i),             // 36..40
        cfg_region_size: get_u32(buf, &mut i),               // 40..44
        api_entry_num: get_u32(buf, &mut i),                 // 44..48
        temp_ram_init_entry_offset: get_u32(buf, &mut i),    // 48..52
        fsp_init_entry_offset: get_u32(buf, &mut i),         // 52..56
        notify_phase_entry_offset: get_u32(buf, &mut i),     // 56..60
        fsp_memory_init_entry_offset: get_u32(buf, &mut i),  // 60..64
        temp_ram_exit_entry_offset: get_u32(buf, &mut i),    // 64..68
        fsp_silicon_init_entry_offset: get_u32(buf, &mut i), // 68..72
    };
    debug_assert_eq!(i, HEADER_V2_LEN);
    Ok(h)
}

/// Decode an FSP 2.0 header. Only the length is checked.
pub fn decode_header_v3(buf: &[u8]) -> Result<InfoHeaderV3, HeaderError> {
    ensure_len(buf, HEADER_V3_LEN)?;

    let mut i = 0usize;
    let h = InfoHeaderV3 {
        common: read_common(buf, &mut i),                    // 0..12
        image_revision: get_u32(buf, &mut i),                // 12..16
        image_id: get_bytes::<8>(buf, &mut i),               // 16..24
        image_size: get_u32(buf, &mut i),                    // 24..28
        image_base: get_u32(buf, &mut i),                    // 28..32
        image_attribute: get_u16(buf, &mut i),               // 32..34
        component_attribute: get_u16(buf, &mut i),           // 34..36
        cfg_region_offset: get_u32(buf, &mut i),             // 36..40
        cfg_region_size: get_u32(buf, &mut i),               // 40..44
        reserved2: get_u32(buf, &mut i),                     // 44..48
        temp_ram_init_entry_offset: get_u32(buf, &mut i),    // 48..52
        reserved3: get_u32(buf, &mut i),                     // 52..56
        notify_phase_entry_offset: get_u32(buf, &mut i),     // 56..60
        fsp_memory_init_entry_offset: get_u32(buf, &mut i),  // 60..64
        temp_ram_exit_entry_offset: get_u32(buf, &mut i),    // 64..68
        fsp_silicon_init_entry_offset: get_u32(buf, &mut i), // 68..72
    };
    debug_assert_eq!(i, HEADER_V3_LEN);
    Ok(h)
}

/// Decode an FSP 2.1 header (V3 layout).
pub fn decode_header_v4(buf: &[u8]) -> Result<InfoHeaderV4, HeaderError> {
    ensure_len(buf, HEADER_V4_LEN)?;
    Ok(InfoHeaderV4 { layout: decode_header_v3(buf)? })
}

/// Validate the preamble, then decode the full header of its revision.
///
/// `buf` must start at the "FSPH" signature.
pub fn decode_info_header(buf: &[u8]) -> Result<InfoHeader, HeaderError> {
    let common = decode_common_header(buf)?;

    match common.revision()? {
        HeaderRevision::V1 => decode_header_v1(buf).map(InfoHeader::V1),
        HeaderRevision::V2 => decode_header_v2(buf).map(InfoHeader::V2),
        HeaderRevision::V3 => decode_header_v3(buf).map(InfoHeader::V3),
        HeaderRevision::V4 => decode_header_v4(buf).map(InfoHeader::V4),
    }
}
