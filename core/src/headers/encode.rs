//! headers/encode.rs
//!
//! Info header encoding.
//!
//! Design notes:
//! - Writes the exact inverse of `decode.rs`: little-endian, no padding.
//! - No validation is performed; fields are written as given so tests can
//!   craft malformed headers on purpose.

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{HEADER_V1_LEN, HEADER_V2_LEN, HEADER_V3_LEN};
use crate::headers::types::{CommonHeader, InfoHeader};
use crate::headers::types::{InfoHeaderV1, InfoHeaderV2, InfoHeaderV3, InfoHeaderV4};

// Helper functions for little-endian writes.
#[inline] pub(crate) fn put_u8(out: &mut [u8], i: &mut usize, v: u8) { out[*i] = v; *i += 1; }
#[inline] pub(crate) fn put_u16(out: &mut [u8], i: &mut usize, v: u16) { LittleEndian::write_u16(&mut out[*i..*i + 2], v); *i += 2; }
#[inline] pub(crate) fn put_u32(out: &mut [u8], i: &mut usize, v: u32) { LittleEndian::write_u32(&mut out[*i..*i + 4], v); *i += 4; }
#[inline] pub(crate) fn put_bytes(out: &mut [u8], i: &mut usize, b: &[u8]) { out[*i..*i + b.len()].copy_from_slice(b); *i += b.len(); }

fn put_common(out: &mut [u8], i: &mut usize, c: &CommonHeader) {
    put_bytes(out, i, &c.signature);     // 0..4
    put_u32(out, i, c.header_length);    // 4..8
    put_u16(out, i, c.reserved1);        // 8..10
    put_u8(out, i, c.spec_version.0);    // 10
    put_u8(out, i, c.header_revision);   // 11
}

pub fn encode_header_v1(h: &InfoHeaderV1) -> [u8; HEADER_V1_LEN] {
    let mut out = [0u8; HEADER_V1_LEN];
    let mut i = 0usize;

    put_common(&mut out, &mut i, &h.common);
    put_u32(&mut out, &mut i, h.image_revision);
    put_bytes(&mut out, &mut i, &h.image_id);
    put_u32(&mut out, &mut i, h.image_size);
    put_u32(&mut out, &mut i, h.image_base);
    put_u32(&mut out, &mut i, h.image_attribute);
    put_u32(&mut out, &mut i, h.cfg_region_offset);
    put_u32(&mut out, &mut i, h.cfg_region_size);
    put_u32(&mut out, &mut i, h.api_entry_num);
    put_u32(&mut out, &mut i, h.temp_ram_init_entry_offset);
    put_u32(&mut out, &mut i, h.fsp_init_entry_offset);
    put_u32(&mut out, &mut i, h.notify_phase_entry_offset);
    put_u32(&mut out, &mut i, h.reserved);

    debug_assert_eq!(i, HEADER_V1_LEN, "encoding wrote incorrect length");
    out
}

pub fn encode_header_v2(h: &InfoHeaderV2) -> [u8; HEADER_V2_LEN] {
    let mut out = [0u8; HEADER_V2_LEN];
    let mut i = 0usize;

    put_common(&mut out, &mut i, &h.common);
    put_u32(&mut out, &mut i, h.image_revision);
    put_bytes(&mut out, &mut i, &h.image_id);
    put_u32(&mut out, &mut i, h.image_size);
    put_u32(&mut out, &mut i, h.image_base);
    put_u32(&mut out, &mut i, h.image_attribute);
    put_u32(&mut out, &mut i, h.cfg_region_offset);
    put_u32(&mut out, &mut i, h.cfg_region_size);
    put_u32(&mut out, &mut i, h.api_entry_num);
    put_u32(&mut out, &mut i, h.temp_ram_init_entry_offset);
    put_u32(&mut out, &mut i, h.fsp_init_entry_offset);
    put_u32(&mut out, &mut i, h.notify_phase_entry_offset);
    put_u32(&mut out, &mut i, h.fsp_memory_init_entry_offset);
    put_u32(&mut out, &mut i, h.temp_ram_exit_entry_offset);
    put_u32(&mut out, &mut i, h.fsp_silicon_init_entry_offset);

    debug_assert_eq!(i, HEADER_V2_LEN, "encoding wrote incorrect length");
    out
}

pub fn encode_header_v3(h: &InfoHeaderV3) -> [u8; HEADER_V3_LEN] {
    let mut out = [0u8; HEADER_V3_LEN];
    let mut i = 0usize;

    put_common(&mut out, &mut i, &h.common);
    put_u32(&mut out, &mut i, h.image_revision);
    put_bytes(&mut out, &mut i, &h.image_id);
    put_u32(&mut out, &mut i, h.image_size);
    put_u32(&mut out, &mut i, h.image_base);
    put_u16(&mut out, &mut i, h.image_attribute);
    put_u16(&mut out, &mut i, h.component_attribute);
    put_u32(&mut out, &mut i, h.cfg_region_offset);
    put_u32(&mut out, &mut i, h.cfg_region_size);
    put_u32(&mut out, &mut i, h.reserved2);
    put_u32(&mut out, &mut i, h.temp_ram_init_entry_offset);
    put_u32(&mut out, &mut i, h.reserved3);
    put_u32(&mut out, &mut i, h.notify_phase_entry_offset);
    put_u32(&mut out, &mut i, h.fsp_memory_init_entry_offset);
    put_u32(&mut out, &mut i, h.temp_ram_exit_entry_offset);
    put_u32(&mut out, &mut i, h.fsp_silicon_init_entry_offset);

    debug_assert_eq!(i, HEADER_V3_LEN, "encoding wrote incorrect length");
    out
}

pub fn encode_header_v4(h: &InfoHeaderV4) -> [u8; HEADER_V3_LEN] {
    encode_header_v3(&h.layout)
}

/// Encode any revision; the output length is the revision's fixed size.
pub fn encode_info_header(h: &InfoHeader) -> Vec<u8> {
    match h {
        InfoHeader::V1(h) => encode_header_v1(h).to_vec(),
        InfoHeader::V2(h) => encode_header_v2(h).to_vec(),
        InfoHeader::V3(h) => encode_header_v3(h).to_vec(),
        InfoHeader::V4(h) => encode_header_v4(h).to_vec(),
    }
}
