//! headers/types.rs
//! FSP info header structures and their decoded views.
//!
//! Notes:
//! - Every structure mirrors the byte-exact layout of the FSP specification
//!   (v1.0 through v2.1): little-endian integers, no padding.
//! - Raw fields are kept as read from the image; decoded views
//!   (`ImageAttributes`, `ComponentAttributes`) are derived on demand.
//! - Absent attributes are `None`, never `Some(false)`.

use std::fmt;

use bitflags::bitflags;
use num_enum::{FromPrimitive, TryFromPrimitive};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::constants::{component_attr, component_type_ids, image_attr};
use crate::constants::{FSP_HEADER_SIGNATURE, HEADER_V1_LEN, HEADER_V2_LEN, HEADER_V3_LEN, HEADER_V4_LEN};
use crate::utils::fmt_bytes;

/// Info header revision (byte 11 of the common preamble).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize)]
pub enum HeaderRevision {
    V1 = 0x01,
    V2 = 0x02,
    V3 = 0x03,
    V4 = 0x04,
}

impl HeaderRevision {
    pub fn verify(raw: u8) -> Result<Self, HeaderError> {
        Self::try_from_primitive(raw).map_err(|_| HeaderError::UnknownRevision { raw })
    }

    /// Fixed size of the info header for this revision.
    pub const fn fixed_len(self) -> usize {
        match self {
            HeaderRevision::V1 => HEADER_V1_LEN,
            HeaderRevision::V2 => HEADER_V2_LEN,
            HeaderRevision::V3 => HEADER_V3_LEN,
            HeaderRevision::V4 => HEADER_V4_LEN,
        }
    }
}

/// Spec version as packed BCD: high nibble major, low nibble minor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SpecVersion(pub u8);

impl SpecVersion {
    pub const fn major(self) -> u8 {
        (self.0 >> 4) & 0x0F
    }

    pub const fn minor(self) -> u8 {
        self.0 & 0x0F
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

impl Serialize for SpecVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SpecVersion", 2)?;
        s.serialize_field("raw", &self.0)?;
        s.serialize_field("version", &self.to_string())?;
        s.end()
    }
}

/// 12-byte preamble shared by every info header revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommonHeader {
    pub signature: [u8; 4],    // "FSPH"
    pub header_length: u32,    // declared length of the info header
    pub reserved1: u16,        // must be zero
    pub spec_version: SpecVersion,
    pub header_revision: u8,   // selects the layout, 1..=4
}

impl CommonHeader {
    /// Canonical preamble for a given revision, used by tests and encoders.
    pub fn for_revision(revision: HeaderRevision) -> Self {
        Self {
            signature: FSP_HEADER_SIGNATURE,
            header_length: revision.fixed_len() as u32,
            reserved1: 0,
            spec_version: SpecVersion(match revision {
                HeaderRevision::V1 => 0x10,
                HeaderRevision::V2 => 0x11,
                HeaderRevision::V3 => 0x20,
                HeaderRevision::V4 => 0x21,
            }),
            header_revision: revision as u8,
        }
    }

    /// Typed revision; fails for codes outside 1..=4.
    pub fn revision(&self) -> Result<HeaderRevision, HeaderError> {
        HeaderRevision::verify(self.header_revision)
    }
}

bitflags! {
    /// Raw image attribute bits. Unknown bits are retained.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct ImageAttributeBits: u32 {
        const GRAPHICS_DISPLAY = image_attr::GRAPHICS_DISPLAY;
        const DISPATCH_MODE    = image_attr::DISPATCH_MODE;
    }
}

bitflags! {
    /// Raw component attribute bits. Bits 12..16 carry the component type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct ComponentAttributeBits: u16 {
        const RELEASE_BUILD    = component_attr::RELEASE_BUILD;
        const OFFICIAL_RELEASE = component_attr::OFFICIAL_RELEASE;
        const TYPE             = component_attr::TYPE_MASK << component_attr::TYPE_SHIFT;
    }
}

impl ComponentAttributeBits {
    /// Raw 4-bit component type code.
    pub const fn type_code(self) -> u8 {
        ((self.bits() >> component_attr::TYPE_SHIFT) & component_attr::TYPE_MASK) as u8
    }
}

/// FSP component type. Unassigned codes resolve to `Reserved`.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize)]
pub enum ComponentType {
    T = 0x01,
    M = 0x02,
    S = 0x03,
    O = 0x08,
    #[num_enum(default)]
    Reserved = 0,
}

impl ComponentType {
    pub const fn name(self) -> &'static str {
        match self {
            ComponentType::T => "FSP-T",
            ComponentType::M => "FSP-M",
            ComponentType::S => "FSP-S",
            ComponentType::O => "FSP-O",
            ComponentType::Reserved => "FSP-ReservedType",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded image attributes. A field is `None` when the owning revision does
/// not define the bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImageAttributes {
    pub graphics_support: Option<bool>,
    pub dispatch_mode_support: Option<bool>,
}

/// Decoded component attributes (V3 and later).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentAttributes {
    pub release_build: bool,
    pub official_release: bool,
    pub component_type: ComponentType,
    /// Code as stored in the header, before the `Reserved` fallback.
    pub type_code: u8,
}

impl ComponentAttributes {
    pub fn from_bits(bits: ComponentAttributeBits) -> Self {
        let type_code = bits.type_code();
        Self {
            release_build: bits.contains(ComponentAttributeBits::RELEASE_BUILD),
            official_release: bits.contains(ComponentAttributeBits::OFFICIAL_RELEASE),
            component_type: ComponentType::from_primitive(type_code),
            type_code,
        }
    }
}

/// Capabilities shared by every info header revision.
pub trait FspHeader {
    fn common(&self) -> &CommonHeader;

    /// Raw image size field.
    fn image_size(&self) -> u32;

    fn image_attributes(&self) -> Option<ImageAttributes>;

    fn component_attributes(&self) -> Option<ComponentAttributes>;

    /// Size of the fixed structure on the wire.
    fn fixed_len(&self) -> usize;
}

/// FSP 1.0 info header (64 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InfoHeaderV1 {
    pub common: CommonHeader,               // 0..12
    pub image_revision: u32,                // 12..16
    pub image_id: [u8; 8],                  // 16..24
    pub image_size: u32,                    // 24..28
    pub image_base: u32,                    // 28..32
    pub image_attribute: u32,               // 32..36
    pub cfg_region_offset: u32,             // 36..40
    pub cfg_region_size: u32,               // 40..44
    pub api_entry_num: u32,                 // 44..48
    pub temp_ram_init_entry_offset: u32,    // 48..52
    pub fsp_init_entry_offset: u32,         // 52..56
    pub notify_phase_entry_offset: u32,     // 56..60
    pub reserved: u32,                      // 60..64
}

/// FSP 1.1 info header (72 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InfoHeaderV2 {
    pub common: CommonHeader,                  // 0..12
    pub image_revision: u32,                   // 12..16
    pub image_id: [u8; 8],                     // 16..24
    pub image_size: u32,                       // 24..28
    pub image_base: u32,                       // 28..32
    pub image_attribute: u32,                  // 32..36
    pub cfg_region_offset: u32,                // 36..40
    pub cfg_region_size: u32,                  // 40..44
    pub api_entry_num: u32,                    // 44..48
    pub temp_ram_init_entry_offset: u32,       // 48..52
    pub fsp_init_entry_offset: u32,            // 52..56
    pub notify_phase_entry_offset: u32,        // 56..60
    pub fsp_memory_init_entry_offset: u32,     // 60..64
    pub temp_ram_exit_entry_offset: u32,       // 64..68
    pub fsp_silicon_init_entry_offset: u32,    // 68..72
}

/// FSP 2.0 info header (72 bytes). The image attribute shrinks to 16 bits and
/// the component attribute takes the other half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InfoHeaderV3 {
    pub common: CommonHeader,                  // 0..12
    pub image_revision: u32,                   // 12..16
    pub image_id: [u8; 8],                     // 16..24
    pub image_size: u32,                       // 24..28
    pub image_base: u32,                       // 28..32
    pub image_attribute: u16,                  // 32..34
    pub component_attribute: u16,              // 34..36
    pub cfg_region_offset: u32,                // 36..40
    pub cfg_region_size: u32,                  // 40..44
    pub reserved2: u32,                        // 44..48
    pub temp_ram_init_entry_offset: u32,       // 48..52
    pub reserved3: u32,                        // 52..56
    pub notify_phase_entry_offset: u32,        // 56..60
    pub fsp_memory_init_entry_offset: u32,     // 60..64
    pub temp_ram_exit_entry_offset: u32,       // 64..68
    pub fsp_silicon_init_entry_offset: u32,    // 68..72
}

/// FSP 2.1 info header. Same layout as V3; image attribute bit 1 gains
/// meaning (dispatch mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InfoHeaderV4 {
    pub layout: InfoHeaderV3,
}

impl InfoHeaderV1 {
    /// Canonical header for tests.
    pub fn test_header() -> Self {
        Self {
            common: CommonHeader::for_revision(HeaderRevision::V1),
            image_revision: 0x0001_0203,
            image_id: *b"TESTFSP1",
            image_size: 0x0002_0000,
            image_base: 0xFFF8_0000,
            image_attribute: 0,
            cfg_region_offset: 0x100,
            cfg_region_size: 0x200,
            api_entry_num: 3,
            temp_ram_init_entry_offset: 0x400,
            fsp_init_entry_offset: 0x500,
            notify_phase_entry_offset: 0x600,
            reserved: 0,
        }
    }
}

impl InfoHeaderV2 {
    /// Canonical header for tests.
    pub fn test_header() -> Self {
        Self {
            common: CommonHeader::for_revision(HeaderRevision::V2),
            image_revision: 0x0001_0203,
            image_id: *b"TESTFSP2",
            image_size: 0x0003_0000,
            image_base: 0xFFF0_0000,
            image_attribute: image_attr::GRAPHICS_DISPLAY,
            cfg_region_offset: 0x100,
            cfg_region_size: 0x200,
            api_entry_num: 6,
            temp_ram_init_entry_offset: 0x400,
            fsp_init_entry_offset: 0,
            notify_phase_entry_offset: 0x600,
            fsp_memory_init_entry_offset: 0x700,
            temp_ram_exit_entry_offset: 0x800,
            fsp_silicon_init_entry_offset: 0x900,
        }
    }
}

impl InfoHeaderV3 {
    /// Canonical header for tests. Component type FSP-M, release build.
    pub fn test_header() -> Self {
        Self {
            common: CommonHeader::for_revision(HeaderRevision::V3),
            image_revision: 0x0907_0605,
            image_id: *b"TESTFSPM",
            image_size: 0x0004_0000,
            image_base: 0xFFE0_0000,
            image_attribute: 0,
            component_attribute: component_attr::RELEASE_BUILD
                | ((component_type_ids::FSP_M as u16) << component_attr::TYPE_SHIFT),
            cfg_region_offset: 0x124,
            cfg_region_size: 0x600,
            reserved2: 0,
            temp_ram_init_entry_offset: 0,
            reserved3: 0,
            notify_phase_entry_offset: 0,
            fsp_memory_init_entry_offset: 0x1000,
            temp_ram_exit_entry_offset: 0x1100,
            fsp_silicon_init_entry_offset: 0,
        }
    }
}

impl InfoHeaderV4 {
    /// Canonical header for tests. Component type FSP-S.
    pub fn test_header() -> Self {
        let mut layout = InfoHeaderV3::test_header();
        layout.common = CommonHeader::for_revision(HeaderRevision::V4);
        layout.image_id = *b"TESTFSPS";
        layout.component_attribute = component_attr::RELEASE_BUILD
            | component_attr::OFFICIAL_RELEASE
            | ((component_type_ids::FSP_S as u16) << component_attr::TYPE_SHIFT);
        layout.fsp_memory_init_entry_offset = 0;
        layout.temp_ram_exit_entry_offset = 0;
        layout.fsp_silicon_init_entry_offset = 0x2000;
        Self { layout }
    }
}

impl FspHeader for InfoHeaderV1 {
    fn common(&self) -> &CommonHeader { &self.common }
    fn image_size(&self) -> u32 { self.image_size }
    fn image_attributes(&self) -> Option<ImageAttributes> { None }
    fn component_attributes(&self) -> Option<ComponentAttributes> { None }
    fn fixed_len(&self) -> usize { HEADER_V1_LEN }
}

impl FspHeader for InfoHeaderV2 {
    fn common(&self) -> &CommonHeader { &self.common }
    fn image_size(&self) -> u32 { self.image_size }

    fn image_attributes(&self) -> Option<ImageAttributes> {
        let bits = ImageAttributeBits::from_bits_retain(self.image_attribute);
        Some(ImageAttributes {
            graphics_support: Some(bits.contains(ImageAttributeBits::GRAPHICS_DISPLAY)),
            dispatch_mode_support: None,
        })
    }

    fn component_attributes(&self) -> Option<ComponentAttributes> { None }
    fn fixed_len(&self) -> usize { HEADER_V2_LEN }
}

impl FspHeader for InfoHeaderV3 {
    fn common(&self) -> &CommonHeader { &self.common }
    fn image_size(&self) -> u32 { self.image_size }

    fn image_attributes(&self) -> Option<ImageAttributes> {
        let bits = ImageAttributeBits::from_bits_retain(u32::from(self.image_attribute));
        Some(ImageAttributes {
            graphics_support: Some(bits.contains(ImageAttributeBits::GRAPHICS_DISPLAY)),
            dispatch_mode_support: None,
        })
    }

    fn component_attributes(&self) -> Option<ComponentAttributes> {
        Some(ComponentAttributes::from_bits(ComponentAttributeBits::from_bits_retain(
            self.component_attribute,
        )))
    }

    fn fixed_len(&self) -> usize { HEADER_V3_LEN }
}

impl FspHeader for InfoHeaderV4 {
    fn common(&self) -> &CommonHeader { &self.layout.common }
    fn image_size(&self) -> u32 { self.layout.image_size }

    fn image_attributes(&self) -> Option<ImageAttributes> {
        let bits = ImageAttributeBits::from_bits_retain(u32::from(self.layout.image_attribute));
        Some(ImageAttributes {
            graphics_support: Some(bits.contains(ImageAttributeBits::GRAPHICS_DISPLAY)),
            dispatch_mode_support: Some(bits.contains(ImageAttributeBits::DISPATCH_MODE)),
        })
    }

    fn component_attributes(&self) -> Option<ComponentAttributes> {
        self.layout.component_attributes()
    }

    fn fixed_len(&self) -> usize { HEADER_V4_LEN }
}

/// Info header of any known revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "revision", content = "fields")]
pub enum InfoHeader {
    V1(InfoHeaderV1),
    V2(InfoHeaderV2),
    V3(InfoHeaderV3),
    V4(InfoHeaderV4),
}

impl InfoHeader {
    pub const fn revision(&self) -> HeaderRevision {
        match self {
            InfoHeader::V1(_) => HeaderRevision::V1,
            InfoHeader::V2(_) => HeaderRevision::V2,
            InfoHeader::V3(_) => HeaderRevision::V3,
            InfoHeader::V4(_) => HeaderRevision::V4,
        }
    }

    fn as_dyn(&self) -> &dyn FspHeader {
        match self {
            InfoHeader::V1(h) => h,
            InfoHeader::V2(h) => h,
            InfoHeader::V3(h) => h,
            InfoHeader::V4(h) => h,
        }
    }
}

impl FspHeader for InfoHeader {
    fn common(&self) -> &CommonHeader { self.as_dyn().common() }
    fn image_size(&self) -> u32 { self.as_dyn().image_size() }
    fn image_attributes(&self) -> Option<ImageAttributes> { self.as_dyn().image_attributes() }
    fn component_attributes(&self) -> Option<ComponentAttributes> { self.as_dyn().component_attributes() }
    fn fixed_len(&self) -> usize { self.revision().fixed_len() }
}

impl From<InfoHeaderV1> for InfoHeader {
    fn from(h: InfoHeaderV1) -> Self { InfoHeader::V1(h) }
}
impl From<InfoHeaderV2> for InfoHeader {
    fn from(h: InfoHeaderV2) -> Self { InfoHeader::V2(h) }
}
impl From<InfoHeaderV3> for InfoHeader {
    fn from(h: InfoHeaderV3) -> Self { InfoHeader::V3(h) }
}
impl From<InfoHeaderV4> for InfoHeader {
    fn from(h: InfoHeaderV4) -> Self { InfoHeader::V4(h) }
}

/// Decode failures. Every kind is recoverable; the scanner skips candidates
/// that produce any of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Buffer too short for the fixed structure.
    #[error("header buffer too short: {have} < {need}")]
    TooShort { have: usize, need: usize },

    /// Magic mismatch.
    #[error("invalid signature: expected {}, got {}", fmt_bytes(.need), fmt_bytes(.have))]
    BadSignature { have: [u8; 4], need: [u8; 4] },

    /// Reserved field is not zero.
    #[error("reserved field must be zero, got {raw:#x}")]
    ReservedNonzero { raw: u16 },

    /// Header revision outside 1..=4.
    #[error("unknown header revision: {raw:#04x}")]
    UnknownRevision { raw: u8 },

    /// Extended header declares more producer data than the buffer holds.
    #[error("extended header declares {declared} producer data bytes, {available} available")]
    TruncatedPayload { declared: u32, available: usize },
}

/// Payload-free view of `HeaderError`, for tallies and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HeaderErrorKind {
    TooShort,
    BadSignature,
    ReservedNonzero,
    UnknownRevision,
    TruncatedPayload,
}

impl HeaderError {
    pub const fn kind(&self) -> HeaderErrorKind {
        match self {
            HeaderError::TooShort { .. } => HeaderErrorKind::TooShort,
            HeaderError::BadSignature { .. } => HeaderErrorKind::BadSignature,
            HeaderError::ReservedNonzero { .. } => HeaderErrorKind::ReservedNonzero,
            HeaderError::UnknownRevision { .. } => HeaderErrorKind::UnknownRevision,
            HeaderError::TruncatedPayload { .. } => HeaderErrorKind::TruncatedPayload,
        }
    }
}
