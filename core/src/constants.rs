/// Info header signature ("FSPH"), found at the start of every FSP component.
pub const FSP_HEADER_SIGNATURE: [u8; 4] = *b"FSPH";

/// Extended (producer) header signature ("FSPE").
pub const FSP_EXT_HEADER_SIGNATURE: [u8; 4] = *b"FSPE";

/// Preamble shared by every info header revision.
pub const COMMON_HEADER_LEN: usize = 12;

/// Fixed info header sizes per revision.
pub const HEADER_V1_LEN: usize = 64;
pub const HEADER_V2_LEN: usize = 72;
pub const HEADER_V3_LEN: usize = 72;
pub const HEADER_V4_LEN: usize = 72;

/// Fixed prefix of the extended header, before the producer data:
/// signature(4) length(4) revision(1) reserved(1) producer id(6)
/// producer revision(4) producer data size(4).
/// Some descriptions of this header give a 20-byte prefix; the fields above
/// add up to 24, and a 20-byte prefix would overlap the data size field.
pub const EXT_HEADER_FIXED_LEN: usize = 24;

/// Offset (from the info header start) at which the extended header is probed
/// by default. Matches the V2-V4 header size; V1 headers are 64 bytes long.
pub const DEFAULT_EXT_HEADER_OFFSET: usize = 72;

/// Image attribute bits.
pub mod image_attr {
    pub const GRAPHICS_DISPLAY: u32 = 0x0001;
    pub const DISPATCH_MODE: u32    = 0x0002;
}

/// Component attribute bits.
pub mod component_attr {
    pub const RELEASE_BUILD: u16    = 0x0001;
    pub const OFFICIAL_RELEASE: u16 = 0x0002;
    /// Component type lives in bits 12..16.
    pub const TYPE_SHIFT: u16       = 12;
    pub const TYPE_MASK: u16        = 0x000F;
}

/// Component type codes (bits 12..16 of the component attribute).
pub mod component_type_ids {
    pub const FSP_T: u8 = 1;
    pub const FSP_M: u8 = 2;
    pub const FSP_S: u8 = 3;
    pub const FSP_O: u8 = 8;
}
