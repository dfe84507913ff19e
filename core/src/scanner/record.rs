//! scanner/record.rs
//!
//! One logical record per discovered FSP component: the decoded info header,
//! its derived attributes, the optional extended header and, when the image
//! fits in the buffer, the image bytes as a view of the scanned buffer.

use bytes::Bytes;
use log::trace;
use serde::Serialize;

use crate::constants::FSP_EXT_HEADER_SIGNATURE;
use crate::headers::{decode_extended_header_shared, decode_info_header};
use crate::headers::{ComponentAttributes, ExtendedHeader, FspHeader, HeaderError, HeaderRevision};
use crate::headers::{ImageAttributes, InfoHeader};
use crate::scanner::config::ScanConfig;
use crate::utils::serialize_opt_hex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FspRecord {
    /// Offset of the "FSPH" signature in the scanned buffer.
    pub offset: usize,
    pub header: InfoHeader,
    pub image_attributes: Option<ImageAttributes>,
    pub component_attributes: Option<ComponentAttributes>,
    pub extended_header: Option<ExtendedHeader>,
    /// `image_size` bytes starting at the header, if they were all present.
    /// Shares the scanned buffer's allocation.
    #[serde(serialize_with = "serialize_opt_hex")]
    pub image: Option<Bytes>,
}

impl FspRecord {
    pub fn revision(&self) -> HeaderRevision {
        self.header.revision()
    }

    pub fn image_size(&self) -> u32 {
        self.header.image_size()
    }
}

/// Decode a record from a buffer that starts exactly at an info header.
pub fn decode_one(buf: &[u8]) -> Result<FspRecord, HeaderError> {
    decode_one_with(buf, &ScanConfig::default())
}

/// The buffer is copied once; image and producer data share that copy.
pub fn decode_one_with(buf: &[u8], cfg: &ScanConfig) -> Result<FspRecord, HeaderError> {
    decode_one_shared(&Bytes::copy_from_slice(buf), cfg)
}

/// Like [`decode_one_with`], without copying: image and producer data are
/// slices of `src`.
pub fn decode_one_shared(src: &Bytes, cfg: &ScanConfig) -> Result<FspRecord, HeaderError> {
    build_record(src, 0, cfg).map(|(record, _)| record)
}

/// Build the record for a header at `src[offset..]`. Only info header
/// failures are returned. An extended header that carries the "FSPE"
/// signature but fails to decode is handed back next to the record; any
/// other miss is plain absence.
///
/// Payloads are `Bytes::slice` views of `src`, so overlapping records never
/// duplicate the bytes they cover.
pub(crate) fn build_record(
    src: &Bytes,
    offset: usize,
    cfg: &ScanConfig,
) -> Result<(FspRecord, Option<HeaderError>), HeaderError> {
    let tail = src.get(offset..).unwrap_or_default();
    let header = decode_info_header(tail)?;

    let ext_offset = cfg.extended_header.offset_for(&header);
    let mut malformed = None;
    let extended_header = match offset.checked_add(ext_offset).filter(|&at| at <= src.len()) {
        Some(at) => match decode_extended_header_shared(&src.slice(at..)) {
            Ok(h) => Some(h),
            Err(e) => {
                trace!("no extended header at {:#x}: {}", at, e);
                if src[at..].starts_with(&FSP_EXT_HEADER_SIGNATURE) {
                    malformed = Some(e);
                }
                None
            }
        },
        None => {
            trace!("no room for extended header at {:#x}+{:#x}", offset, ext_offset);
            None
        }
    };

    let image_size = header.image_size() as usize;
    let image = if cfg.capture_image && image_size <= tail.len() {
        Some(src.slice(offset..offset + image_size))
    } else {
        None
    };

    let record = FspRecord {
        offset,
        image_attributes: header.image_attributes(),
        component_attributes: header.component_attributes(),
        header,
        extended_header,
        image,
    };
    Ok((record, malformed))
}
