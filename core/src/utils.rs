use bytes::Bytes;
use serde::Serializer;

/// Offset of the first occurrence of `needle` in `haystack`.
pub fn find_signature(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Printable ASCII as a byte-string literal, anything else as hex.
pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

// Serde helpers: owned payloads render as hex strings.
pub(crate) fn serialize_hex<S: Serializer>(data: &Bytes, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hex::encode(data))
}

pub(crate) fn serialize_opt_hex<S: Serializer>(data: &Option<Bytes>, s: S) -> Result<S::Ok, S::Error> {
    match data {
        Some(d) => s.serialize_some(&hex::encode(d)),
        None => s.serialize_none(),
    }
}
