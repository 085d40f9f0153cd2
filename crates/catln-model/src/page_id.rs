//! Percent-encoding of page names for use as a single URL path segment.
//!
//! Follows `encodeURIComponent`: ASCII alphanumerics and `-_.!~*'()` stay
//! literal, every other byte of the UTF-8 encoding becomes `%XX`.

use crate::error::{ModelError, Result};

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte)
}

pub fn encode_page_id(page: &str) -> String {
    let mut out = String::with_capacity(page.len());
    for byte in page.bytes() {
        if is_unreserved(byte) {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

pub fn decode_page_id(id: &str) -> Result<String> {
    let invalid = |reason: &str| ModelError::InvalidPageId {
        id: id.to_string(),
        reason: reason.to_string(),
    };
    let bytes = id.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let hex = bytes
                .get(index + 1..index + 3)
                .ok_or_else(|| invalid("truncated escape"))?;
            let hex = std::str::from_utf8(hex).map_err(|_| invalid("bad escape"))?;
            let byte = u8::from_str_radix(hex, 16).map_err(|_| invalid("bad escape"))?;
            decoded.push(byte);
            index += 3;
        } else {
            decoded.push(bytes[index]);
            index += 1;
        }
    }
    String::from_utf8(decoded).map_err(|_| invalid("not UTF-8"))
}
