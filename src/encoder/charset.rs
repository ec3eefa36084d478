//! ISO-8859-2 (Latin-2) text boundary.
//!
//! UPN records are stored as single-byte Latin-2 text and the QR symbol
//! announces that through ECI 4.

use encoding_rs::ISO_8859_2;

use crate::error::FieldError;

/// Check whether a character has a Latin-2 byte
pub fn is_representable(c: char) -> bool {
    let mut buf = [0u8; 4];
    let (_, _, had_errors) = ISO_8859_2.encode(c.encode_utf8(&mut buf));
    !had_errors
}

/// First character of `s` without a Latin-2 byte
pub fn first_unrepresentable(s: &str) -> Option<char> {
    if s.is_ascii() {
        return None;
    }
    s.chars().find(|&c| !is_representable(c))
}

/// Convert text to Latin-2 bytes
///
/// Fails instead of substituting characters the encoding cannot hold.
pub fn encode(s: &str) -> Result<Vec<u8>, FieldError> {
    if let Some(c) = first_unrepresentable(s) {
        return Err(FieldError::UnsupportedCharacter(c));
    }
    let (bytes, _, _) = ISO_8859_2.encode(s);
    Ok(bytes.into_owned())
}
