//! Public derivation inputs: salt and info

use std::borrow::Cow;

use super::{HexAppendError, decode::decode_prefix, finish_hex_append};

/// Public randomizer for HKDF-Extract. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Salt {
    raw: Vec<u8>,
}

impl Salt {
    /// Empty salt.
    pub fn empty() -> Self {
        Self { raw: Vec::new() }
    }

    /// Append raw bytes.
    #[must_use]
    pub fn append_raw(mut self, bytes: &[u8]) -> Self {
        self.raw.extend_from_slice(bytes);
        self
    }

    /// Hex-decode `hex` and append the result.
    ///
    /// On malformed input the error carries the salt with the decoded prefix
    /// appended.
    pub fn append_hex(self, hex: impl AsRef<[u8]>) -> Result<Self, HexAppendError<Self>> {
        let (decoded, failure) = decode_prefix(hex.as_ref());
        finish_hex_append(self.append_raw(&decoded), failure)
    }

    /// Salt bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// True for the empty salt.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Public context string for HKDF-Expand.
///
/// Held as raw bytes. Derivation consumes the bytes untouched; no text
/// encoding is applied or checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Info {
    info: Vec<u8>,
}

impl Info {
    /// Empty info.
    pub fn empty() -> Self {
        Self { info: Vec::new() }
    }

    /// Append raw bytes.
    #[must_use]
    pub fn append_raw(mut self, bytes: &[u8]) -> Self {
        self.info.extend_from_slice(bytes);
        self
    }

    /// Hex-decode `hex` and append the result.
    pub fn append_hex(self, hex: impl AsRef<[u8]>) -> Result<Self, HexAppendError<Self>> {
        let (decoded, failure) = decode_prefix(hex.as_ref());
        finish_hex_append(self.append_raw(&decoded), failure)
    }

    /// Info bytes exactly as appended.
    pub fn as_bytes(&self) -> &[u8] {
        &self.info
    }

    /// Info rendered as text for display. Invalid UTF-8 is replaced.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.info)
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.info.len()
    }

    /// True for the empty info.
    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_appends_in_load_order() {
        let salt = Salt::empty().append_raw(&[1]).append_raw(&[2, 3]);
        assert_eq!(salt.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn salt_hex_append_matches_raw_append() {
        let from_hex = Salt::empty().append_hex("000102030405060708090a0b0c").expect("valid hex");
        let from_raw = Salt::empty().append_raw(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(from_hex, from_raw);
    }

    #[test]
    fn salt_odd_length_hex_fails() {
        let err = Salt::empty().append_hex("abc").expect_err("odd length must fail");
        assert_eq!(err.into_hex_error(), hex::FromHexError::OddLength);
    }

    #[test]
    fn empty_values_are_empty() {
        assert!(Salt::empty().is_empty());
        assert!(Info::empty().is_empty());
        assert_eq!(Salt::default(), Salt::empty());
        assert_eq!(Info::default(), Info::empty());
    }

    #[test]
    fn info_keeps_bytes_untouched() {
        let info = Info::empty().append_raw(&[0xf0, 0xf1, 0xff]);
        assert_eq!(info.as_bytes(), &[0xf0, 0xf1, 0xff]);
        assert_eq!(info.len(), 3);
    }

    #[test]
    fn info_renders_text() {
        let info = Info::empty().append_raw(b"app/v1 ").append_raw(b"session");
        assert_eq!(info.to_string_lossy(), "app/v1 session");
    }

    #[test]
    fn info_hex_failure_keeps_prefix() {
        let err = Info::empty().append_hex("6869g").expect_err("invalid hex must fail");
        assert_eq!(err.partial().as_bytes(), b"hi");
    }
}
