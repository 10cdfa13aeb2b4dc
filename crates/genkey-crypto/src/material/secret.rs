//! Secret key material: input key material and pepper
//!
//! Both buffers are zeroized on drop and never show their bytes through
//! `Debug`. The only way to read them is [`InputKeyMaterial::expose_secret`]
//! or [`Pepper::expose_secret`].

use std::fmt;

use zeroize::Zeroize;

use super::{HexAppendError, decode::decode_prefix, finish_hex_append};

/// Append `bytes` to a secret buffer without leaving copies behind.
///
/// When the buffer has to grow, the old allocation is zeroized before it is
/// released.
fn append_secret(buffer: &mut Vec<u8>, bytes: &[u8]) {
    if buffer.capacity() - buffer.len() >= bytes.len() {
        buffer.extend_from_slice(bytes);
        return;
    }

    let mut grown = Vec::with_capacity(buffer.len() + bytes.len());
    grown.extend_from_slice(buffer);
    grown.extend_from_slice(bytes);
    buffer.zeroize();
    *buffer = grown;
}

/// Primary secret entropy fed to HKDF-Extract.
///
/// Starts as [`InputKeyMaterial::empty`] and grows by appending. A pepper is
/// folded in with [`Pepper::into_new_ikm`].
#[derive(Default)]
pub struct InputKeyMaterial {
    secret: Vec<u8>,
}

impl InputKeyMaterial {
    /// Empty input key material (zero-length).
    pub fn empty() -> Self {
        Self { secret: Vec::new() }
    }

    /// Append raw bytes.
    #[must_use]
    pub fn append_raw(mut self, bytes: &[u8]) -> Self {
        append_secret(&mut self.secret, bytes);
        self
    }

    /// Hex-decode `hex` and append the result.
    ///
    /// On malformed input the error carries the material with every pair
    /// decoded before the failure appended. Callers must not derive from it.
    pub fn append_hex(self, hex: impl AsRef<[u8]>) -> Result<Self, HexAppendError<Self>> {
        let (decoded, failure) = decode_prefix(hex.as_ref());
        finish_hex_append(self.append_raw(&decoded), failure)
    }

    /// Secret bytes, for handing to the KDF.
    pub fn expose_secret(&self) -> &[u8] {
        &self.secret
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.secret.len()
    }

    /// True for the empty material.
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

impl Drop for InputKeyMaterial {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl fmt::Debug for InputKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputKeyMaterial").field("len", &self.secret.len()).finish_non_exhaustive()
    }
}

/// Secondary secret mixed into the input key material before extraction.
///
/// Usually held apart from the IKM so that leaking one alone is not enough to
/// reproduce the derived key.
#[derive(Default)]
pub struct Pepper {
    secret: Vec<u8>,
}

impl Pepper {
    /// Empty pepper. Folding it into an IKM leaves the IKM unchanged.
    pub fn empty() -> Self {
        Self { secret: Vec::new() }
    }

    /// Append raw bytes.
    #[must_use]
    pub fn append_raw(mut self, bytes: &[u8]) -> Self {
        append_secret(&mut self.secret, bytes);
        self
    }

    /// Hex-decode `hex` and append the result.
    ///
    /// Same partial-append behavior as [`InputKeyMaterial::append_hex`].
    pub fn append_hex(self, hex: impl AsRef<[u8]>) -> Result<Self, HexAppendError<Self>> {
        let (decoded, failure) = decode_prefix(hex.as_ref());
        finish_hex_append(self.append_raw(&decoded), failure)
    }

    /// Fold this pepper into `original`, producing new input key material.
    ///
    /// The result is `pepper ‖ original`. The order is part of the key
    /// schedule: `original ‖ pepper` derives a different, incompatible key.
    pub fn into_new_ikm(self, original: InputKeyMaterial) -> InputKeyMaterial {
        let mut secret = Vec::with_capacity(self.secret.len() + original.secret.len());
        secret.extend_from_slice(&self.secret);
        secret.extend_from_slice(&original.secret);

        // Both inputs are zeroized as they drop here
        InputKeyMaterial { secret }
    }

    /// Secret bytes.
    pub fn expose_secret(&self) -> &[u8] {
        &self.secret
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.secret.len()
    }

    /// True for the empty pepper.
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

impl Drop for Pepper {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl fmt::Debug for Pepper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pepper").field("len", &self.secret.len()).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ikm_has_no_bytes() {
        let ikm = InputKeyMaterial::empty();
        assert!(ikm.is_empty());
        assert_eq!(ikm.expose_secret(), b"");
    }

    #[test]
    fn append_raw_concatenates_in_order() {
        let ikm = InputKeyMaterial::empty().append_raw(b"abc").append_raw(b"def");
        assert_eq!(ikm.expose_secret(), b"abcdef");
        assert_eq!(ikm.len(), 6);
    }

    #[test]
    fn append_grows_past_initial_capacity() {
        let mut ikm = InputKeyMaterial::empty();
        for i in 0..100u8 {
            ikm = ikm.append_raw(&[i]);
        }
        let expected: Vec<u8> = (0..100u8).collect();
        assert_eq!(ikm.expose_secret(), expected.as_slice());
    }

    #[test]
    fn append_hex_decodes_before_appending() {
        let ikm = InputKeyMaterial::empty()
            .append_raw(&[0x01])
            .append_hex("0203")
            .expect("valid hex must append");
        assert_eq!(ikm.expose_secret(), &[0x01, 0x02, 0x03]);
    }

    #[test]
    fn append_hex_failure_keeps_decoded_prefix() {
        let err =
            InputKeyMaterial::empty().append_hex("aabbzz").expect_err("invalid hex must fail");
        assert_eq!(*err.hex_error(), hex::FromHexError::InvalidHexCharacter { c: 'z', index: 4 });
        assert_eq!(err.into_partial().expose_secret(), &[0xaa, 0xbb]);
    }

    #[test]
    fn pepper_goes_first() {
        let ikm = InputKeyMaterial::empty().append_raw(b"original");
        let pepper = Pepper::empty().append_raw(b"pepper");

        let combined = pepper.into_new_ikm(ikm);

        assert_eq!(combined.expose_secret(), b"pepperoriginal");
    }

    #[test]
    fn empty_pepper_is_identity() {
        let ikm = InputKeyMaterial::empty().append_raw(&[9, 8, 7]);
        let combined = Pepper::empty().into_new_ikm(ikm);
        assert_eq!(combined.expose_secret(), &[9, 8, 7]);
    }

    #[test]
    fn pepper_into_empty_ikm_is_pepper() {
        let pepper = Pepper::empty().append_raw(&[1, 2]);
        let combined = pepper.into_new_ikm(InputKeyMaterial::empty());
        assert_eq!(combined.expose_secret(), &[1, 2]);
    }

    #[test]
    fn debug_output_is_redacted() {
        let ikm = InputKeyMaterial::empty().append_raw(b"hunter2");
        let pepper = Pepper::empty().append_raw(b"hunter3");

        let rendered = format!("{ikm:?} {pepper:?}");

        assert!(!rendered.contains("hunter"));
        assert!(rendered.contains("len: 7"));
    }
}
