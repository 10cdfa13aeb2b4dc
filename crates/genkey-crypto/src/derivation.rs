//! Key derivation using HKDF-SHA256

use std::fmt;

use hkdf::Hkdf;
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::{
    fingerprint::{Fingerprint, fingerprint},
    material::{Info, InputKeyMaterial, Salt},
};

/// Default derived key length in bytes.
pub const DERIVED_KEY_LEN: usize = 32;

/// Largest output HKDF-Expand allows with SHA-256 (255 blocks of 32 bytes).
pub const MAX_DERIVED_KEY_LEN: usize = 255 * 32;

/// Errors from key derivation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DerivationError {
    /// Requested output is longer than HKDF-SHA256 can produce.
    #[error("requested key length {requested} exceeds HKDF-SHA256 maximum of {max}")]
    KeyLengthTooLarge {
        /// Length asked for
        requested: usize,
        /// Largest permitted length
        max: usize,
    },

    /// The HKDF primitive rejected the expand step.
    #[error("HKDF expand failed for output length {0}")]
    Expand(usize),
}

/// Output of HKDF. Zeroized on drop, redacted in `Debug`.
pub struct DerivedKey {
    key: Zeroizing<Vec<u8>>,
}

impl DerivedKey {
    pub(crate) fn from_bytes(key: Vec<u8>) -> Self {
        Self { key: Zeroizing::new(key) }
    }

    /// Key bytes. Never log or print these.
    pub fn expose_secret(&self) -> &[u8] {
        &self.key
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.key.len()
    }

    /// True for a zero-length key.
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// SHA-256 fingerprint of this key, safe to display.
    pub fn fingerprint(&self) -> Fingerprint {
        fingerprint(self)
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey").field("len", &self.key.len()).finish_non_exhaustive()
    }
}

/// Derive `key_len` bytes with HKDF-SHA256.
///
/// `ikm` and `salt` go to extract, `info` to expand. `info` is used as raw
/// bytes.
///
/// # Errors
///
/// - `KeyLengthTooLarge` if `key_len` exceeds [`MAX_DERIVED_KEY_LEN`]
/// - `Expand` if the primitive rejects the request
pub fn derive_key(
    ikm: &InputKeyMaterial,
    salt: &Salt,
    info: &[u8],
    key_len: usize,
) -> Result<DerivedKey, DerivationError> {
    if key_len > MAX_DERIVED_KEY_LEN {
        return Err(DerivationError::KeyLengthTooLarge {
            requested: key_len,
            max: MAX_DERIVED_KEY_LEN,
        });
    }

    let hkdf = Hkdf::<Sha256>::new(Some(salt.as_bytes()), ikm.expose_secret());

    let mut okm = vec![0u8; key_len];
    hkdf.expand(info, &mut okm).map_err(|_| DerivationError::Expand(key_len))?;

    Ok(DerivedKey::from_bytes(okm))
}

/// Everything a derivation needs, gathered in one place.
///
/// The IKM held here already has the pepper folded in.
#[derive(Debug)]
pub struct KeyMaterial {
    ikm: InputKeyMaterial,
    salt: Salt,
    info: Info,
}

impl KeyMaterial {
    /// Bundle derivation inputs.
    pub fn new(ikm: InputKeyMaterial, salt: Salt, info: Info) -> Self {
        Self { ikm, salt, info }
    }

    /// Public salt.
    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    /// Public info.
    pub fn info(&self) -> &Info {
        &self.info
    }

    /// Derive a key of `key_len` bytes from the bundled inputs.
    pub fn generate_key(&self, key_len: usize) -> Result<DerivedKey, DerivationError> {
        derive_key(&self.ikm, &self.salt, self.info.as_bytes(), key_len)
    }
}
