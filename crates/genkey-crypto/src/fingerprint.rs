//! Displayable fingerprints of derived keys

use std::fmt;

use sha2::{Digest, Sha256};

use crate::derivation::DerivedKey;

/// Fingerprint length in bytes (SHA-256 output).
pub const FINGERPRINT_LEN: usize = 32;

/// SHA-256 digest of a derived key.
///
/// Depends only on the key bytes. Displays as lowercase hex with no
/// separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hash a derived key with SHA-256.
pub fn fingerprint(key: &DerivedKey) -> Fingerprint {
    Fingerprint(Sha256::digest(key.expose_secret()).into())
}
