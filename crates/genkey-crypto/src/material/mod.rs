//! Typed key material buffers
//!
//! Every buffer starts empty and grows only by appending. Raw appends take
//! bytes as-is; hex appends decode first and keep whatever decoded cleanly
//! when the input is malformed.

mod decode;
mod public;
mod secret;

use std::fmt;

use hex::FromHexError;

pub use self::{
    public::{Info, Salt},
    secret::{InputKeyMaterial, Pepper},
};

/// Hex input could not be fully decoded.
///
/// Holds the value with every byte decoded before the failure already
/// appended. The partial value is never safe to derive from; it exists so
/// callers can inspect how far decoding got.
pub struct HexAppendError<T> {
    partial: T,
    source: FromHexError,
}

impl<T> HexAppendError<T> {
    /// Decoding failure that stopped the append.
    pub fn hex_error(&self) -> &FromHexError {
        &self.source
    }

    /// Value with the successfully decoded prefix appended.
    pub fn partial(&self) -> &T {
        &self.partial
    }

    /// Consume the error, returning the partially appended value.
    pub fn into_partial(self) -> T {
        self.partial
    }

    /// Consume the error, returning only the decoding failure.
    pub fn into_hex_error(self) -> FromHexError {
        self.source
    }
}

// The partial value may be secret, so it stays out of Debug.
impl<T> fmt::Debug for HexAppendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HexAppendError").field("source", &self.source).finish_non_exhaustive()
    }
}

impl<T> fmt::Display for HexAppendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex input: {}", self.source)
    }
}

impl<T> std::error::Error for HexAppendError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Turn an append plus an optional decode failure into a `Result`.
fn finish_hex_append<T>(value: T, failure: Option<FromHexError>) -> Result<T, HexAppendError<T>> {
    match failure {
        None => Ok(value),
        Some(source) => Err(HexAppendError { partial: value, source }),
    }
}
