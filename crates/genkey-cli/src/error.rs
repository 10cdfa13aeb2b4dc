//! Error types for loading and the run pipeline.
//!
//! Every failure is fatal. There are no retries and no partial results: a
//! transient read error aborts the run exactly like a missing file.

use std::{path::PathBuf, time::Duration};

use genkey_crypto::DerivationError;
use hex::FromHexError;
use thiserror::Error;

/// Errors that can occur while gathering key material.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Indirection variable is not set.
    #[error("environment variable {key} is not set")]
    MissingEnvironment {
        /// Variable that was looked up
        key: String,
    },

    /// Source file could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path named by the indirection variable
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Source contents are not valid hex (hex input format only).
    #[error("invalid hex in source named by {key}: {source}")]
    Decode {
        /// Indirection variable of the offending source
        key: String,
        /// Decoding failure
        #[source]
        source: FromHexError,
    },

    /// Loading did not finish within the configured deadline.
    #[error("loading key material exceeded deadline of {deadline:?}")]
    Timeout {
        /// Deadline that elapsed
        deadline: Duration,
    },
}

/// Errors from a complete run.
#[derive(Error, Debug)]
pub enum GenkeyError {
    /// A loader chain failed; nothing was derived.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// HKDF rejected the request.
    #[error("key derivation failed: {0}")]
    Derivation(#[from] DerivationError),

    /// Fingerprint could not be written to the output stream.
    #[error("failed to write fingerprint: {0}")]
    Output(#[source] std::io::Error),
}
