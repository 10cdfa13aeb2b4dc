//! Run pipeline: load, derive, fingerprint, emit.
//!
//! Strictly sequential at this level. Loading must fully succeed before
//! derivation starts, and the only thing ever written out is the fingerprint.

use std::io::Write;

use genkey_crypto::{DERIVED_KEY_LEN, DerivationError, Fingerprint, MAX_DERIVED_KEY_LEN};

use crate::{
    env::Environment,
    error::GenkeyError,
    loader::{LoaderConfig, load_material},
};

/// Configuration for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where and how key material is loaded
    pub loader: LoaderConfig,
    /// Derived key length in bytes
    pub key_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { loader: LoaderConfig::default(), key_length: DERIVED_KEY_LEN }
    }
}

/// Load key material through `env`, derive a key and fingerprint it.
///
/// An out-of-range key length is rejected before any source is read.
pub async fn derive_fingerprint<E: Environment>(
    env: &E,
    config: &Config,
) -> Result<Fingerprint, GenkeyError> {
    if config.key_length > MAX_DERIVED_KEY_LEN {
        return Err(DerivationError::KeyLengthTooLarge {
            requested: config.key_length,
            max: MAX_DERIVED_KEY_LEN,
        }
        .into());
    }

    let material = load_material(env, &config.loader).await?;
    let key = material.generate_key(config.key_length)?;

    tracing::debug!(key_length = key.len(), "derived key");
    Ok(key.fingerprint())
}

/// Write `fingerprint` as one lowercase hex line.
pub fn write_fingerprint<W: Write>(
    out: &mut W,
    fingerprint: &Fingerprint,
) -> Result<(), GenkeyError> {
    writeln!(out, "{fingerprint}").and_then(|()| out.flush()).map_err(GenkeyError::Output)
}

/// Derive and emit. Nothing is written unless derivation succeeds.
pub async fn run<E: Environment, W: Write>(
    env: &E,
    config: &Config,
    out: &mut W,
) -> Result<Fingerprint, GenkeyError> {
    let fingerprint = derive_fingerprint(env, config).await?;
    write_fingerprint(out, &fingerprint)?;
    Ok(fingerprint)
}
