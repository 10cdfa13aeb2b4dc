//! Loader pipeline: environment indirection → bounded read → typed value.
//!
//! Each input is produced by its own chain of three fallible steps:
//!
//! ```text
//! env key ──resolve_path──► path ──read_bounded──► bytes ──wrap──► typed value
//!            MissingEnvironment       Io                  Decode (hex only)
//! ```
//!
//! A chain stops at its first failure. The four chains share nothing and run
//! concurrently; [`load_material`] joins them fail-fast, so derivation can
//! only ever see material from four successful chains.
//!
//! Reads stop silently at a per-source ceiling. Bytes past the ceiling are
//! never read and are not an error.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use genkey_crypto::{HexAppendError, Info, InputKeyMaterial, KeyMaterial, Pepper, Salt};
use tokio::{fs::File, io::AsyncReadExt, time::Instant};
use zeroize::Zeroizing;

use crate::{env::Environment, error::LoadError};

/// Indirection variable naming the salt file.
pub const SALT_ENV_KEY: &str = "ENV_IN_PUBLIC_SALT_LOCATION";
/// Indirection variable naming the info file.
pub const INFO_ENV_KEY: &str = "ENV_IN_PUBLIC_INFO_LOCATION";
/// Indirection variable naming the input key material file.
pub const IKM_ENV_KEY: &str = "ENV_IN_SECRET_IKM_LOCATION";
/// Indirection variable naming the pepper file.
pub const PEPPER_ENV_KEY: &str = "ENV_IN_SECRET_PEPPER_LOCATION";

/// Read ceiling for salt, in bytes.
pub const SALT_LIMIT: u64 = 32;
/// Read ceiling for info, in bytes.
pub const INFO_LIMIT: u64 = 1024;
/// Read ceiling for input key material, in bytes.
pub const IKM_LIMIT: u64 = 32;
/// Read ceiling for pepper, in bytes.
pub const PEPPER_LIMIT: u64 = 32;

/// Upper bound on up-front buffer allocation for a single read.
const MAX_PREALLOC: usize = 4096;

/// How source file contents are turned into bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceEncoding {
    /// Contents are the bytes themselves.
    #[default]
    Raw,
    /// Contents are hex text. Trailing ASCII whitespace is ignored and the
    /// read ceiling covers twice the byte limit.
    Hex,
}

/// One environment-indirected input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Variable holding the file path
    pub env_key: String,
    /// Maximum number of decoded bytes taken from the file
    pub limit: u64,
}

impl Source {
    /// Create a source reading at most `limit` bytes from the file named by
    /// `env_key`.
    pub fn new(env_key: impl Into<String>, limit: u64) -> Self {
        Self { env_key: env_key.into(), limit }
    }
}

/// Loader configuration: where each input comes from and how it is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Salt source
    pub salt: Source,
    /// Info source
    pub info: Source,
    /// Input key material source
    pub ikm: Source,
    /// Pepper source
    pub pepper: Source,
    /// Encoding shared by all four sources
    pub encoding: SourceEncoding,
    /// Single deadline covering all four chains. `None` waits indefinitely.
    pub deadline: Option<Duration>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            salt: Source::new(SALT_ENV_KEY, SALT_LIMIT),
            info: Source::new(INFO_ENV_KEY, INFO_LIMIT),
            ikm: Source::new(IKM_ENV_KEY, IKM_LIMIT),
            pepper: Source::new(PEPPER_ENV_KEY, PEPPER_LIMIT),
            encoding: SourceEncoding::Raw,
            deadline: None,
        }
    }
}

/// Salt and info, loaded as a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicInput {
    /// Public salt
    pub salt: Salt,
    /// Public info
    pub info: Info,
}

/// Typed value a chain ends in.
///
/// Lets one generic chain serve all four inputs while the values themselves
/// stay distinct types.
pub trait LoadedValue: Sized {
    /// Canonical empty value.
    fn empty() -> Self;

    /// Append bytes as-is.
    fn append_raw(self, bytes: &[u8]) -> Self;

    /// Append hex-decoded bytes.
    fn append_hex(self, hex: &[u8]) -> Result<Self, HexAppendError<Self>>;
}

macro_rules! impl_loaded_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl LoadedValue for $ty {
                fn empty() -> Self {
                    <$ty>::empty()
                }

                fn append_raw(self, bytes: &[u8]) -> Self {
                    <$ty>::append_raw(self, bytes)
                }

                fn append_hex(self, hex: &[u8]) -> Result<Self, HexAppendError<Self>> {
                    <$ty>::append_hex(self, hex)
                }
            }
        )+
    };
}

impl_loaded_value!(Salt, Info, InputKeyMaterial, Pepper);

/// Resolve the path held in `key`.
///
/// # Errors
///
/// `MissingEnvironment` if `key` is not set. An empty value resolves to an
/// empty path, which then fails at the read step.
pub fn resolve_path<E: Environment>(env: &E, key: &str) -> Result<PathBuf, LoadError> {
    let path = env
        .var_os(key)
        .map(PathBuf::from)
        .ok_or_else(|| LoadError::MissingEnvironment { key: key.to_string() })?;

    tracing::debug!(key, path = %path.display(), "resolved source location");
    Ok(path)
}

/// Read at most `limit` bytes from `path`.
///
/// Anything past `limit` is left unread. The returned buffer is zeroized on
/// drop since it may hold secret material.
///
/// # Errors
///
/// `Io` if the file cannot be opened or read.
pub async fn read_bounded(path: &Path, limit: u64) -> Result<Zeroizing<Vec<u8>>, LoadError> {
    let io_error = |source: std::io::Error| LoadError::Io { path: path.to_path_buf(), source };

    let file = File::open(path).await.map_err(io_error)?;

    let capacity = usize::try_from(limit).unwrap_or(MAX_PREALLOC).min(MAX_PREALLOC);
    let mut buffer = Zeroizing::new(Vec::with_capacity(capacity));
    file.take(limit).read_to_end(&mut buffer).await.map_err(io_error)?;

    tracing::debug!(path = %path.display(), bytes = buffer.len(), limit, "read source");
    Ok(buffer)
}

/// Run one chain: resolve, read, wrap.
async fn load_value<E, T>(
    env: &E,
    source: &Source,
    encoding: SourceEncoding,
) -> Result<T, LoadError>
where
    E: Environment,
    T: LoadedValue,
{
    let path = resolve_path(env, &source.env_key)?;

    match encoding {
        SourceEncoding::Raw => {
            let bytes = read_bounded(&path, source.limit).await?;
            Ok(T::empty().append_raw(&bytes))
        },
        SourceEncoding::Hex => {
            let text = read_bounded(&path, source.limit.saturating_mul(2)).await?;
            T::empty().append_hex(text.trim_ascii_end()).map_err(|err| LoadError::Decode {
                key: source.env_key.clone(),
                source: err.into_hex_error(),
            })
        },
    }
}

/// Load the salt.
pub async fn load_salt<E: Environment>(env: &E, config: &LoaderConfig) -> Result<Salt, LoadError> {
    load_value(env, &config.salt, config.encoding).await
}

/// Load the info.
pub async fn load_info<E: Environment>(env: &E, config: &LoaderConfig) -> Result<Info, LoadError> {
    load_value(env, &config.info, config.encoding).await
}

/// Load the input key material as stored, without the pepper.
pub async fn load_original_ikm<E: Environment>(
    env: &E,
    config: &LoaderConfig,
) -> Result<InputKeyMaterial, LoadError> {
    load_value(env, &config.ikm, config.encoding).await
}

/// Load the pepper.
pub async fn load_pepper<E: Environment>(
    env: &E,
    config: &LoaderConfig,
) -> Result<Pepper, LoadError> {
    load_value(env, &config.pepper, config.encoding).await
}

/// Load pepper and original IKM, then fold the pepper in (pepper first).
pub async fn load_ikm<E: Environment>(
    env: &E,
    config: &LoaderConfig,
) -> Result<InputKeyMaterial, LoadError> {
    let (pepper, original) =
        tokio::try_join!(load_pepper(env, config), load_original_ikm(env, config))?;

    Ok(pepper.into_new_ikm(original))
}

/// Load salt and info.
pub async fn load_public_input<E: Environment>(
    env: &E,
    config: &LoaderConfig,
) -> Result<PublicInput, LoadError> {
    let (salt, info) = tokio::try_join!(load_salt(env, config), load_info(env, config))?;
    Ok(PublicInput { salt, info })
}

/// Run all four chains and bundle the result for derivation.
///
/// The chains run concurrently. The first failure cancels the others and is
/// returned. With a deadline configured, the whole phase shares it and
/// overrunning yields `Timeout`, including when every chain finished but the
/// deadline had already passed by then.
pub async fn load_material<E: Environment>(
    env: &E,
    config: &LoaderConfig,
) -> Result<KeyMaterial, LoadError> {
    let gather = async {
        let (public, ikm) =
            tokio::try_join!(load_public_input(env, config), load_ikm(env, config))?;
        Ok::<_, LoadError>(KeyMaterial::new(ikm, public.salt, public.info))
    };

    let material = match config.deadline {
        Some(deadline) => {
            let start = Instant::now();
            let material = tokio::time::timeout(deadline, gather)
                .await
                .map_err(|_| LoadError::Timeout { deadline })??;

            // Finishing after the deadline is still a timeout
            if start.elapsed() >= deadline {
                return Err(LoadError::Timeout { deadline });
            }
            material
        },
        None => gather.await?,
    };

    tracing::info!(
        salt_len = material.salt().len(),
        info = %material.info().to_string_lossy(),
        "key material loaded"
    );
    Ok(material)
}
