//! Genkey key derivation runtime.
//!
//! Gathers key material from files named by environment variables, derives a
//! key with [`genkey_crypto`] and reports only the key's fingerprint.
//!
//! # Architecture
//!
//! [`genkey_crypto`] holds the pure parts: typed material, the pepper rule,
//! HKDF and fingerprinting. This crate provides the I/O glue around it. The
//! environment is reached through the [`Environment`] trait so the loader
//! runs the same against the real process ([`SystemEnv`]) and against an
//! in-memory map in tests ([`MemoryEnv`]).
//!
//! # Components
//!
//! - [`loader`]: Four concurrent resolve → read → wrap chains
//! - [`run`]: Load, derive, fingerprint and emit, in that order
//! - [`Config`]: Key length plus loader settings
//! - [`GenkeyError`]: Everything that can abort a run

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod env;
mod error;
pub mod loader;
mod pipeline;
mod system_env;

pub use env::{Environment, MemoryEnv};
pub use error::{GenkeyError, LoadError};
pub use loader::{LoaderConfig, PublicInput, Source, SourceEncoding, load_material};
pub use pipeline::{Config, derive_fingerprint, run, write_fingerprint};
pub use system_env::SystemEnv;
