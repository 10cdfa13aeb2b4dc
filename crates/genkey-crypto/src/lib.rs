//! Genkey Cryptographic Core
//!
//! Typed key material and the HKDF-SHA256 derivation built on it. Pure
//! functions with deterministic outputs; nothing in this crate touches the
//! environment or the filesystem. Callers load the bytes and hand them over.
//!
//! # Key Lifecycle
//!
//! Four buffers feed a derivation. Two are secret (input key material and
//! pepper), two are public (salt and info). The pepper is folded into the
//! input key material before extraction, pepper bytes first.
//!
//! ```text
//! Pepper ──┐
//!          ├─ into_new_ikm → IKM' = pepper ‖ ikm
//! IKM ─────┘                  │
//!                             ▼
//! Salt ──────────► HKDF-Extract(salt, IKM') → PRK
//!                             │
//! Info ──────────► HKDF-Expand(PRK, info, L) → Derived Key
//!                             │
//!                             ▼
//!                      SHA-256 → Fingerprint (hex)
//! ```
//!
//! The derived key never leaves the process. Only its fingerprint is safe to
//! display.
//!
//! # Security
//!
//! Secret Separation:
//! - [`InputKeyMaterial`], [`Pepper`] and [`Salt`] are distinct types and
//!   cannot be passed for one another
//! - Secret types redact their `Debug` output and have no `Display`
//!
//! Memory Hygiene:
//! - Secret buffers and derived keys are zeroized on drop
//! - Growing a secret buffer zeroizes the allocation it replaces
//!
//! Determinism:
//! - Same material, salt, info and length always produce the same key

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod derivation;
mod fingerprint;
pub mod material;

pub use derivation::{
    DERIVED_KEY_LEN, DerivationError, DerivedKey, KeyMaterial, MAX_DERIVED_KEY_LEN, derive_key,
};
pub use fingerprint::{FINGERPRINT_LEN, Fingerprint, fingerprint};
pub use material::{HexAppendError, Info, InputKeyMaterial, Pepper, Salt};
