//! Fuzz target for hex appends on typed key material
//!
//! Feeds arbitrary bytes to `append_hex` on every material type.
//!
//! # Invariants
//!
//! - Never panics, whatever the input
//! - Success means the input was fully valid hex and decodes to the appended bytes
//! - Failure keeps a partial value whose bytes are the decoded valid prefix
//! - All four types agree on the bytes they append

#![no_main]

use genkey_crypto::{Info, InputKeyMaterial, Pepper, Salt};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let salt = match Salt::empty().append_hex(data) {
        Ok(salt) => {
            assert_eq!(hex::decode(data).ok().as_deref(), Some(salt.as_bytes()));
            salt
        },
        Err(err) => {
            assert!(hex::decode(data).is_err(), "append failed on decodable input");
            let partial = err.into_partial();
            let prefix = &data[..partial.len() * 2];
            assert_eq!(hex::decode(prefix).ok().as_deref(), Some(partial.as_bytes()));
            partial
        },
    };

    let info = Info::empty().append_hex(data).unwrap_or_else(|err| err.into_partial());
    let ikm = InputKeyMaterial::empty().append_hex(data).unwrap_or_else(|err| err.into_partial());
    let pepper = Pepper::empty().append_hex(data).unwrap_or_else(|err| err.into_partial());

    assert_eq!(salt.as_bytes(), info.as_bytes());
    assert_eq!(salt.as_bytes(), ikm.expose_secret());
    assert_eq!(salt.as_bytes(), pepper.expose_secret());
});
