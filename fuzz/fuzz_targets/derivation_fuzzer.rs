//! Fuzz target for pepper composition and HKDF derivation
//!
//! # Strategy
//!
//! - Arbitrary ikm, pepper, salt and info (empty through large)
//! - Key lengths across the whole valid range and just past it
//!
//! # Invariants
//!
//! - Derivation is deterministic (same inputs → same key and fingerprint)
//! - Composed ikm is exactly pepper ‖ ikm
//! - Lengths up to the HKDF maximum succeed with the requested length
//! - Lengths past the maximum fail without panicking

#![no_main]

use arbitrary::Arbitrary;
use genkey_crypto::{InputKeyMaterial, MAX_DERIVED_KEY_LEN, Pepper, Salt, derive_key};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct DerivationScenario {
    ikm: Vec<u8>,
    pepper: Vec<u8>,
    salt: Vec<u8>,
    info: Vec<u8>,
    key_len: u16,
}

fuzz_target!(|scenario: DerivationScenario| {
    let combined = Pepper::empty()
        .append_raw(&scenario.pepper)
        .into_new_ikm(InputKeyMaterial::empty().append_raw(&scenario.ikm));

    let mut expected = scenario.pepper.clone();
    expected.extend_from_slice(&scenario.ikm);
    assert_eq!(combined.expose_secret(), expected.as_slice());

    let salt = Salt::empty().append_raw(&scenario.salt);
    let key_len = usize::from(scenario.key_len) % (MAX_DERIVED_KEY_LEN + 2);

    match derive_key(&combined, &salt, &scenario.info, key_len) {
        Ok(first) => {
            assert!(key_len <= MAX_DERIVED_KEY_LEN);
            assert_eq!(first.len(), key_len);

            let Ok(second) = derive_key(&combined, &salt, &scenario.info, key_len) else {
                panic!("derivation succeeded once then failed");
            };
            assert_eq!(first.expose_secret(), second.expose_secret());
            assert_eq!(first.fingerprint(), second.fingerprint());
        },
        Err(_) => assert!(key_len > MAX_DERIVED_KEY_LEN),
    }
});
