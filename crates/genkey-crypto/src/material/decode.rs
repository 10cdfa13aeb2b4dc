//! Hex decoding that keeps the valid prefix on failure

use hex::FromHexError;
use zeroize::Zeroizing;

/// Decode `input` one pair at a time, stopping at the first bad pair.
///
/// Returns every byte decoded before the failure along with the failure, if
/// any. An invalid character is reported ahead of an odd trailing length, so
/// `"0g1"` fails on `g` rather than on length.
pub(super) fn decode_prefix(input: &[u8]) -> (Zeroizing<Vec<u8>>, Option<FromHexError>) {
    let mut decoded = Zeroizing::new(Vec::with_capacity(input.len() / 2));

    for (pair_index, pair) in input.chunks(2).enumerate() {
        let offset = pair_index * 2;

        let [high, low] = pair else {
            let failure = match pair.first() {
                Some(&c) if !c.is_ascii_hexdigit() => {
                    FromHexError::InvalidHexCharacter { c: char::from(c), index: offset }
                },
                _ => FromHexError::OddLength,
            };
            return (decoded, Some(failure));
        };

        let mut byte = [0u8; 1];
        match hex::decode_to_slice([*high, *low], &mut byte) {
            Ok(()) => decoded.push(byte[0]),
            Err(FromHexError::InvalidHexCharacter { c, index }) => {
                let failure = FromHexError::InvalidHexCharacter { c, index: offset + index };
                return (decoded, Some(failure));
            },
            Err(other) => return (decoded, Some(other)),
        }
    }

    (decoded, None)
}
