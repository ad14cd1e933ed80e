// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::error::TrieProofError;

/// Expand key bytes into their nibble path, high half-byte first.
pub(crate) fn key_nibbles(key: &[u8]) -> Vec<u8> {
    let mut nibbles = Vec::with_capacity(key.len() * 2);
    for byte in key {
        nibbles.push(byte >> 4);
        nibbles.push(byte & 0x0f);
    }
    nibbles
}

/// Decode a hex-prefix encoded path fragment into nibbles and a leaf flag.
///
/// The first nibble carries the flags: bit 1 marks a leaf, bit 0 marks an
/// odd-length path whose first nibble rides in the flag byte. Even-length
/// paths must pad the low half of the flag byte with zero.
pub(crate) fn decode_hex_prefix(
    encoded: &[u8],
    index: usize,
) -> Result<(Vec<u8>, bool), TrieProofError> {
    let first = *encoded
        .first()
        .ok_or(TrieProofError::InvalidHexPrefix { index, byte: 0 })?;
    let flag = first >> 4;
    if flag > 3 {
        return Err(TrieProofError::InvalidHexPrefix { index, byte: first });
    }
    let is_leaf = flag & 0x02 != 0;
    let is_odd = flag & 0x01 != 0;

    let mut nibbles = Vec::with_capacity(encoded.len() * 2 - 1);
    if is_odd {
        nibbles.push(first & 0x0f);
    } else if first & 0x0f != 0 {
        return Err(TrieProofError::InvalidHexPrefix { index, byte: first });
    }
    for byte in &encoded[1..] {
        nibbles.push(byte >> 4);
        nibbles.push(byte & 0x0f);
    }
    Ok((nibbles, is_leaf))
}

/// Pack nibbles into the hex-prefix form used by leaf and extension nodes.
#[cfg(test)]
pub(crate) fn encode_hex_prefix(nibbles: &[u8], is_leaf: bool) -> Vec<u8> {
    let flag = if is_leaf { 0x02u8 } else { 0x00 };
    let mut out = Vec::with_capacity(nibbles.len() / 2 + 1);
    let rest = if nibbles.len() % 2 == 1 {
        out.push((flag | 0x01) << 4 | nibbles[0]);
        &nibbles[1..]
    } else {
        out.push(flag << 4);
        nibbles
    };
    for pair in rest.chunks_exact(2) {
        out.push(pair[0] << 4 | pair[1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_nibbles_order() {
        assert_eq!(key_nibbles(&[0xab, 0x05]), vec![0x0a, 0x0b, 0x00, 0x05]);
        assert!(key_nibbles(&[]).is_empty());
    }

    #[test]
    fn test_hex_prefix_round_trips() {
        let cases: &[(&[u8], bool)] = &[
            (&[], false),
            (&[0x01], false),
            (&[0x01, 0x02], true),
            (&[0x0f, 0x00, 0x0a], true),
            (&[0x03, 0x05, 0x06, 0x04, 0x09], false),
        ];
        for (nibbles, is_leaf) in cases {
            let encoded = encode_hex_prefix(nibbles, *is_leaf);
            let (decoded, leaf) = decode_hex_prefix(&encoded, 0).unwrap();
            assert_eq!(decoded.as_slice(), *nibbles);
            assert_eq!(leaf, *is_leaf);
        }
    }

    #[test]
    fn test_decode_known_fragments() {
        // 0x33... is an odd leaf whose first path nibble is 3
        let (nibbles, is_leaf) = decode_hex_prefix(&[0x33, 0x56, 0x49], 0).unwrap();
        assert!(is_leaf);
        assert_eq!(nibbles, vec![0x03, 0x05, 0x06, 0x04, 0x09]);

        // 0x00... is an even extension
        let (nibbles, is_leaf) = decode_hex_prefix(&[0x00, 0xab], 0).unwrap();
        assert!(!is_leaf);
        assert_eq!(nibbles, vec![0x0a, 0x0b]);
    }

    #[test]
    fn test_decode_rejects_bad_flags() {
        assert!(matches!(
            decode_hex_prefix(&[0x40], 3),
            Err(TrieProofError::InvalidHexPrefix { index: 3, byte: 0x40 })
        ));
        // even-length form with non-zero padding nibble
        assert!(matches!(
            decode_hex_prefix(&[0x05, 0xab], 0),
            Err(TrieProofError::InvalidHexPrefix { byte: 0x05, .. })
        ));
        assert!(matches!(
            decode_hex_prefix(&[], 0),
            Err(TrieProofError::InvalidHexPrefix { .. })
        ));
    }
}
