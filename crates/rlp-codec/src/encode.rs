// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::U256;

use crate::item::{uint_bytes, Item};

/// Longest payload the single-byte length form covers.
pub(crate) const SHORT_PAYLOAD_MAX: usize = 55;

/// Offset of the short string form, also the ceiling for verbatim bytes.
pub(crate) const STRING_OFFSET: u8 = 0x80;

/// Offset of the long string form; the prefix carries a length-of-length.
pub(crate) const STRING_LONG_OFFSET: u8 = 0xb7;

/// Offset of the short list form.
pub(crate) const LIST_OFFSET: u8 = 0xc0;

/// Offset of the long list form.
pub(crate) const LIST_LONG_OFFSET: u8 = 0xf7;

/// Encode an item into its canonical RLP representation.
pub fn encode(item: &Item) -> Vec<u8> {
    match item {
        Item::Bytes(bytes) => encode_bytes(bytes),
        Item::List(items) => encode_list(items),
    }
}

/// Encode a byte string.
///
/// A single byte below 0x80 is its own encoding; everything else gets a
/// length prefix.
pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    if let [byte] = bytes {
        if *byte < STRING_OFFSET {
            return vec![*byte];
        }
    }
    let mut out = length_prefix(bytes.len(), STRING_OFFSET, STRING_LONG_OFFSET);
    out.extend_from_slice(bytes);
    out
}

/// Encode a list of items, prefixing the concatenation of their encodings.
pub fn encode_list(items: &[Item]) -> Vec<u8> {
    let mut payload = Vec::new();
    for item in items {
        payload.extend_from_slice(&encode(item));
    }
    let mut out = length_prefix(payload.len(), LIST_OFFSET, LIST_LONG_OFFSET);
    out.extend_from_slice(&payload);
    out
}

/// Encode an unsigned integer as a minimal big-endian byte string.
///
/// Zero encodes as the empty string (`0x80`), never as `0x00`.
pub fn encode_uint(value: U256) -> Vec<u8> {
    encode_bytes(&uint_bytes(value))
}

fn length_prefix(payload_length: usize, short_offset: u8, long_offset: u8) -> Vec<u8> {
    if payload_length <= SHORT_PAYLOAD_MAX {
        return vec![short_offset + payload_length as u8];
    }
    let length_bytes = uint_bytes(U256::from(payload_length));
    let mut prefix = Vec::with_capacity(1 + length_bytes.len());
    prefix.push(long_offset + length_bytes.len() as u8);
    prefix.extend_from_slice(&length_bytes);
    prefix
}
