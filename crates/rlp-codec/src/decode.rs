// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::encode::{
    LIST_LONG_OFFSET, LIST_OFFSET, SHORT_PAYLOAD_MAX, STRING_LONG_OFFSET, STRING_OFFSET,
};
use crate::error::RlpError;
use crate::item::Item;

/// Deepest list nesting [`decode`] accepts.
///
/// Trie nodes and headers nest a handful of levels; input nested deeper than
/// this fails with [`RlpError::NestingTooDeep`] instead of recursing further,
/// so no input can grow the decoder's call stack without bound.
pub const MAX_LIST_DEPTH: usize = 64;

/// Decode one item from the front of `input`.
///
/// Returns the item and the number of bytes it occupied; trailing bytes are
/// left for the caller. Decoding is strict: any input that [`crate::encode`]
/// would not produce is rejected rather than normalized, and lists nested
/// deeper than [`MAX_LIST_DEPTH`] are rejected outright.
pub fn decode(input: &[u8]) -> Result<(Item, usize), RlpError> {
    decode_at(input, 0)
}

/// Decode one item whose enclosing lists put it `depth` levels down.
fn decode_at(input: &[u8], depth: usize) -> Result<(Item, usize), RlpError> {
    let first = *input.first().ok_or(RlpError::UnexpectedEnd {
        needed: 1,
        available: 0,
    })?;

    if first < STRING_OFFSET {
        return Ok((Item::Bytes(vec![first]), 1));
    }

    if first <= STRING_LONG_OFFSET {
        let length = (first - STRING_OFFSET) as usize;
        let payload = take(input, 1, length)?;
        if let [byte] = payload {
            if *byte < STRING_OFFSET {
                return Err(RlpError::NonCanonicalSingleByte);
            }
        }
        return Ok((Item::Bytes(payload.to_vec()), 1 + length));
    }

    if first < LIST_OFFSET {
        let (length, header) = long_length(input, first - STRING_LONG_OFFSET)?;
        let payload = take(input, header, length)?;
        return Ok((Item::Bytes(payload.to_vec()), header + length));
    }

    if first <= LIST_LONG_OFFSET {
        let length = (first - LIST_OFFSET) as usize;
        let payload = take(input, 1, length)?;
        return Ok((Item::List(decode_list_payload(payload, depth + 1)?), 1 + length));
    }

    let (length, header) = long_length(input, first - LIST_LONG_OFFSET)?;
    let payload = take(input, header, length)?;
    Ok((Item::List(decode_list_payload(payload, depth + 1)?), header + length))
}

/// Decode an item that must span the whole input.
pub fn decode_exact(input: &[u8]) -> Result<Item, RlpError> {
    let (item, consumed) = decode(input)?;
    if consumed < input.len() {
        return Err(RlpError::TrailingBytes {
            remaining: input.len() - consumed,
        });
    }
    Ok(item)
}

fn take(input: &[u8], offset: usize, length: usize) -> Result<&[u8], RlpError> {
    let end = offset.checked_add(length).ok_or(RlpError::LengthOverflow)?;
    if end > input.len() {
        return Err(RlpError::UnexpectedEnd {
            needed: end,
            available: input.len(),
        });
    }
    Ok(&input[offset..end])
}

/// Read the big-endian payload length that follows a long-form prefix.
///
/// Returns the payload length and the header size (prefix byte plus length
/// bytes). The length bytes must have no leading zero and must describe a
/// payload too long for the short form.
fn long_length(input: &[u8], length_of_length: u8) -> Result<(usize, usize), RlpError> {
    let length_of_length = length_of_length as usize;
    let length_bytes = take(input, 1, length_of_length)?;
    if length_bytes[0] == 0 {
        return Err(RlpError::LeadingZeroLength);
    }
    if length_of_length > core::mem::size_of::<usize>() {
        return Err(RlpError::LengthOverflow);
    }
    let mut length: usize = 0;
    for byte in length_bytes {
        length = (length << 8) | *byte as usize;
    }
    if length <= SHORT_PAYLOAD_MAX {
        return Err(RlpError::NonMinimalLength { length });
    }
    Ok((length, 1 + length_of_length))
}

/// Decode back-to-back items until the list payload is exhausted.
fn decode_list_payload(payload: &[u8], depth: usize) -> Result<Vec<Item>, RlpError> {
    if depth > MAX_LIST_DEPTH {
        return Err(RlpError::NestingTooDeep);
    }
    let mut items = Vec::new();
    let mut consumed = 0;
    while consumed < payload.len() {
        let (item, used) = decode_at(&payload[consumed..], depth)?;
        items.push(item);
        consumed += used;
    }
    Ok(items)
}
