// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

use crate::decode::MAX_LIST_DEPTH;

/// Get custom error variants for malformed or non-canonical RLP input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RlpError {
    /// Input ended before the declared item did.
    #[error("input truncated: needed {needed} bytes, {available} available")]
    UnexpectedEnd {
        /// Bytes the current item still required.
        needed: usize,
        /// Bytes remaining in the input.
        available: usize,
    },

    /// A single byte below 0x80 was wrapped in a string prefix.
    #[error("non-canonical encoding of a single byte below 0x80")]
    NonCanonicalSingleByte,

    /// Long-form length used where the short form would have fit.
    #[error("non-minimal length encoding for payload of {length} bytes")]
    NonMinimalLength {
        /// The declared payload length.
        length: usize,
    },

    /// Length-of-length bytes start with zero.
    #[error("length bytes have a leading zero")]
    LeadingZeroLength,

    /// Declared payload length does not fit in memory.
    #[error("declared payload length overflows")]
    LengthOverflow,

    /// Input continues past the end of the decoded item.
    #[error("{remaining} trailing bytes after the decoded item")]
    TrailingBytes {
        /// Bytes left over after the item.
        remaining: usize,
    },

    /// Lists nested deeper than the decoder is willing to recurse.
    #[error("list nesting deeper than {} levels", MAX_LIST_DEPTH)]
    NestingTooDeep,

    /// Unsigned integer encoded with a leading zero byte.
    #[error("unsigned integer has a leading zero byte")]
    UintLeadingZero,

    /// Unsigned integer payload wider than the target type.
    #[error("unsigned integer of {length} bytes exceeds the target width")]
    UintTooLarge {
        /// Byte length of the integer payload.
        length: usize,
    },

    /// A byte string was found where a list was required.
    #[error("expected a list item, found a byte string")]
    ExpectedList,

    /// A list was found where a byte string was required.
    #[error("expected a byte string item, found a list")]
    ExpectedString,

    /// A list did not have the expected number of items.
    #[error("expected a list of {expected} items, found {found}")]
    ListLength {
        /// Items the caller required.
        expected: usize,
        /// Items the list held.
        found: usize,
    },

    /// A byte string had the wrong length for a fixed-width target.
    #[error("payload of {found} bytes where {expected} were expected")]
    UnexpectedLength {
        /// Byte length the target type requires.
        expected: usize,
        /// Byte length found in the payload.
        found: usize,
    },
}
