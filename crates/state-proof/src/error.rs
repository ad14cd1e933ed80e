// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::{Address, B256, U256};
use rlp_codec::RlpError;
use thiserror::Error;

/// Get custom error variants for proofs that fail the trie walk.
///
/// `index` fields refer to the position of the offending node in the proof
/// array, root node first. An inline node reports the index of the proof
/// element it is embedded in.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrieProofError {
    /// Node bytes do not hash to the reference that led to them.
    #[error("node {index} does not hash to the expected reference")]
    HashMismatch {
        /// Position in the proof array.
        index: usize,
    },

    /// Node bytes are not a canonical RLP item.
    #[error("node {index} is not canonical RLP: {source}")]
    NodeDecode {
        /// Position in the proof array.
        index: usize,
        /// The decoding failure.
        source: RlpError,
    },

    /// Node is neither a 2-item nor a 17-item list.
    #[error("node {index} has {items} items, expected 2 or 17")]
    UnexpectedShape {
        /// Position in the proof array.
        index: usize,
        /// Number of RLP items the node decoded to.
        items: usize,
    },

    /// Path fragment starts with an invalid hex-prefix byte.
    #[error("node {index} has invalid hex-prefix byte {byte:#04x}")]
    InvalidHexPrefix {
        /// Position in the proof array.
        index: usize,
        /// The offending first byte of the encoded path.
        byte: u8,
    },

    /// Child reference is neither empty, a 32-byte hash, nor an inline node.
    #[error("node {index} holds a child reference of {length} bytes")]
    InvalidReference {
        /// Position in the proof array.
        index: usize,
        /// Byte length of the reference string.
        length: usize,
    },

    /// Stored path diverges from the key somewhere other than a final leaf.
    #[error("node {index} diverges from the key before the proof ends")]
    KeyMismatch {
        /// Position in the proof array.
        index: usize,
    },

    /// Proof array ended while path nibbles remained unconsumed.
    #[error("proof ended after {consumed} nodes with key nibbles remaining")]
    IncompleteProof {
        /// Number of proof elements consumed before the walk starved.
        consumed: usize,
    },

    /// Proof array continues past the node that decided the outcome.
    #[error("{remaining} proof elements left after the walk terminated")]
    ExtraneousElements {
        /// Number of unconsumed proof elements.
        remaining: usize,
    },
}

/// Get custom error variants for a single storage slot proof.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageProofError {
    /// The trie walk itself failed.
    #[error(transparent)]
    Trie(#[from] TrieProofError),

    /// The proven leaf does not encode the claimed value.
    #[error("slot holds a different value than the claimed {claimed}")]
    ValueMismatch {
        /// The value the response claimed for the slot.
        claimed: U256,
    },

    /// A non-zero value was claimed for a slot the trie excludes.
    #[error("claimed value {claimed} for a slot absent from the trie")]
    AbsentWithValue {
        /// The value the response claimed for the slot.
        claimed: U256,
    },
}

/// Get custom error variants for full `eth_getProof` response verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// Walking the account trie failed.
    #[error("account proof for {address} failed: {source}")]
    AccountProof {
        /// The account the proof is about.
        address: Address,
        /// The trie walk failure.
        source: TrieProofError,
    },

    /// The claimed account fields do not re-encode to the proven leaf.
    #[error("claimed state for {address} does not match the account trie")]
    AccountMismatch {
        /// The account the proof is about.
        address: Address,
    },

    /// Non-empty account state was claimed for an account the trie excludes.
    #[error("claimed non-empty state for absent account {address}")]
    AccountAbsent {
        /// The account the proof is about.
        address: Address,
    },

    /// One storage entry of the response failed.
    #[error("storage proof {index} (key {key}) failed: {source}")]
    Storage {
        /// Position of the entry in `storageProof`.
        index: usize,
        /// The slot key of the failing entry.
        key: B256,
        /// The per-entry failure.
        source: StorageProofError,
    },
}
