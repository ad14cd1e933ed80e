// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};

/// An `eth_getProof` response, EIP-1186 wire shape.
///
/// Everything in here is untrusted until it has been verified against a
/// state root taken from a verified block header. Byte strings and
/// quantities use the 0x-prefixed hex interchange form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofResponse {
    /// The account the proof is about.
    pub address: Address,
    /// Trie nodes from the state root down to the account leaf.
    pub account_proof: Vec<Bytes>,
    /// Claimed balance in wei.
    pub balance: U256,
    /// Claimed hash of the account's code.
    pub code_hash: B256,
    /// Claimed transaction count.
    pub nonce: U64,
    /// Claimed root of the account's storage trie.
    pub storage_hash: B256,
    /// One proof per requested storage slot.
    pub storage_proof: Vec<StorageProof>,
}

/// One storage slot's claim and proof inside a [`ProofResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageProof {
    /// The slot key as requested. Clients echo it back either as a
    /// quantity or as 32-byte data, so both hex forms are accepted.
    pub key: U256,
    /// Claimed slot value; zero means the slot holds nothing.
    pub value: U256,
    /// Trie nodes from the storage root down to the slot leaf.
    pub proof: Vec<Bytes>,
}

impl StorageProof {
    /// The 32-byte left-padded form of the key, the unit the storage trie
    /// actually hashes.
    pub fn padded_key(&self) -> B256 {
        B256::from(self.key)
    }
}
