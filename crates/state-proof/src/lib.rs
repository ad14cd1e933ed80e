// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod account;
mod error;
mod nibbles;
mod node;
mod slot;
mod types;
mod verify;

pub use account::{
    verify_account_proof, verify_proof_response, verify_storage_entry, Account,
};
pub use error::{StorageProofError, TrieProofError, VerifyError};
pub use slot::{holder_balance_slot, mapping_entry_slot};
pub use types::{ProofResponse, StorageProof};
pub use verify::{
    is_non_existing, verify_proof, ProofOutcome, EMPTY_ROOT_HASH, KECCAK_EMPTY,
};
