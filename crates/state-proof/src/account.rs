// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::{keccak256, Address, B256, U256};
use rlp_codec::{decode_exact, encode_list, encode_uint, Item, RlpError};

use crate::error::{StorageProofError, VerifyError};
use crate::types::{ProofResponse, StorageProof};
use crate::verify::{verify_proof, ProofOutcome, EMPTY_ROOT_HASH, KECCAK_EMPTY};

/// Account state as stored in one state-trie leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    /// Number of transactions sent from the account.
    pub nonce: u64,
    /// Balance in wei.
    pub balance: U256,
    /// Root of the account's storage trie.
    pub storage_root: B256,
    /// keccak-256 of the account's code.
    pub code_hash: B256,
}

impl Account {
    /// The state of an account the trie has never seen.
    pub fn empty() -> Self {
        Account {
            nonce: 0,
            balance: U256::ZERO,
            storage_root: EMPTY_ROOT_HASH,
            code_hash: KECCAK_EMPTY,
        }
    }

    /// Whether this is the empty account, the only state an excluded
    /// address may claim.
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// RLP-encode the four account fields as the state trie stores them.
    ///
    /// Integers are minimal big-endian, so a zero balance becomes the empty
    /// string. The result is compared byte-for-byte against proven leaves;
    /// any deviation here would make honest accounts unverifiable.
    pub fn to_rlp(&self) -> Vec<u8> {
        encode_list(&[
            Item::from(self.nonce),
            Item::from(self.balance),
            Item::from(self.storage_root.as_slice()),
            Item::from(self.code_hash.as_slice()),
        ])
    }

    /// Decode a state-trie leaf value back into account fields.
    pub fn from_rlp(bytes: &[u8]) -> Result<Self, RlpError> {
        let item = decode_exact(bytes)?;
        let fields = item.try_as_list()?;
        let [nonce, balance, storage_root, code_hash] = fields else {
            return Err(RlpError::ListLength {
                expected: 4,
                found: fields.len(),
            });
        };
        Ok(Account {
            nonce: nonce.try_as_u64()?,
            balance: balance.try_as_uint()?,
            storage_root: b256_field(storage_root)?,
            code_hash: b256_field(code_hash)?,
        })
    }
}

impl From<&ProofResponse> for Account {
    fn from(response: &ProofResponse) -> Self {
        Account {
            nonce: response.nonce.to::<u64>(),
            balance: response.balance,
            storage_root: response.storage_hash,
            code_hash: response.code_hash,
        }
    }
}

fn b256_field(item: &Item) -> Result<B256, RlpError> {
    let bytes = item.try_as_bytes()?;
    if bytes.len() != B256::len_bytes() {
        return Err(RlpError::UnexpectedLength {
            expected: B256::len_bytes(),
            found: bytes.len(),
        });
    }
    Ok(B256::from_slice(bytes))
}

/// Verify the account half of an `eth_getProof` response against a trusted
/// state root.
///
/// The account trie keys by `keccak256(address)`; the proven leaf must equal
/// the RLP of the claimed fields byte-for-byte. An exclusion outcome is
/// accepted only when the claimed fields are exactly the empty account,
/// which is how never-touched addresses come back from honest nodes.
pub fn verify_account_proof(
    state_root: B256,
    address: Address,
    response: &ProofResponse,
) -> Result<(), VerifyError> {
    let claimed = Account::from(response);
    let outcome = verify_proof(
        state_root,
        keccak256(address).as_slice(),
        &response.account_proof,
    )
    .map_err(|source| VerifyError::AccountProof { address, source })?;

    match outcome {
        ProofOutcome::Included(leaf) if leaf == claimed.to_rlp() => Ok(()),
        ProofOutcome::Included(_) => Err(VerifyError::AccountMismatch { address }),
        ProofOutcome::Excluded if claimed.is_empty() => Ok(()),
        ProofOutcome::Excluded => Err(VerifyError::AccountAbsent { address }),
    }
}

/// Verify one storage-slot claim against a proven storage root.
///
/// The storage trie keys by `keccak256` of the 32-byte padded slot key, and
/// an included leaf holds `rlp(value)`. A claimed value of zero must come
/// with an exclusion proof: tries never store zero, they delete it.
pub fn verify_storage_entry(
    storage_root: B256,
    entry: &StorageProof,
) -> Result<(), StorageProofError> {
    let path = keccak256(entry.padded_key());
    let outcome = verify_proof(storage_root, path.as_slice(), &entry.proof)?;
    match outcome {
        ProofOutcome::Included(leaf) => {
            if entry.value.is_zero() || leaf != encode_uint(entry.value) {
                return Err(StorageProofError::ValueMismatch {
                    claimed: entry.value,
                });
            }
            Ok(())
        }
        ProofOutcome::Excluded if entry.value.is_zero() => Ok(()),
        ProofOutcome::Excluded => Err(StorageProofError::AbsentWithValue {
            claimed: entry.value,
        }),
    }
}

/// Verify every claim in an `eth_getProof` response.
///
/// The account leaf is checked against `state_root` first; that pins the
/// response's `storageHash`, which each storage entry is then checked
/// against. There is no partial success: the first failing check fails the
/// whole response.
pub fn verify_proof_response(
    state_root: B256,
    address: Address,
    response: &ProofResponse,
) -> Result<(), VerifyError> {
    verify_account_proof(state_root, address, response)?;
    for (index, entry) in response.storage_proof.iter().enumerate() {
        verify_storage_entry(response.storage_hash, entry).map_err(|source| {
            VerifyError::Storage {
                index,
                key: entry.padded_key(),
                source,
            }
        })?;
    }
    Ok(())
}
