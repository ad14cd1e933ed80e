// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::{b256, keccak256, B256};
use rlp_codec::decode_exact;

use crate::error::TrieProofError;
use crate::nibbles::key_nibbles;
use crate::node::{ChildRef, Node};

/// Root hash of a trie with no entries: keccak-256 of the RLP empty string.
pub const EMPTY_ROOT_HASH: B256 =
    b256!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421");

/// Code hash of an account without code: keccak-256 of zero bytes.
pub const KECCAK_EMPTY: B256 =
    b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");

/// What a structurally valid proof demonstrates about a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofOutcome {
    /// The key is present in the trie; the leaf's value payload is attached.
    Included(Vec<u8>),
    /// The trie provably holds no entry for the key.
    Excluded,
}

/// Walk a proof from `root` and decide whether `key` is included in or
/// excluded from the committed trie.
///
/// `proof` is the ordered node list an `eth_getProof` call returns, root node
/// first. Every hash link is recomputed: a node is only entered if its bytes
/// keccak-hash to the reference that led to it, starting from `root` itself,
/// so no byte of the proof is trusted. `key` is the raw trie path; state and
/// storage tries key by `keccak256` of address and slot, so hash before
/// calling.
///
/// Exclusion is as much a proven outcome as inclusion: a walk that ends at an
/// empty branch slot, or at a final leaf for a different key, certifies the
/// key is absent. An empty proof list is accepted only against
/// [`EMPTY_ROOT_HASH`], which commits to a trie with no entries at all.
/// Structural defects of any kind are errors, never outcomes.
pub fn verify_proof(
    root: B256,
    key: &[u8],
    proof: &[impl AsRef<[u8]>],
) -> Result<ProofOutcome, TrieProofError> {
    // An empty trie has no nodes to send; `eth_getProof` answers with an
    // empty list and the root alone certifies every key absent.
    if proof.is_empty() && root == EMPTY_ROOT_HASH {
        return Ok(ProofOutcome::Excluded);
    }

    let path = key_nibbles(key);
    let mut cursor = 0usize;
    let mut pending = ChildRef::Hash(root);
    let mut element = 0usize; // next unread proof element
    let mut current = 0usize; // element whose bytes the walker is inside

    loop {
        let node = match pending {
            ChildRef::Hash(expected) => {
                let raw = proof
                    .get(element)
                    .ok_or(TrieProofError::IncompleteProof { consumed: element })?
                    .as_ref();
                if keccak256(raw) != expected {
                    return Err(TrieProofError::HashMismatch { index: element });
                }
                current = element;
                element += 1;
                let item = decode_exact(raw).map_err(|source| TrieProofError::NodeDecode {
                    index: current,
                    source,
                })?;
                Node::try_from_item(&item, current)?
            }
            ChildRef::Inline(ref item) => Node::try_from_item(item, current)?,
            ChildRef::Empty => return terminate(ProofOutcome::Excluded, element, proof.len()),
        };

        match node {
            Node::Empty => return terminate(ProofOutcome::Excluded, element, proof.len()),
            Node::Leaf {
                path: stored,
                value,
            } => {
                return if stored.as_slice() == &path[cursor..] {
                    terminate(ProofOutcome::Included(value), element, proof.len())
                } else if element == proof.len() {
                    // A diverging leaf certifies exclusion, but only as the
                    // final node of the proof.
                    Ok(ProofOutcome::Excluded)
                } else {
                    Err(TrieProofError::KeyMismatch { index: current })
                };
            }
            Node::Extension {
                path: stored,
                child,
            } => {
                if !path[cursor..].starts_with(&stored) {
                    return Err(TrieProofError::KeyMismatch { index: current });
                }
                cursor += stored.len();
                if child == ChildRef::Empty {
                    return Err(TrieProofError::InvalidReference {
                        index: current,
                        length: 0,
                    });
                }
                pending = child;
            }
            Node::Branch {
                mut children,
                value,
            } => {
                if cursor == path.len() {
                    let outcome = if value.is_empty() {
                        ProofOutcome::Excluded
                    } else {
                        ProofOutcome::Included(value)
                    };
                    return terminate(outcome, element, proof.len());
                }
                let slot = path[cursor] as usize;
                cursor += 1;
                pending = children.swap_remove(slot);
            }
        }
    }
}

/// Whether the proof demonstrates that `key` has no entry under `root`.
///
/// A structurally invalid proof is an error, not a `false`.
pub fn is_non_existing(
    root: B256,
    key: &[u8],
    proof: &[impl AsRef<[u8]>],
) -> Result<bool, TrieProofError> {
    Ok(matches!(
        verify_proof(root, key, proof)?,
        ProofOutcome::Excluded
    ))
}

fn terminate(
    outcome: ProofOutcome,
    consumed: usize,
    total: usize,
) -> Result<ProofOutcome, TrieProofError> {
    if consumed != total {
        return Err(TrieProofError::ExtraneousElements {
            remaining: total - consumed,
        });
    }
    Ok(outcome)
}
