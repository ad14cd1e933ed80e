// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::B256;
use rlp_codec::Item;

use crate::error::TrieProofError;
use crate::nibbles::decode_hex_prefix;

/// Number of children a branch node carries besides its value.
const BRANCH_CHILDREN: usize = 16;

/// Item count of a branch node: sixteen children plus a value slot.
const BRANCH_ITEMS: usize = 17;

/// Item count of a leaf or extension node: a path fragment and a payload.
const PAIR_ITEMS: usize = 2;

/// A reference from a node to one of its children.
///
/// Nodes whose encoding reaches 32 bytes are referenced by their keccak-256
/// hash and appear as separate proof elements; shorter nodes are embedded in
/// the parent as a nested list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChildRef {
    /// No child in this slot.
    Empty,
    /// Child stored under its hash, resolved via the next proof element.
    Hash(B256),
    /// Child embedded in the parent, ready to decode in place.
    Inline(Item),
}

/// One decoded trie node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    /// The empty trie.
    Empty,
    /// Terminal node holding the value for the key ending in `path`.
    Leaf {
        /// Remaining key nibbles this leaf covers.
        path: Vec<u8>,
        /// The stored value, itself an RLP payload.
        value: Vec<u8>,
    },
    /// Path-compressing node forwarding to a single child.
    Extension {
        /// Key nibbles this extension consumes.
        path: Vec<u8>,
        /// The forwarded-to child.
        child: ChildRef,
    },
    /// Sixteen-way fan-out plus an optional value for keys ending here.
    Branch {
        /// Child references, one per nibble value; always 16 entries.
        children: Vec<ChildRef>,
        /// Value stored at this exact path, empty when none.
        value: Vec<u8>,
    },
}

impl Node {
    /// Interpret a decoded RLP item as a trie node.
    ///
    /// `index` names the proof element the item came from, for error context.
    pub(crate) fn try_from_item(item: &Item, index: usize) -> Result<Self, TrieProofError> {
        let items = match item {
            Item::Bytes(bytes) if bytes.is_empty() => return Ok(Node::Empty),
            Item::Bytes(_) => return Err(TrieProofError::UnexpectedShape { index, items: 0 }),
            Item::List(items) => items,
        };

        match items.len() {
            PAIR_ITEMS => {
                let encoded_path = string_payload(&items[0], index)?;
                let (path, is_leaf) = decode_hex_prefix(&encoded_path, index)?;
                if is_leaf {
                    let value = string_payload(&items[1], index)?;
                    Ok(Node::Leaf { path, value })
                } else {
                    let child = child_ref(&items[1], index)?;
                    Ok(Node::Extension { path, child })
                }
            }
            BRANCH_ITEMS => {
                let mut children = Vec::with_capacity(BRANCH_CHILDREN);
                for child_item in &items[..BRANCH_CHILDREN] {
                    children.push(child_ref(child_item, index)?);
                }
                let value = string_payload(&items[BRANCH_CHILDREN], index)?;
                Ok(Node::Branch { children, value })
            }
            other => Err(TrieProofError::UnexpectedShape {
                index,
                items: other,
            }),
        }
    }
}

/// Classify one child slot of a branch or extension.
fn child_ref(item: &Item, index: usize) -> Result<ChildRef, TrieProofError> {
    match item {
        Item::Bytes(bytes) if bytes.is_empty() => Ok(ChildRef::Empty),
        Item::Bytes(bytes) if bytes.len() == B256::len_bytes() => {
            Ok(ChildRef::Hash(B256::from_slice(bytes)))
        }
        Item::Bytes(bytes) => Err(TrieProofError::InvalidReference {
            index,
            length: bytes.len(),
        }),
        Item::List(_) => Ok(ChildRef::Inline(item.clone())),
    }
}

fn string_payload(item: &Item, index: usize) -> Result<Vec<u8>, TrieProofError> {
    item.try_as_bytes()
        .map(<[u8]>::to_vec)
        .map_err(|source| TrieProofError::NodeDecode { index, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlp_codec::decode_exact;

    #[test]
    fn test_parse_branch_node() {
        // All-empty branch with an empty value slot.
        let item = Item::List(vec![Item::empty(); 17]);
        let node = Node::try_from_item(&item, 0).unwrap();
        match node {
            Node::Branch { children, value } => {
                assert_eq!(children.len(), 16);
                assert!(children.iter().all(|c| *c == ChildRef::Empty));
                assert!(value.is_empty());
            }
            other => panic!("expected branch, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_real_leaf_node() {
        // Account leaf out of a mainnet-shape proof.
        let raw = hex::decode(concat!(
            "f869a0335649db80be637d281db0cc5896b0ff9869d08379a80fdc38dd073bba",
            "633949b846f8440101a08afc95b7d18a226944b9c2070b6bda1c3a36afcc3730",
            "429d47579c94b9fe5850a0ce92c756baff35fa740c3557c1a971fd24d2d35b7c",
            "8e067880d50cd86bb0bc99"
        ))
        .unwrap();
        let item = decode_exact(&raw).unwrap();
        let node = Node::try_from_item(&item, 1).unwrap();
        match node {
            Node::Leaf { path, value } => {
                assert_eq!(path.len(), 63);
                assert_eq!(path[0], 0x03);
                assert_eq!(value.len(), 70);
            }
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_odd_shapes() {
        let item = Item::List(vec![Item::empty(); 3]);
        assert!(matches!(
            Node::try_from_item(&item, 4),
            Err(TrieProofError::UnexpectedShape { index: 4, items: 3 })
        ));

        let item = Item::Bytes(vec![0x01]);
        assert!(matches!(
            Node::try_from_item(&item, 0),
            Err(TrieProofError::UnexpectedShape { .. })
        ));
    }

    #[test]
    fn test_child_ref_lengths() {
        let hash = Item::Bytes(vec![0xab; 32]);
        assert!(matches!(child_ref(&hash, 0), Ok(ChildRef::Hash(_))));

        let inline = Item::List(vec![Item::empty(), Item::empty()]);
        assert!(matches!(child_ref(&inline, 0), Ok(ChildRef::Inline(_))));

        let bogus = Item::Bytes(vec![0xab; 31]);
        assert!(matches!(
            child_ref(&bogus, 2),
            Err(TrieProofError::InvalidReference {
                index: 2,
                length: 31
            })
        ));
    }
}
