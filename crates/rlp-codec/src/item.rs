// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::U256;

use crate::error::RlpError;

/// A decoded RLP item: either a byte string or a list of items.
///
/// This is the full value space of RLP. Interpretation of a byte string as an
/// integer, hash, or address is left to the caller; [`Item::try_as_uint`] and
/// [`Item::try_as_u64`] apply the canonical minimal-big-endian reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// An opaque byte string, possibly empty.
    Bytes(Vec<u8>),
    /// An ordered list of nested items, possibly empty.
    List(Vec<Item>),
}

impl Item {
    /// The empty byte string, the canonical encoding of integer zero
    /// and of absent values.
    pub fn empty() -> Self {
        Item::Bytes(Vec::new())
    }

    /// Borrow the payload if this item is a byte string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Item::Bytes(bytes) => Some(bytes),
            Item::List(_) => None,
        }
    }

    /// Borrow the elements if this item is a list.
    pub fn as_list(&self) -> Option<&[Item]> {
        match self {
            Item::Bytes(_) => None,
            Item::List(items) => Some(items),
        }
    }

    /// Whether this item is the empty byte string.
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Item::Bytes(bytes) if bytes.is_empty())
    }

    /// Borrow the payload, failing if this item is a list.
    pub fn try_as_bytes(&self) -> Result<&[u8], RlpError> {
        self.as_bytes().ok_or(RlpError::ExpectedString)
    }

    /// Borrow the elements, failing if this item is a byte string.
    pub fn try_as_list(&self) -> Result<&[Item], RlpError> {
        self.as_list().ok_or(RlpError::ExpectedList)
    }

    /// Read this item as a canonical unsigned 256-bit integer.
    ///
    /// The payload must be minimal big-endian: at most 32 bytes, no leading
    /// zero byte, with the empty string denoting zero.
    pub fn try_as_uint(&self) -> Result<U256, RlpError> {
        let bytes = self.try_as_bytes()?;
        if bytes.len() > 32 {
            return Err(RlpError::UintTooLarge { length: bytes.len() });
        }
        if bytes.first() == Some(&0) {
            return Err(RlpError::UintLeadingZero);
        }
        Ok(U256::from_be_slice(bytes))
    }

    /// Read this item as a canonical unsigned 64-bit integer.
    pub fn try_as_u64(&self) -> Result<u64, RlpError> {
        let bytes = self.try_as_bytes()?;
        if bytes.len() > 8 {
            return Err(RlpError::UintTooLarge { length: bytes.len() });
        }
        if bytes.first() == Some(&0) {
            return Err(RlpError::UintLeadingZero);
        }
        let mut padded = [0u8; 8];
        padded[8 - bytes.len()..].copy_from_slice(bytes);
        Ok(u64::from_be_bytes(padded))
    }
}

impl From<Vec<u8>> for Item {
    fn from(bytes: Vec<u8>) -> Self {
        Item::Bytes(bytes)
    }
}

impl From<&[u8]> for Item {
    fn from(bytes: &[u8]) -> Self {
        Item::Bytes(bytes.to_vec())
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Item::List(items)
    }
}

impl From<u64> for Item {
    fn from(value: u64) -> Self {
        Item::Bytes(uint_bytes(U256::from(value)))
    }
}

impl From<U256> for Item {
    fn from(value: U256) -> Self {
        Item::Bytes(uint_bytes(value))
    }
}

/// Minimal big-endian byte representation of an unsigned integer.
///
/// Zero maps to the empty vector, matching RLP's canonical integer rule.
pub fn uint_bytes(value: U256) -> Vec<u8> {
    let bytes = value.to_be_bytes::<32>();
    let first_nonzero = bytes.iter().position(|b| *b != 0).unwrap_or(32);
    bytes[first_nonzero..].to_vec()
}
