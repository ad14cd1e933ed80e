// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::{keccak256, Address, B256, U256};

/// Storage slot holding `mapping[key]` for a Solidity mapping declared at
/// slot `position`.
///
/// Solidity places a mapping entry at `keccak256(key ++ position)` with both
/// halves as 32-byte words. The mapping's own slot stays empty; only the
/// derived slots are populated.
pub fn mapping_entry_slot(key: B256, position: U256) -> B256 {
    let mut input = [0u8; 64];
    input[..32].copy_from_slice(key.as_slice());
    input[32..].copy_from_slice(&position.to_be_bytes::<32>());
    keccak256(input)
}

/// Storage slot holding `balances[holder]` for a
/// `mapping(address => uint256)` declared at slot `position`.
///
/// This is the ERC-20 balance layout: the 20-byte address is left-padded to
/// a word before hashing.
pub fn holder_balance_slot(holder: Address, position: U256) -> B256 {
    mapping_entry_slot(B256::left_padding_from(holder.as_slice()), position)
}
