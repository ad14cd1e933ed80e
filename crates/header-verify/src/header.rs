// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::{keccak256, Address, Bloom, Bytes, B256, B64, U256, U64};
use rlp_codec::{encode_list, Item};
use serde::{Deserialize, Serialize};

use crate::error::HeaderError;
use crate::forks::{FieldSet, ForkSchedule};

/// Block header fields as `eth_getBlockByNumber` returns them.
///
/// Fields introduced by a hardfork are optional here and required by the
/// encoder once the block height says the fork is in force. Unknown JSON
/// fields (transactions, uncles, size and friends) are ignored on parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcHeader {
    /// Block hash the node reports for this header.
    pub hash: B256,
    /// Hash of the parent block header.
    pub parent_hash: B256,
    /// Hash of the uncles list.
    pub sha3_uncles: B256,
    /// Beneficiary address.
    pub miner: Address,
    /// Root of the world state trie after this block.
    pub state_root: B256,
    /// Root of this block's transactions trie.
    pub transactions_root: B256,
    /// Root of this block's receipts trie.
    pub receipts_root: B256,
    /// Bloom filter over this block's logs.
    pub logs_bloom: Bloom,
    /// Proof-of-work difficulty; zero after the merge.
    pub difficulty: U256,
    /// Block height.
    pub number: U64,
    /// Gas limit for the block.
    pub gas_limit: U64,
    /// Gas consumed by the block.
    pub gas_used: U64,
    /// Unix timestamp the block was sealed at.
    pub timestamp: U64,
    /// Arbitrary sealer data, at most 32 bytes.
    pub extra_data: Bytes,
    /// Proof-of-work mix digest; the RANDAO reveal after the merge.
    pub mix_hash: B256,
    /// Proof-of-work nonce, always eight bytes on the wire.
    pub nonce: B64,
    /// Base fee per gas, present from London on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fee_per_gas: Option<U256>,
    /// Root of the withdrawals list, present from Shanghai on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawals_root: Option<B256>,
    /// Blob gas consumed, present from Cancun on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_gas_used: Option<U64>,
    /// Running blob gas excess, present from Cancun on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excess_blob_gas: Option<U64>,
    /// Parent beacon block root, present from Cancun on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_beacon_block_root: Option<B256>,
    /// Hash of the execution requests list, present from Prague on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests_hash: Option<B256>,
}

/// RLP-encode `header` with the field set in force for its chain and height.
///
/// The fork table decides how many fields the list carries; a header missing
/// a field its era requires cannot be encoded and errors out by field name.
pub fn build_header(header: &RpcHeader, chain_id: u64) -> Result<Vec<u8>, HeaderError> {
    let schedule = ForkSchedule::for_chain(chain_id);
    let field_set = schedule.field_set_at(header.number.to::<u64>());
    encode_with(header, field_set)
}

/// Build the header and require that it hashes to `expected_hash`.
///
/// Returns the encoded header on success, the form on-chain verifiers and
/// light-client checks consume.
pub fn build_and_verify(
    header: &RpcHeader,
    expected_hash: B256,
    chain_id: u64,
) -> Result<Vec<u8>, HeaderError> {
    let encoded = build_header(header, chain_id)?;
    let computed = keccak256(&encoded);
    if computed != expected_hash {
        return Err(HeaderError::HashMismatch {
            computed,
            expected: expected_hash,
        });
    }
    Ok(encoded)
}

fn encode_with(header: &RpcHeader, field_set: FieldSet) -> Result<Vec<u8>, HeaderError> {
    let mut fields: Vec<Item> = Vec::with_capacity(field_set.field_count());
    fields.push(Item::from(header.parent_hash.as_slice()));
    fields.push(Item::from(header.sha3_uncles.as_slice()));
    fields.push(Item::from(header.miner.as_slice()));
    fields.push(Item::from(header.state_root.as_slice()));
    fields.push(Item::from(header.transactions_root.as_slice()));
    fields.push(Item::from(header.receipts_root.as_slice()));
    fields.push(Item::from(header.logs_bloom.as_slice()));
    fields.push(Item::from(header.difficulty));
    fields.push(Item::from(header.number.to::<u64>()));
    fields.push(Item::from(header.gas_limit.to::<u64>()));
    fields.push(Item::from(header.gas_used.to::<u64>()));
    fields.push(Item::from(header.timestamp.to::<u64>()));
    fields.push(Item::from(header.extra_data.to_vec()));
    fields.push(Item::from(header.mix_hash.as_slice()));
    fields.push(Item::from(header.nonce.as_slice()));

    if field_set >= FieldSet::London {
        let base_fee = require(header.base_fee_per_gas, "baseFeePerGas")?;
        fields.push(Item::from(base_fee));
    }
    if field_set >= FieldSet::Shanghai {
        let withdrawals_root = require(header.withdrawals_root, "withdrawalsRoot")?;
        fields.push(Item::from(withdrawals_root.as_slice()));
    }
    if field_set >= FieldSet::Cancun {
        let blob_gas_used = require(header.blob_gas_used, "blobGasUsed")?;
        let excess_blob_gas = require(header.excess_blob_gas, "excessBlobGas")?;
        let parent_beacon_root = require(header.parent_beacon_block_root, "parentBeaconBlockRoot")?;
        fields.push(Item::from(blob_gas_used.to::<u64>()));
        fields.push(Item::from(excess_blob_gas.to::<u64>()));
        fields.push(Item::from(parent_beacon_root.as_slice()));
    }
    if field_set >= FieldSet::Prague {
        let requests_hash = require(header.requests_hash, "requestsHash")?;
        fields.push(Item::from(requests_hash.as_slice()));
    }

    Ok(encode_list(&fields))
}

fn require<T>(field: Option<T>, name: &'static str) -> Result<T, HeaderError> {
    field.ok_or(HeaderError::MissingField { name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlp_codec::decode_exact;

    /// A header with deterministic bytes everywhere and every fork field
    /// populated; the block number decides which of them get encoded.
    fn mock_header(number: u64) -> RpcHeader {
        RpcHeader {
            hash: B256::ZERO,
            parent_hash: B256::repeat_byte(0x11),
            sha3_uncles: B256::repeat_byte(0x22),
            miner: Address::repeat_byte(0x33),
            state_root: B256::repeat_byte(0x44),
            transactions_root: B256::repeat_byte(0x55),
            receipts_root: B256::repeat_byte(0x66),
            logs_bloom: Bloom::ZERO,
            difficulty: U256::ZERO,
            number: U64::from(number),
            gas_limit: U64::from(30_000_000u64),
            gas_used: U64::from(12_345_678u64),
            timestamp: U64::from(1_700_000_000u64),
            extra_data: Bytes::from_static(b"trieste"),
            mix_hash: B256::repeat_byte(0x77),
            nonce: B64::ZERO,
            base_fee_per_gas: Some(U256::from(7)),
            withdrawals_root: Some(B256::repeat_byte(0x88)),
            blob_gas_used: Some(U64::ZERO),
            excess_blob_gas: Some(U64::ZERO),
            parent_beacon_block_root: Some(B256::repeat_byte(0x99)),
            requests_hash: Some(B256::repeat_byte(0xaa)),
        }
    }

    fn encoded_item_count(encoded: &[u8]) -> usize {
        decode_exact(encoded)
            .unwrap()
            .try_as_list()
            .unwrap()
            .len()
    }

    #[test]
    fn test_field_count_follows_block_height() {
        let cases = [
            (12_000_000u64, 15usize),
            (13_000_000, 16),
            (17_100_000, 17),
            (19_500_000, 20),
            (22_500_000, 21),
        ];
        for (number, expected_items) in cases {
            let encoded = build_header(&mock_header(number), 1).unwrap();
            assert_eq!(
                encoded_item_count(&encoded),
                expected_items,
                "block {number}"
            );
        }
    }

    #[test]
    fn test_chain_id_selects_schedule() {
        // Low heights are London on Sepolia and Shanghai on Holesky.
        let encoded = build_header(&mock_header(1_000), 11_155_111).unwrap();
        assert_eq!(encoded_item_count(&encoded), 16);

        let encoded = build_header(&mock_header(1_000), 17_000).unwrap();
        assert_eq!(encoded_item_count(&encoded), 17);

        // Unknown chains get mainnet rules.
        let encoded = build_header(&mock_header(1_000), 424_242).unwrap();
        assert_eq!(encoded_item_count(&encoded), 15);
    }

    #[test]
    fn test_build_and_verify_round_trip() {
        let header = mock_header(19_500_000);
        let encoded = build_header(&header, 1).unwrap();
        let hash = keccak256(&encoded);

        let verified = build_and_verify(&header, hash, 1).unwrap();
        assert_eq!(verified, encoded);
    }

    #[test]
    fn test_tampered_field_changes_hash() {
        let header = mock_header(19_500_000);
        let hash = keccak256(build_header(&header, 1).unwrap());

        let mut tampered = header.clone();
        tampered.state_root = B256::repeat_byte(0x45);
        let result = build_and_verify(&tampered, hash, 1);
        assert!(matches!(
            result,
            Err(HeaderError::HashMismatch { expected, .. }) if expected == hash
        ));
    }

    #[test]
    fn test_wrong_era_field_set_changes_hash() {
        // The same header bytes hashed with one fork field too few must not
        // verify; a pre-Shanghai chain id drops withdrawalsRoot.
        let header = mock_header(5_200_000);
        let cancun = build_and_verify(
            &header,
            keccak256(build_header(&header, 11_155_111).unwrap()),
            11_155_111,
        )
        .unwrap();
        assert_eq!(encoded_item_count(&cancun), 20);

        let mainnet_hash = keccak256(build_header(&header, 1).unwrap());
        let result = build_and_verify(&header, mainnet_hash, 11_155_111);
        assert!(matches!(result, Err(HeaderError::HashMismatch { .. })));
    }

    #[test]
    fn test_missing_fork_field_is_an_error() {
        let mut header = mock_header(13_000_000);
        header.base_fee_per_gas = None;
        assert!(matches!(
            build_header(&header, 1),
            Err(HeaderError::MissingField {
                name: "baseFeePerGas"
            })
        ));

        let mut header = mock_header(19_500_000);
        header.parent_beacon_block_root = None;
        assert!(matches!(
            build_header(&header, 1),
            Err(HeaderError::MissingField {
                name: "parentBeaconBlockRoot"
            })
        ));
    }

    #[test]
    fn test_parse_rpc_block_shape() {
        let raw = r#"{
            "hash": "0x5a10754ae6c673ebabb1a78166232c6b88633d50fafaf3e0592fb3b0eca514bf",
            "parentHash": "0x1111111111111111111111111111111111111111111111111111111111111111",
            "sha3Uncles": "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
            "miner": "0x3333333333333333333333333333333333333333",
            "stateRoot": "0x4444444444444444444444444444444444444444444444444444444444444444",
            "transactionsRoot": "0x5555555555555555555555555555555555555555555555555555555555555555",
            "receiptsRoot": "0x6666666666666666666666666666666666666666666666666666666666666666",
            "logsBloom": "0x00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
            "difficulty": "0x0",
            "number": "0x1296d68",
            "gasLimit": "0x1c9c380",
            "gasUsed": "0xbc614e",
            "timestamp": "0x6553f100",
            "extraData": "0x",
            "mixHash": "0x7777777777777777777777777777777777777777777777777777777777777777",
            "nonce": "0x0000000000000000",
            "baseFeePerGas": "0x7",
            "withdrawalsRoot": "0x8888888888888888888888888888888888888888888888888888888888888888",
            "blobGasUsed": "0x0",
            "excessBlobGas": "0x0",
            "parentBeaconBlockRoot": "0x9999999999999999999999999999999999999999999999999999999999999999",
            "transactions": [],
            "uncles": [],
            "size": "0x1234",
            "totalDifficulty": "0x0"
        }"#;
        let header: RpcHeader = serde_json::from_str(raw).unwrap();
        assert_eq!(header.number, U64::from(0x1296d68));
        assert_eq!(header.base_fee_per_gas, Some(U256::from(7)));
        assert_eq!(header.requests_hash, None);
        assert!(header.extra_data.is_empty());

        let encoded = build_header(&header, 1).unwrap();
        assert_eq!(encoded_item_count(&encoded), 20);
    }
}
