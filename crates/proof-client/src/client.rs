// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use alloy_primitives::{Address, Bytes, B256, U64};
use futures::future;
use header_verify::{build_and_verify, build_header, RpcHeader};
use rlp_codec::{decode_exact, encode, Item, RlpError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use state_proof::{verify_proof_response, ProofResponse};
use tracing::{debug, info};

use crate::error::ClientError;
use crate::transport::JsonRpcTransport;

/// Block height selector for the fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    /// The most recent block the node knows about.
    Latest,
    /// An explicit block height.
    Number(u64),
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Latest => f.write_str("latest"),
            BlockTag::Number(number) => write!(f, "{number:#x}"),
        }
    }
}

impl From<u64> for BlockTag {
    fn from(number: u64) -> Self {
        BlockTag::Number(number)
    }
}

/// Everything one [`ProofClient::get_proof`] call hands back: the parsed
/// responses plus the re-encoded artifacts downstream verifiers consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofBundle {
    /// Parsed `eth_getProof` response.
    pub proof: ProofResponse,
    /// Parsed header fields of the block the proof is anchored in.
    pub block: RpcHeader,
    /// RLP-encoded block header; hashes to the block hash.
    pub block_header_rlp: Bytes,
    /// The account proof as one RLP list of decoded nodes.
    pub account_proof_rlp: Bytes,
    /// One RLP list of decoded nodes per storage entry, in request order.
    pub storage_proofs_rlp: Vec<Bytes>,
}

/// Proof-fetching client over any [`JsonRpcTransport`].
///
/// Holds the transport and the chain id; the chain id picks the hardfork
/// schedule the block header is encoded under.
pub struct ProofClient<T> {
    transport: T,
    chain_id: u64,
}

impl<T: JsonRpcTransport> ProofClient<T> {
    /// Build a client for a chain whose id the caller already knows.
    pub fn new(transport: T, chain_id: u64) -> Self {
        Self {
            transport,
            chain_id,
        }
    }

    /// Build a client by asking the node for its chain id.
    pub async fn from_transport(transport: T) -> Result<Self, ClientError> {
        let value = send(&transport, "eth_chainId", json!([])).await?;
        let chain_id: U64 = parse(value, "eth_chainId")?;
        Ok(Self::new(transport, chain_id.to::<u64>()))
    }

    /// Chain id the header verification runs against.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Fetch the proof for `address` and `storage_keys` plus the block it is
    /// anchored in, and bundle both with their RLP artifacts.
    ///
    /// The proof and block fetches run concurrently; their results are
    /// joined before anything is checked. With `verify` set, the header must
    /// reproduce the reported block hash and the whole proof must hold
    /// against the header's state root; the first failing check fails the
    /// call, and nothing is returned on failure.
    pub async fn get_proof(
        &self,
        address: Address,
        storage_keys: &[B256],
        block: BlockTag,
        verify: bool,
    ) -> Result<ProofBundle, ClientError> {
        let keys: Vec<String> = storage_keys.iter().map(|key| format!("{key:#x}")).collect();
        let proof_params = json!([format!("{address:#x}"), keys, block.to_string()]);
        let block_params = json!([block.to_string(), false]);

        debug!(%address, %block, keys = storage_keys.len(), "fetching proof and block");
        let (proof_value, block_value) = future::try_join(
            send(&self.transport, "eth_getProof", proof_params),
            send(&self.transport, "eth_getBlockByNumber", block_params),
        )
        .await?;

        if proof_value.is_null() {
            return Err(ClientError::ProofFetchFailed { address });
        }
        if block_value.is_null() {
            return Err(ClientError::BlockFetchFailed { block });
        }
        if block_value.get("hash").map_or(true, Value::is_null) {
            return Err(ClientError::MissingBlockField { field: "hash" });
        }

        let proof: ProofResponse = parse(proof_value, "eth_getProof")?;
        let header: RpcHeader = parse(block_value, "eth_getBlockByNumber")?;

        let block_header_rlp = if verify {
            let encoded = build_and_verify(&header, header.hash, self.chain_id)?;
            verify_proof_response(header.state_root, address, &proof)?;
            info!(
                %address,
                number = header.number.to::<u64>(),
                "proof verified against the block state root"
            );
            encoded
        } else {
            build_header(&header, self.chain_id)?
        };

        let account_proof_rlp = encode_proof_nodes(&proof.account_proof)?;
        let storage_proofs_rlp = proof
            .storage_proof
            .iter()
            .map(|entry| encode_proof_nodes(&entry.proof))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProofBundle {
            proof,
            block: header,
            block_header_rlp: block_header_rlp.into(),
            account_proof_rlp,
            storage_proofs_rlp,
        })
    }
}

/// Decode each proof element and re-encode the set as one RLP list.
///
/// `eth_getProof` returns proofs as a flat array of node byte strings;
/// on-chain and light-client verifiers take them as a single RLP list of the
/// decoded nodes instead.
pub fn encode_proof_nodes(nodes: &[Bytes]) -> Result<Bytes, RlpError> {
    let items = nodes
        .iter()
        .map(|node| decode_exact(node))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(encode(&Item::List(items)).into())
}

async fn send<T: JsonRpcTransport>(
    transport: &T,
    method: &'static str,
    params: Value,
) -> Result<Value, ClientError> {
    debug!(method, "json-rpc request");
    transport
        .send(method, params)
        .await
        .map_err(|source| ClientError::Transport(Box::new(source)))
}

fn parse<V: DeserializeOwned>(value: Value, method: &'static str) -> Result<V, ClientError> {
    serde_json::from_value(value).map_err(|source| ClientError::InvalidResponse { method, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlp_codec::{encode_bytes, encode_list, MAX_LIST_DEPTH};

    #[test]
    fn test_block_tag_formats_as_rpc_expects() {
        assert_eq!(BlockTag::Latest.to_string(), "latest");
        assert_eq!(BlockTag::Number(0).to_string(), "0x0");
        assert_eq!(BlockTag::Number(14_000_000).to_string(), "0xd59f80");
        assert_eq!(BlockTag::from(7u64), BlockTag::Number(7));
    }

    #[test]
    fn test_encode_proof_nodes_wraps_decoded_nodes() {
        let branch_like = encode_list(&[Item::from(b"left".as_slice()), Item::empty()]);
        let leaf_like = encode_bytes(b"leaf payload");

        let wrapped =
            encode_proof_nodes(&[Bytes::from(branch_like.clone()), Bytes::from(leaf_like)])
                .unwrap();
        let items = decode_exact(&wrapped).unwrap();
        let nodes = items.try_as_list().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(encode(&nodes[0]), branch_like);
        assert_eq!(nodes[1].as_bytes(), Some(b"leaf payload".as_slice()));
    }

    #[test]
    fn test_encode_proof_nodes_rejects_malformed_nodes() {
        let truncated = Bytes::from(vec![0xb9]);
        assert!(encode_proof_nodes(&[truncated]).is_err());

        // Unverified fetches still decode raw endpoint bytes here, so the
        // nesting bound has to hold on this path too.
        let mut nested = Item::List(Vec::new());
        for _ in 0..MAX_LIST_DEPTH {
            nested = Item::List(vec![nested]);
        }
        assert!(matches!(
            encode_proof_nodes(&[Bytes::from(encode(&nested))]),
            Err(RlpError::NestingTooDeep)
        ));
    }
}
