// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Verify a Captured Proof
//!
//! Replays a captured `eth_getProof` response and its block through the full
//! verification pipeline, with a canned transport standing in for a node.

use alloy_primitives::{address, b256};
use async_trait::async_trait;
use proof_client::{BlockTag, JsonRpcTransport, ProofClient};
use serde_json::Value;

struct CannedNode;

#[async_trait]
impl JsonRpcTransport for CannedNode {
    type Error = std::convert::Infallible;

    async fn send(&self, method: &str, _params: Value) -> Result<Value, Self::Error> {
        Ok(match method {
            "eth_chainId" => Value::String("0x1".to_owned()),
            "eth_getProof" => {
                serde_json::from_str(include_str!("../tests/fixtures/get_proof.json")).unwrap()
            }
            _ => serde_json::from_str(include_str!("../tests/fixtures/block.json")).unwrap(),
        })
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let token = address!("aa00000000000000000000000000000000000000");
    let slot = b256!("0000000000000000000000000000000000000000000000000000000000000001");

    let client = ProofClient::from_transport(CannedNode).await.unwrap();
    let bundle = client
        .get_proof(token, &[slot], BlockTag::Number(14_000_000), true)
        .await
        .unwrap();

    println!("block header rlp:  {}", bundle.block_header_rlp);
    println!("account proof rlp: {}", bundle.account_proof_rlp);
    println!("storage proof rlp: {}", bundle.storage_proofs_rlp[0]);
    println!("verified against state root {}", bundle.block.state_root);
}
