// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::Address;
use header_verify::HeaderError;
use rlp_codec::RlpError;
use state_proof::VerifyError;
use thiserror::Error;

use crate::client::BlockTag;

/// Get custom error variants for proof fetching and verification.
///
/// Every variant is fatal to the call that produced it. The client never
/// retries; retry and backoff policy belongs to the transport.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The node answered `eth_getProof` with `null`.
    #[error("node returned no proof for account {address}")]
    ProofFetchFailed {
        /// Account the proof was requested for.
        address: Address,
    },

    /// The node answered `eth_getBlockByNumber` with `null`.
    #[error("node returned no block for {block}")]
    BlockFetchFailed {
        /// Block tag the header was requested at.
        block: BlockTag,
    },

    /// The block response lacks a field the bundle needs.
    #[error("block response is missing the {field} field")]
    MissingBlockField {
        /// JSON name of the absent field.
        field: &'static str,
    },

    /// A response parsed as JSON but not as the expected shape.
    #[error("malformed {method} response: {source}")]
    InvalidResponse {
        /// JSON-RPC method whose response failed to parse.
        method: &'static str,
        /// The deserialization failure.
        source: serde_json::Error,
    },

    /// A proof element is not a canonical RLP node.
    #[error("proof node is not canonical RLP: {0}")]
    Rlp(#[from] RlpError),

    /// The header fields do not reproduce the reported block hash.
    #[error(transparent)]
    Header(#[from] HeaderError),

    /// The account or storage proof contradicts the block's state root.
    #[error(transparent)]
    Verify(#[from] VerifyError),

    /// The transport failed to complete a request.
    #[error("transport request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}
