// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod client;
mod error;
mod transport;

pub use client::{encode_proof_nodes, BlockTag, ProofBundle, ProofClient};
pub use error::ClientError;
pub use transport::JsonRpcTransport;
