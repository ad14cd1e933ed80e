// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[doc(inline)]
pub use header_verify as header;

#[doc(inline)]
pub use proof_client as client;

#[doc(inline)]
pub use rlp_codec as rlp;

#[doc(inline)]
pub use state_proof as proof;

// convenience re-exports for the common call paths
pub use header_verify::build_and_verify;
pub use proof_client::{BlockTag, JsonRpcTransport, ProofClient};
pub use state_proof::{holder_balance_slot, is_non_existing, verify_proof_response};
