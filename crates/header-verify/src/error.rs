// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::B256;
use thiserror::Error;

/// Get custom error variants for header reconstruction failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// A field the fork in force requires is absent from the RPC data.
    #[error("header field {name} is required at this block height")]
    MissingField {
        /// JSON name of the missing field.
        name: &'static str,
    },

    /// The rebuilt header does not hash to the expected block hash.
    #[error("header hashes to {computed}, expected {expected}")]
    HashMismatch {
        /// Hash of the locally re-encoded header.
        computed: B256,
        /// The block hash the header was checked against.
        expected: B256,
    },
}
