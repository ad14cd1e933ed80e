// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use serde_json::Value;

/// The one capability [`ProofClient`](crate::ProofClient) needs from a node.
///
/// Implementors own the wire: envelope ids, framing, timeouts and retries all
/// live behind `send`. The client only ever asks for a method to be called
/// with some params and the response `result` handed back.
#[async_trait]
pub trait JsonRpcTransport: Send + Sync {
    /// Error the transport reports when a request cannot be completed,
    /// including JSON-RPC error responses.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a single JSON-RPC request and return its `result` value.
    ///
    /// A `null` result is returned as `Value::Null`, not as an error; the
    /// caller decides what an absent proof or block means.
    async fn send(&self, method: &str, params: Value) -> Result<Value, Self::Error>;
}
