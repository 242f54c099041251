//! JSON-RPC 2.0 Protocol Types
//!
//! Wire shapes exchanged with the node's RPC endpoint.
//!
//! # JSON-RPC 2.0 Compliance
//!
//! - JSON-RPC version: "2.0"
//! - Request format: `{"jsonrpc": "2.0", "method": "...", "params": [...], "id": ...}`
//! - Response format: `{"jsonrpc": "2.0", "result": ..., "error": ..., "id": ...}`
//! - Error format: `{"code": ..., "message": "...", "data": ...}`
//!
//! The group-management API only uses positional parameters, so `params` is
//! always a JSON array built from [`RpcArg`](super::RpcArg) values.
//!
//! # Example
//!
//! ```
//! use bcosrpc_common::protocol::jsonrpc::{JsonRpcRequest, JsonRpcResponse};
//! use serde_json::json;
//!
//! let request = JsonRpcRequest::new("startGroup", json!([2]), json!(1));
//! assert_eq!(request.method, "startGroup");
//!
//! let body = r#"{"jsonrpc":"2.0","result":{"code":"0x0"},"id":1}"#;
//! let response: JsonRpcResponse = serde_json::from_str(body).unwrap();
//! assert_eq!(response.into_result().unwrap(), json!({"code": "0x0"}));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{BcosRpcError, Result};

/// JSON-RPC protocol version string.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (must be "2.0")
    pub jsonrpc: String,
    /// Name of the remote procedure
    pub method: String,
    /// Positional parameter array
    pub params: Value,
    /// Request identifier
    pub id: Value,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Value, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC 2.0 response
///
/// Exactly one of `result` and `error` is expected to be present. Both are
/// defaulted so that nodes which omit the absent member still decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (must be "2.0")
    pub jsonrpc: String,
    /// Result value on success
    #[serde(default)]
    pub result: Option<Value>,
    /// Error object on failure
    #[serde(default)]
    pub error: Option<JsonRpcError>,
    /// Request identifier (echoes the request id)
    #[serde(default)]
    pub id: Value,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    /// Error code (standard codes are negative integers)
    pub code: i64,
    /// Short description of the error
    pub message: String,
    /// Additional data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// The method does not exist / is not available.
///
/// Nodes older than compatibility version 2.2.0 answer the group procedures
/// with this code.
pub const METHOD_NOT_FOUND: i64 = -32601;

impl JsonRpcResponse {
    /// Extracts the `result` member.
    ///
    /// An `error` object wins over any `result` that may also be present.
    ///
    /// # Errors
    ///
    /// - [`BcosRpcError::Rpc`] when the node answered with an error object
    /// - [`BcosRpcError::InvalidResponse`] when neither member is present
    pub fn into_result(self) -> Result<Value> {
        if let Some(error) = self.error {
            return Err(BcosRpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        self.result.ok_or_else(|| {
            BcosRpcError::InvalidResponse("Response missing result".to_string())
        })
    }
}
