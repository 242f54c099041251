//! bcosrpc Transport Layer
//!
//! The group client only needs one capability from the network: send a named
//! procedure with positional parameters and hand back the JSON-RPC `result`.
//! [`Transport`] is that seam; [`HttpTransport`] is the JSON-RPC-over-HTTP
//! implementation used against a real node.
//!
//! # Errors
//!
//! Implementations report every failure (connection, timeout, HTTP status,
//! undecodable body, JSON-RPC error object) as a
//! [`BcosRpcError`](crate::protocol::BcosRpcError). Callers treat all of them
//! as transport failures; none are retried at this layer.

pub mod http;

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::protocol::error::Result;

pub use http::{HttpTransport, MAX_RESPONSE_SIZE};

/// Executes a remote procedure and returns its decoded `result` member.
pub trait Transport: Send + Sync {
    /// Sends `method` with the positional `params` array.
    fn call(&self, method: &str, params: Value) -> impl Future<Output = Result<Value>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn call(&self, method: &str, params: Value) -> impl Future<Output = Result<Value>> + Send {
        (**self).call(method, params)
    }
}
