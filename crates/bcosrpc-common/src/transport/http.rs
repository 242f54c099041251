//! HTTP Transport
//!
//! JSON-RPC 2.0 over plain HTTP/1.1 POST, the way FISCO BCOS nodes expose
//! their RPC port.
//!
//! # Request Flow
//!
//! 1. Wrap the procedure and params in a [`JsonRpcRequest`] with a fresh id
//! 2. POST it to the endpoint with `Content-Type: application/json`
//! 3. Reject non-2xx statuses and bodies over [`MAX_RESPONSE_SIZE`]
//! 4. Decode the [`JsonRpcResponse`], check the id, and return `result`
//!
//! The whole exchange is bounded by the configured request timeout. The
//! caller's [`CallContext`](crate::CallContext) is enforced one level up by
//! dropping this future.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use bcosrpc_common::transport::{HttpTransport, Transport};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new("http://127.0.0.1:8545", Duration::from_secs(30))?;
//! let result = transport.call("queryGroupStatus", json!([1])).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use http_body_util::{BodyExt, Full, Limited};
use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::Transport;
use crate::protocol::error::{BcosRpcError, Result};
use crate::protocol::jsonrpc::{JsonRpcRequest, JsonRpcResponse};

/// Largest response body accepted from a node (16 MB).
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

/// JSON-RPC client transport over HTTP.
///
/// Cheap to clone; clones share the connection pool and the id counter.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: Uri,
    client: Client<HttpConnector, Full<Bytes>>,
    request_timeout: Duration,
    next_id: Arc<AtomicU64>,
}

impl HttpTransport {
    /// Creates a transport for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`BcosRpcError::InvalidRequest`] if the endpoint is not an
    /// `http://` URL.
    pub fn new(endpoint: &str, request_timeout: Duration) -> Result<Self> {
        validate_endpoint(endpoint)?;
        let endpoint: Uri = endpoint.parse()?;

        Ok(Self {
            endpoint,
            client: Client::builder(TokioExecutor::new()).build_http(),
            request_timeout,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    async fn send(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(method, params, json!(id));
        let body = serde_json::to_vec(&request)?;

        let http_request = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))?;

        debug!(method, id, endpoint = %self.endpoint, "Sending JSON-RPC request");

        let exchange = async {
            let response = self.client.request(http_request).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(BcosRpcError::Transport(format!(
                    "HTTP {} from {}",
                    status, self.endpoint
                )));
            }

            let body = Limited::new(response.into_body(), MAX_RESPONSE_SIZE)
                .collect()
                .await
                .map_err(|e| BcosRpcError::Transport(format!("Failed to read response: {}", e)))?
                .to_bytes();
            Ok::<Bytes, BcosRpcError>(body)
        };

        let body = match tokio::time::timeout(self.request_timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(BcosRpcError::Timeout(self.request_timeout.as_millis() as u64)),
        }
        .inspect_err(|e| warn!(method, id, error = %e, "JSON-RPC request failed"))?;

        let response: JsonRpcResponse = serde_json::from_slice(&body)?;
        if response.id != json!(id) {
            return Err(BcosRpcError::InvalidResponse(format!(
                "Response id {} does not match request id {}",
                response.id, id
            )));
        }

        response.into_result()
    }
}

impl Transport for HttpTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        self.send(method, params).await
    }
}

/// Checks that `endpoint` is a plain `http://` URL.
pub fn validate_endpoint(endpoint: &str) -> Result<()> {
    if endpoint.starts_with("http://") {
        Ok(())
    } else {
        Err(BcosRpcError::InvalidRequest(format!(
            "Invalid endpoint '{}': must start with http://",
            endpoint
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_endpoint() {
        assert!(validate_endpoint("http://127.0.0.1:8545").is_ok());
        assert!(validate_endpoint("127.0.0.1:8545").is_err());
        assert!(validate_endpoint("https://node.example:8545").is_err());
        assert!(validate_endpoint("").is_err());
    }

    #[tokio::test]
    async fn test_new_keeps_configuration() {
        let transport = HttpTransport::new("http://127.0.0.1:8545", Duration::from_millis(1500)).unwrap();
        assert_eq!(transport.endpoint().host(), Some("127.0.0.1"));
        assert_eq!(transport.endpoint().port_u16(), Some(8545));
        assert_eq!(transport.request_timeout(), Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_new_rejects_bad_endpoint() {
        let result = HttpTransport::new("ws://127.0.0.1:8545", Duration::from_secs(1));
        assert!(matches!(result, Err(BcosRpcError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // port 1 is never listening on loopback in CI
        let transport = HttpTransport::new("http://127.0.0.1:1", Duration::from_secs(5)).unwrap();
        let result = transport.call("startGroup", json!([1])).await;
        assert!(matches!(result, Err(BcosRpcError::Connection(_))));
    }
}
