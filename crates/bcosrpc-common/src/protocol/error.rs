use thiserror::Error;

#[derive(Error, Debug)]
pub enum BcosRpcError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Call cancelled")]
    Cancelled,

    #[error("Call deadline exceeded")]
    DeadlineExceeded,

    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection error: {0}")]
    Connection(String),
}

impl BcosRpcError {
    /// True for failures caused by the caller's context rather than the remote side.
    pub fn is_context_error(&self) -> bool {
        matches!(self, BcosRpcError::Cancelled | BcosRpcError::DeadlineExceeded)
    }
}

impl From<hyper::Error> for BcosRpcError {
    fn from(err: hyper::Error) -> Self {
        BcosRpcError::Transport(err.to_string())
    }
}

impl From<hyper::http::Error> for BcosRpcError {
    fn from(err: hyper::http::Error) -> Self {
        BcosRpcError::InvalidRequest(err.to_string())
    }
}

impl From<hyper::http::uri::InvalidUri> for BcosRpcError {
    fn from(err: hyper::http::uri::InvalidUri) -> Self {
        BcosRpcError::InvalidRequest(err.to_string())
    }
}

impl From<hyper_util::client::legacy::Error> for BcosRpcError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        BcosRpcError::Connection(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BcosRpcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_errors() {
        assert!(BcosRpcError::Cancelled.is_context_error());
        assert!(BcosRpcError::DeadlineExceeded.is_context_error());
        assert!(!BcosRpcError::Timeout(10).is_context_error());
        assert!(!BcosRpcError::Transport("boom".into()).is_context_error());
    }

    #[test]
    fn test_rpc_error_display() {
        let err = BcosRpcError::Rpc {
            code: -32601,
            message: "Method not found".into(),
        };
        assert_eq!(err.to_string(), "JSON-RPC error -32601: Method not found");
    }
}
