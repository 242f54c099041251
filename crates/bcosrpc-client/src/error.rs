use bcosrpc_common::protocol::codes::INTERNAL_ERROR_MESSAGE;
use bcosrpc_common::BcosRpcError;
use thiserror::Error;

/// Failure outcome of a group or peer operation.
///
/// Every variant carries a human-readable [`message`](Self::message), so a
/// caller that only shows text and a caller that only matches on the error
/// see the same thing.
#[derive(Error, Debug)]
pub enum GroupError {
    /// The call never produced an envelope: connection, timeout,
    /// cancellation, HTTP status, JSON-RPC error object or undecodable reply.
    #[error(transparent)]
    Transport(#[from] BcosRpcError),

    /// The node answered with a code other than success.
    ///
    /// `message` is the canonical text for `code` and is also the `Display`
    /// text of this error. `status` is the raw lifecycle label, if any.
    #[error("{message}")]
    Rejected {
        code: String,
        message: String,
        status: String,
    },
}

impl GroupError {
    /// Text to show for this failure.
    ///
    /// Transport failures always read [`INTERNAL_ERROR_MESSAGE`].
    pub fn message(&self) -> &str {
        match self {
            GroupError::Transport(_) => INTERNAL_ERROR_MESSAGE,
            GroupError::Rejected { message, .. } => message,
        }
    }

    /// Status code reported by the node, if the call got that far.
    pub fn code(&self) -> Option<&str> {
        match self {
            GroupError::Transport(_) => None,
            GroupError::Rejected { code, .. } => Some(code),
        }
    }

    /// Raw lifecycle label from a rejected status query.
    pub fn status(&self) -> Option<&str> {
        match self {
            GroupError::Transport(_) => None,
            GroupError::Rejected { status, .. } => Some(status),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, GroupError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, GroupError>;
