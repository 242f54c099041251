//! Group-management result envelope
//!
//! Every group and peer procedure answers with the same object inside the
//! JSON-RPC `result` member:
//!
//! ```text
//! {"code": "0x0", "message": "Success", "status": "RUNNING"}
//! ```
//!
//! `message` and `status` are optional. A missing `code` decodes to the empty
//! string, which the code table resolves like any other unmapped code.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{BcosRpcError, Result};

/// Decoded `result` of a group-management call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupResponse {
    /// Status code, e.g. `"0x0"`
    pub code: String,
    /// Free-form text from the node; informational only
    pub message: String,
    /// Lifecycle label, only filled by `queryGroupStatus`
    pub status: String,
}

impl GroupResponse {
    /// Decodes the envelope from a JSON-RPC `result` value.
    ///
    /// # Errors
    ///
    /// - [`BcosRpcError::InvalidResponse`] when `result` is not a JSON object
    /// - [`BcosRpcError::JsonSerialization`](super::BcosRpcError::JsonSerialization)
    ///   when a member has the wrong type
    pub fn from_value(result: Value) -> Result<Self> {
        // serde would also accept the fields as a positional array
        if !result.is_object() {
            return Err(BcosRpcError::InvalidResponse(format!(
                "Expected a result object, got {}",
                result
            )));
        }
        Ok(serde_json::from_value(result)?)
    }
}

/// Lifecycle state of a group as reported by `queryGroupStatus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupStatus {
    Inexistent,
    Stopping,
    Running,
    Stopped,
    Deleted,
    /// Any label the node reports that is not one of the above.
    Unknown(String),
}

impl GroupStatus {
    pub fn parse(label: &str) -> Self {
        match label {
            "INEXISTENT" => GroupStatus::Inexistent,
            "STOPPING" => GroupStatus::Stopping,
            "RUNNING" => GroupStatus::Running,
            "STOPPED" => GroupStatus::Stopped,
            "DELETED" => GroupStatus::Deleted,
            other => GroupStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            GroupStatus::Inexistent => "INEXISTENT",
            GroupStatus::Stopping => "STOPPING",
            GroupStatus::Running => "RUNNING",
            GroupStatus::Stopped => "STOPPED",
            GroupStatus::Deleted => "DELETED",
            GroupStatus::Unknown(label) => label,
        }
    }
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
