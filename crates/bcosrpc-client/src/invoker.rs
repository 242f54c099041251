//! Generic invocation and code translation
//!
//! Every group and peer operation goes through the same four steps:
//!
//! 1. Serialize the positional arguments in the order given
//! 2. Dispatch through the [`Transport`] under the caller's [`CallContext`]
//! 3. Decode the [`GroupResponse`] envelope
//! 4. Resolve the envelope's code through [`codes`] and branch on success
//!
//! [`Invoker::execute`] is that pipeline; the operations in
//! [`GroupClient`](crate::GroupClient) only pick a [`GroupOperation`] and
//! build its argument list.

use bcosrpc_common::protocol::codes;
use bcosrpc_common::transport::Transport;
use bcosrpc_common::{to_params, BcosRpcError, CallContext, GroupResponse, RpcArg};
use tracing::{debug, warn};

use crate::error::{GroupError, Result};

/// What a successful operation hands back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// The canonical message for the success code.
    CanonicalMessage,
    /// The envelope's raw `status` label, untranslated.
    RawStatus,
}

/// The remote procedures of the group-management API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupOperation {
    GenerateGroup,
    StartGroup,
    StopGroup,
    RemoveGroup,
    RecoverGroup,
    QueryGroupStatus,
    AddPeers,
    ErasePeers,
}

impl GroupOperation {
    pub const ALL: [GroupOperation; 8] = [
        GroupOperation::GenerateGroup,
        GroupOperation::StartGroup,
        GroupOperation::StopGroup,
        GroupOperation::RemoveGroup,
        GroupOperation::RecoverGroup,
        GroupOperation::QueryGroupStatus,
        GroupOperation::AddPeers,
        GroupOperation::ErasePeers,
    ];

    /// JSON-RPC method name on the node.
    pub fn procedure(self) -> &'static str {
        match self {
            GroupOperation::GenerateGroup => "generateGroup",
            GroupOperation::StartGroup => "startGroup",
            GroupOperation::StopGroup => "stopGroup",
            GroupOperation::RemoveGroup => "removeGroup",
            GroupOperation::RecoverGroup => "recoverGroup",
            GroupOperation::QueryGroupStatus => "queryGroupStatus",
            GroupOperation::AddPeers => "addPeers",
            GroupOperation::ErasePeers => "erasePeers",
        }
    }

    pub fn reply(self) -> Reply {
        match self {
            GroupOperation::QueryGroupStatus => Reply::RawStatus,
            _ => Reply::CanonicalMessage,
        }
    }
}

/// Stateless call-and-translate primitive over a [`Transport`].
#[derive(Debug, Clone)]
pub struct Invoker<T> {
    transport: T,
}

impl<T: Transport> Invoker<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Calls `procedure` and decodes the envelope without interpreting it.
    ///
    /// # Errors
    ///
    /// - [`BcosRpcError::InvalidRequest`] for an empty procedure name
    /// - [`BcosRpcError::Cancelled`] / [`BcosRpcError::DeadlineExceeded`] when
    ///   the context fires before or during the call
    /// - any transport or decoding failure
    pub async fn call(
        &self,
        ctx: &CallContext,
        procedure: &str,
        args: &[RpcArg],
    ) -> std::result::Result<GroupResponse, BcosRpcError> {
        if procedure.is_empty() {
            return Err(BcosRpcError::InvalidRequest(
                "Procedure name must not be empty".to_string(),
            ));
        }

        let params = to_params(args)?;
        debug!(procedure, "Invoking group procedure");

        let result = ctx.run(self.transport.call(procedure, params)).await?;
        GroupResponse::from_value(result)
    }

    /// Calls `procedure` and translates the reply into the canonical message.
    pub async fn invoke(
        &self,
        ctx: &CallContext,
        procedure: &str,
        args: &[RpcArg],
    ) -> Result<String> {
        self.dispatch(ctx, procedure, Reply::CanonicalMessage, args).await
    }

    /// Runs `operation` with `args`.
    pub async fn execute(
        &self,
        ctx: &CallContext,
        operation: GroupOperation,
        args: &[RpcArg],
    ) -> Result<String> {
        self.dispatch(ctx, operation.procedure(), operation.reply(), args)
            .await
    }

    async fn dispatch(
        &self,
        ctx: &CallContext,
        procedure: &str,
        reply: Reply,
        args: &[RpcArg],
    ) -> Result<String> {
        let envelope = self
            .call(ctx, procedure, args)
            .await
            .inspect_err(|e| warn!(procedure, error = %e, "Group procedure failed in transport"))?;

        translate(procedure, envelope, reply)
    }
}

/// Maps a decoded envelope to the caller-facing outcome.
fn translate(procedure: &str, envelope: GroupResponse, reply: Reply) -> Result<String> {
    let message = codes::resolve(&envelope.code);

    if codes::is_success(&envelope.code) {
        return Ok(match reply {
            Reply::CanonicalMessage => message.to_string(),
            Reply::RawStatus => envelope.status,
        });
    }

    debug!(
        procedure,
        code = %envelope.code,
        canonical = message,
        remote_message = %envelope.message,
        "Node rejected group procedure"
    );
    Err(GroupError::Rejected {
        code: envelope.code,
        message: message.to_string(),
        status: envelope.status,
    })
}
