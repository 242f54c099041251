//! Group and peer operations
//!
//! Each method on [`GroupClient`] is one row of the operation table: a
//! [`GroupOperation`] plus the function that builds its positional arguments.
//! All of them share [`Invoker::execute`] for dispatch and code translation.
//!
//! The group endpoints are available on nodes with compatibility version
//! 2.2.0 or later.

use std::time::Duration;

use bcosrpc_common::transport::{HttpTransport, Transport};
use bcosrpc_common::{BcosRpcError, CallContext, GroupResponse, GroupStatus, RpcArg};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::invoker::{GroupOperation, Invoker};

/// Arguments for operations that only name a group.
pub fn group_args(group_id: u32) -> Vec<RpcArg> {
    vec![RpcArg::from(group_id)]
}

/// Arguments for `generateGroup`: the group id, then the genesis parameters.
///
/// The timestamp travels as a decimal string.
pub fn generate_group_args(group_id: u32, node_ids: &[String], timestamp: i64) -> Vec<RpcArg> {
    vec![
        RpcArg::from(group_id),
        RpcArg::map([
            ("timestamp", RpcArg::from(timestamp.to_string())),
            ("sealers", RpcArg::from(node_ids)),
        ]),
    ]
}

/// Arguments for the peer operations: one list of `host:port` strings.
pub fn peer_args(peers: &[String]) -> Vec<RpcArg> {
    vec![RpcArg::from(peers)]
}

/// Client for the node's group-management procedures.
///
/// Cheap to clone when the transport is; safe to share between tasks.
///
/// # Example
///
/// ```no_run
/// use bcosrpc_client::{ClientConfig, GroupClient};
/// use bcosrpc_common::CallContext;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GroupClient::connect(&ClientConfig::default())?;
/// let ctx = CallContext::background();
///
/// match client.start_group(&ctx, 2).await {
///     Ok(message) => println!("{}", message),
///     Err(e) => eprintln!("start failed: {}", e.message()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GroupClient<T = HttpTransport> {
    invoker: Invoker<T>,
    call_timeout: Option<Duration>,
}

impl GroupClient<HttpTransport> {
    /// Builds a client talking JSON-RPC over HTTP as described by `config`.
    pub fn connect(config: &ClientConfig) -> std::result::Result<Self, BcosRpcError> {
        config.validate()?;
        let transport = HttpTransport::new(&config.endpoint, config.request_timeout)?;
        Ok(Self::with_transport(transport).with_call_timeout(config.call_timeout))
    }
}

impl<T: Transport> GroupClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            invoker: Invoker::new(transport),
            call_timeout: None,
        }
    }

    /// Deadline applied to every call on top of the caller's context.
    pub fn with_call_timeout(mut self, call_timeout: Option<Duration>) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn invoker(&self) -> &Invoker<T> {
        &self.invoker
    }

    /// `ctx` tightened by the configured call timeout.
    fn scoped(&self, ctx: &CallContext) -> CallContext {
        match self.call_timeout {
            Some(timeout) => ctx.child().with_timeout(timeout),
            None => ctx.clone(),
        }
    }

    async fn execute(
        &self,
        ctx: &CallContext,
        operation: GroupOperation,
        args: Vec<RpcArg>,
    ) -> Result<String> {
        self.invoker
            .execute(&self.scoped(ctx), operation, &args)
            .await
    }

    /// Calls any procedure that answers with a group envelope and returns
    /// its canonical message.
    pub async fn invoke(
        &self,
        ctx: &CallContext,
        procedure: &str,
        args: &[RpcArg],
    ) -> Result<String> {
        self.invoker.invoke(&self.scoped(ctx), procedure, args).await
    }

    /// Calls any procedure and returns the decoded envelope untranslated.
    pub async fn call(
        &self,
        ctx: &CallContext,
        procedure: &str,
        args: &[RpcArg],
    ) -> std::result::Result<GroupResponse, BcosRpcError> {
        self.invoker.call(&self.scoped(ctx), procedure, args).await
    }

    /// Creates group `group_id` with the given sealers and genesis timestamp.
    pub async fn generate_group(
        &self,
        ctx: &CallContext,
        group_id: u32,
        node_ids: &[String],
        timestamp: i64,
    ) -> Result<String> {
        self.execute(
            ctx,
            GroupOperation::GenerateGroup,
            generate_group_args(group_id, node_ids, timestamp),
        )
        .await
    }

    pub async fn start_group(&self, ctx: &CallContext, group_id: u32) -> Result<String> {
        self.execute(ctx, GroupOperation::StartGroup, group_args(group_id))
            .await
    }

    pub async fn stop_group(&self, ctx: &CallContext, group_id: u32) -> Result<String> {
        self.execute(ctx, GroupOperation::StopGroup, group_args(group_id))
            .await
    }

    /// Deletes the group; its data is kept on the node so it can be recovered.
    pub async fn remove_group(&self, ctx: &CallContext, group_id: u32) -> Result<String> {
        self.execute(ctx, GroupOperation::RemoveGroup, group_args(group_id))
            .await
    }

    pub async fn recover_group(&self, ctx: &CallContext, group_id: u32) -> Result<String> {
        self.execute(ctx, GroupOperation::RecoverGroup, group_args(group_id))
            .await
    }

    /// Returns the node's raw status label for the group, e.g. `"RUNNING"`.
    ///
    /// Labels: `INEXISTENT`, `STOPPING`, `RUNNING`, `STOPPED`, `DELETED`.
    pub async fn query_group_status(&self, ctx: &CallContext, group_id: u32) -> Result<String> {
        self.execute(ctx, GroupOperation::QueryGroupStatus, group_args(group_id))
            .await
    }

    /// [`query_group_status`](Self::query_group_status), parsed.
    pub async fn group_status(&self, ctx: &CallContext, group_id: u32) -> Result<GroupStatus> {
        let label = self.query_group_status(ctx, group_id).await?;
        Ok(GroupStatus::parse(&label))
    }

    /// Adds `[p2p]` connection entries to the node's configuration.
    pub async fn add_peers(&self, ctx: &CallContext, peers: &[String]) -> Result<String> {
        self.execute(ctx, GroupOperation::AddPeers, peer_args(peers))
            .await
    }

    /// Removes `[p2p]` connection entries from the node's configuration.
    pub async fn erase_peers(&self, ctx: &CallContext, peers: &[String]) -> Result<String> {
        self.execute(ctx, GroupOperation::ErasePeers, peer_args(peers))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GroupError;
    use bcosrpc_common::protocol::error::Result as RpcResult;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    struct RecordingTransport {
        reply: Mutex<Value>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl RecordingTransport {
        fn replying(reply: Value) -> Arc<Self> {
            Arc::new(Self {
                reply: Mutex::new(reply),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn last_call(&self) -> (String, String) {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl Transport for RecordingTransport {
        async fn call(&self, method: &str, params: Value) -> RpcResult<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((method.to_string(), params.to_string()));
            Ok(self.reply.lock().unwrap().clone())
        }
    }

    fn sent(method: &str, params: &str) -> (String, String) {
        (method.to_string(), params.to_string())
    }

    fn node_ids() -> Vec<String> {
        vec!["n1".to_string(), "n2".to_string()]
    }

    #[test]
    fn test_generate_group_args_order() {
        let params = bcosrpc_common::to_params(&generate_group_args(7, &node_ids(), 1700000000)).unwrap();
        assert_eq!(
            params.to_string(),
            r#"[7,{"timestamp":"1700000000","sealers":["n1","n2"]}]"#
        );
    }

    #[tokio::test]
    async fn test_generate_group_wire_shape() {
        let transport = RecordingTransport::replying(json!({"code": "0x0"}));
        let client = GroupClient::with_transport(transport.clone());

        let message = client
            .generate_group(&CallContext::background(), 7, &node_ids(), 1700000000)
            .await
            .unwrap();

        assert_eq!(message, "success");
        assert_eq!(
            transport.last_call(),
            sent(
                "generateGroup",
                r#"[7,{"timestamp":"1700000000","sealers":["n1","n2"]}]"#
            )
        );
    }

    #[tokio::test]
    async fn test_group_id_operations_wire_shape() {
        let transport = RecordingTransport::replying(json!({"code": "0x0"}));
        let client = GroupClient::with_transport(transport.clone());
        let ctx = CallContext::background();

        client.start_group(&ctx, 3).await.unwrap();
        assert_eq!(transport.last_call(), sent("startGroup", "[3]"));

        client.stop_group(&ctx, 3).await.unwrap();
        assert_eq!(transport.last_call(), sent("stopGroup", "[3]"));

        client.remove_group(&ctx, 3).await.unwrap();
        assert_eq!(transport.last_call(), sent("removeGroup", "[3]"));

        client.recover_group(&ctx, 3).await.unwrap();
        assert_eq!(transport.last_call(), sent("recoverGroup", "[3]"));

        client.query_group_status(&ctx, 3).await.unwrap();
        assert_eq!(transport.last_call(), sent("queryGroupStatus", "[3]"));
    }

    #[tokio::test]
    async fn test_peer_operations_wire_shape() {
        let transport = RecordingTransport::replying(json!({"code": "0x0"}));
        let client = GroupClient::with_transport(transport.clone());
        let ctx = CallContext::background();
        let peers = vec!["127.0.0.1:30300".to_string(), "127.0.0.1:30301".to_string()];

        assert_eq!(client.add_peers(&ctx, &peers).await.unwrap(), "success");
        assert_eq!(
            transport.last_call(),
            sent("addPeers", r#"[["127.0.0.1:30300","127.0.0.1:30301"]]"#)
        );

        assert_eq!(client.erase_peers(&ctx, &peers).await.unwrap(), "success");
        assert_eq!(
            transport.last_call(),
            sent("erasePeers", r#"[["127.0.0.1:30300","127.0.0.1:30301"]]"#)
        );
    }

    #[tokio::test]
    async fn test_empty_peer_list_is_sent_as_empty_array() {
        let transport = RecordingTransport::replying(json!({"code": "0x8"}));
        let client = GroupClient::with_transport(transport.clone());

        let err = client
            .add_peers(&CallContext::background(), &[])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "invalid params");
        assert_eq!(transport.last_call(), sent("addPeers", "[[]]"));
    }

    #[tokio::test]
    async fn test_query_group_status_returns_raw_label() {
        let transport = RecordingTransport::replying(json!({
            "code": "0x0",
            "message": "",
            "status": "RUNNING"
        }));
        let client = GroupClient::with_transport(transport);
        let ctx = CallContext::background();

        assert_eq!(client.query_group_status(&ctx, 1).await.unwrap(), "RUNNING");
        assert_eq!(client.group_status(&ctx, 1).await.unwrap(), GroupStatus::Running);
    }

    #[tokio::test]
    async fn test_rejection_carries_canonical_message() {
        let transport = RecordingTransport::replying(json!({
            "code": "0x2",
            "message": "Group 2 already exists"
        }));
        let client = GroupClient::with_transport(transport);

        let err = client
            .generate_group(&CallContext::background(), 2, &node_ids(), 1)
            .await
            .unwrap_err();

        assert!(matches!(err, GroupError::Rejected { .. }));
        assert_eq!(err.message(), "group already exists");
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_timeout_bounds_each_call() {
        struct Silent;

        impl Transport for Silent {
            async fn call(&self, _method: &str, _params: Value) -> RpcResult<Value> {
                std::future::pending().await
            }
        }

        let client = GroupClient::with_transport(Silent)
            .with_call_timeout(Some(Duration::from_millis(200)));
        let ctx = CallContext::background();

        let err = client.stop_group(&ctx, 1).await.unwrap_err();
        assert!(matches!(
            err,
            GroupError::Transport(BcosRpcError::DeadlineExceeded)
        ));
        assert_eq!(err.message(), "internal error");
        // the caller's own context is untouched
        assert!(ctx.deadline().is_none());
        assert!(!ctx.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_timeout_bounds_raw_calls() {
        struct Silent;

        impl Transport for Silent {
            async fn call(&self, _method: &str, _params: Value) -> RpcResult<Value> {
                std::future::pending().await
            }
        }

        let client = GroupClient::with_transport(Silent)
            .with_call_timeout(Some(Duration::from_millis(200)));
        let ctx = CallContext::background();

        let err = client.invoke(&ctx, "getGroupList", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            GroupError::Transport(BcosRpcError::DeadlineExceeded)
        ));

        let err = client.call(&ctx, "getGroupList", &[]).await.unwrap_err();
        assert!(matches!(err, BcosRpcError::DeadlineExceeded));
        assert!(ctx.deadline().is_none());
    }

    #[tokio::test]
    async fn test_raw_call_returns_envelope() {
        let transport = RecordingTransport::replying(json!({
            "code": "0x6",
            "status": "INEXISTENT"
        }));
        let client = GroupClient::with_transport(transport.clone());

        let envelope = client
            .call(&CallContext::background(), "queryGroupStatus", &group_args(9))
            .await
            .unwrap();

        assert_eq!(envelope.code, "0x6");
        assert_eq!(envelope.status, "INEXISTENT");
        assert_eq!(transport.last_call(), sent("queryGroupStatus", "[9]"));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_endpoint() {
        let config = ClientConfig::default().with_endpoint("127.0.0.1:8545");
        assert!(matches!(
            GroupClient::connect(&config),
            Err(BcosRpcError::InvalidRequest(_))
        ));
    }
}
