//! bcosrpc Common Types and Transport
//!
//! Protocol definitions, call context and the HTTP transport shared by the
//! bcosrpc group-management client.
//!
//! # Overview
//!
//! A FISCO BCOS node exposes group and peer administration over JSON-RPC.
//! Every such procedure takes positional parameters and answers with the same
//! small envelope (`code`, `message`, `status`). This crate contains:
//!
//! - **Protocol Layer**: JSON-RPC wire types, positional [`RpcArg`]s, the
//!   [`GroupResponse`] envelope and the status-code table in [`codes`]
//! - **Call Context**: [`CallContext`], cancellation plus deadline for one call
//! - **Transport Layer**: the [`Transport`](transport::Transport) seam and its
//!   JSON-RPC-over-HTTP implementation
//!
//! # Example
//!
//! ```
//! use bcosrpc_common::{codes, to_params, RpcArg};
//!
//! let params = to_params(&[RpcArg::from(1u32)]).unwrap();
//! assert_eq!(params.to_string(), "[1]");
//! assert_eq!(codes::resolve("0x6"), "group not found");
//! ```

pub mod context;
pub mod protocol;
pub mod transport;

pub use context::CallContext;
pub use protocol::*;
