//! bcosrpc Client
//!
//! Group and peer administration for a FISCO BCOS node over JSON-RPC.
//!
//! - [`Invoker`]: the generic call → decode → translate pipeline
//! - [`GroupClient`]: the eight group and peer operations built on it
//! - [`ClientConfig`]: endpoint and timeouts
//!
//! Successful calls return the canonical message (or the raw status label for
//! [`GroupClient::query_group_status`]); failures return a [`GroupError`]
//! whose [`message`](GroupError::message) is the text to show.

pub mod config;
pub mod error;
pub mod group;
pub mod invoker;

pub use config::ClientConfig;
pub use error::{GroupError, Result};
pub use group::GroupClient;
pub use invoker::{GroupOperation, Invoker, Reply};
