pub mod args;
pub mod codes;
pub mod envelope;
pub mod error;
pub mod jsonrpc;


pub use args::{to_params, RpcArg};
pub use codes::{INTERNAL_ERROR_MESSAGE, SUCCESS_CODE, UNKNOWN_CODE_MESSAGE};
pub use envelope::{GroupResponse, GroupStatus};
pub use error::{BcosRpcError, Result};
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
