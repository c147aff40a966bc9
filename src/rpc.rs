mod rpc_dispatcher;
mod rpc_request_response;
mod rpc_result_status;

pub use rpc_dispatcher::{RpcDispatcher, RpcResponseHandler};
pub use rpc_request_response::{RpcRequest, RpcResponse};
pub use rpc_result_status::RpcResultStatus;
