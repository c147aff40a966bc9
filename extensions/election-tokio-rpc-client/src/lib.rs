mod rpc_client;
pub use rpc_client::RpcClient;

pub use election_rpc_service_caller::{
    RpcServiceCallerInterface, error::RpcCallerError, prebuffered::RpcCallPrebuffered,
};
