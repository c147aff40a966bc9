mod rpc_server;
pub use rpc_server::*;

mod worker_pool;
pub use worker_pool::build_worker_runtime;

pub use election_rpc_service_endpoint::{
    RpcServiceEndpoint,
    error::{HandlerPayloadError, RpcServiceEndpointError},
};
