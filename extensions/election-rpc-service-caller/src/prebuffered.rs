use crate::{RpcServiceCallerInterface, error::RpcCallerError};
use election_rpc_service::RpcMethodPrebuffered;

/// Trait for types that represent callable prebuffered RPC methods.
///
/// Lets call sites write `Method::call(&client, input)` without touching
/// encoding or transport details.
#[async_trait::async_trait]
pub trait RpcCallPrebuffered: RpcMethodPrebuffered + Sized + Send + Sync {
    async fn call<C: RpcServiceCallerInterface + Send + Sync>(
        rpc_client: &C,
        input: Self::Input,
    ) -> Result<Self::Output, RpcCallerError>;
}

#[async_trait::async_trait]
impl<T> RpcCallPrebuffered for T
where
    T: RpcMethodPrebuffered + Send + Sync + 'static,
    T::Input: Send + 'static,
    T::Output: Send + 'static,
{
    async fn call<C: RpcServiceCallerInterface + Send + Sync>(
        rpc_client: &C,
        input: Self::Input,
    ) -> Result<Self::Output, RpcCallerError> {
        let encoded = Self::encode_request(input)?;
        let reply = rpc_client
            .call_rpc_buffered(Self::METHOD_ID, encoded)
            .await?;

        Ok(Self::decode_response(&reply)?)
    }
}
