use crate::error::RpcCallerError;
use election_rpc::rpc::{RpcDispatcher, RpcResponse, RpcResultStatus};
use futures::channel::oneshot;
use std::io;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Defines a generic capability for making RPC calls.
///
/// Any struct that can provide an `RpcDispatcher`, an emit function, and its
/// connection state gains `call_rpc_buffered`, and through the blanket
/// `RpcCallPrebuffered` impl, typed `Method::call(&client, input)` calls.
#[async_trait::async_trait]
pub trait RpcServiceCallerInterface: Send + Sync {
    // --- METHODS TO BE IMPLEMENTED BY THE STRUCT (e.g., RpcClient) ---

    /// The dispatcher tracking this connection's pending calls.
    fn get_dispatcher(&self) -> Arc<Mutex<RpcDispatcher>>;

    /// Hands encoded frame bytes to the underlying transport.
    fn get_emit_fn(&self) -> Arc<dyn Fn(Vec<u8>) + Send + Sync>;

    /// Whether the transport can still carry calls.
    ///
    /// Implementations must clear this flag before cancelling the
    /// dispatcher's pending calls, so a call registered concurrently with a
    /// disconnect is either refused or cancelled, never left waiting.
    fn is_connected(&self) -> bool;

    // --- METHODS PROVIDED AUTOMATICALLY BY THE TRAIT ---

    /// Sends one fully buffered request and waits for its reply payload.
    async fn call_rpc_buffered(
        &self,
        method_id: u64,
        param_bytes: Vec<u8>,
    ) -> Result<Vec<u8>, RpcCallerError> {
        let (done_tx, done_rx) = oneshot::channel::<RpcResponse>();

        let frame_bytes = {
            let dispatcher = self.get_dispatcher();
            let mut dispatcher = dispatcher.lock().await;

            // Checked under the lock; see `is_connected`.
            if !self.is_connected() {
                return Err(RpcCallerError::NotConnected);
            }

            dispatcher
                .call(method_id, param_bytes, move |response| {
                    let _ = done_tx.send(response);
                })
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?
        };

        let emit = self.get_emit_fn();
        emit(frame_bytes);

        let response = done_rx.await.map_err(|_| RpcCallerError::Aborted)?;

        match response.result_status {
            RpcResultStatus::Success => Ok(response.payload_bytes),
            RpcResultStatus::Fail => Err(RpcCallerError::RemoteError {
                payload: response.payload_bytes,
            }),
            RpcResultStatus::SystemError => Err(RpcCallerError::RemoteSystemError(
                String::from_utf8_lossy(&response.payload_bytes).into_owned(),
            )),
            RpcResultStatus::MethodNotFound => Err(RpcCallerError::MethodNotFound(method_id)),
        }
    }
}
