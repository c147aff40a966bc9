use crate::error::{HandlerPayloadError, RpcServiceEndpointError};
use election_rpc::rpc::{RpcDispatcher, RpcRequest, RpcResponse};
use election_rpc_service::RpcResultStatus;
use std::collections::{HashMap, hash_map::Entry};
use std::{future::Future, marker::PhantomData, pin::Pin, sync::Arc};
use tokio::sync::RwLock;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

pub type RpcPrebufferedHandler<C> = Arc<
    dyn Fn(C, Vec<u8>) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, HandlerError>> + Send>>
        + Send
        + Sync,
>;

/// Routes decoded calls to registered handlers, generic over a per-connection
/// context type `C`.
///
/// Handlers are registered once at startup and only read afterwards; nothing
/// else is shared between calls.
pub struct RpcServiceEndpoint<C>
where
    C: Send + Sync + Clone + 'static,
{
    prebuffered_handlers: Arc<RwLock<HashMap<u64, RpcPrebufferedHandler<C>>>>,
    _context: PhantomData<C>,
}

impl<C> Default for RpcServiceEndpoint<C>
where
    C: Send + Sync + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> RpcServiceEndpoint<C>
where
    C: Send + Sync + Clone + 'static,
{
    pub fn new() -> Self {
        Self {
            prebuffered_handlers: Arc::new(RwLock::new(HashMap::new())),
            _context: PhantomData,
        }
    }

    /// Registers the handler for `method_id`. A second registration for the
    /// same ID is rejected.
    pub async fn register_prebuffered<F, Fut>(
        &self,
        method_id: u64,
        handler: F,
    ) -> Result<(), RpcServiceEndpointError>
    where
        F: Fn(C, Vec<u8>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<u8>, HandlerError>> + Send + 'static,
    {
        let mut handlers = self.prebuffered_handlers.write().await;

        match handlers.entry(method_id) {
            Entry::Occupied(_) => Err(RpcServiceEndpointError::AlreadyRegistered(method_id)),
            Entry::Vacant(entry) => {
                let wrapped = move |ctx: C, bytes: Vec<u8>| {
                    Box::pin(handler(ctx, bytes))
                        as Pin<Box<dyn Future<Output = Result<Vec<u8>, HandlerError>> + Send>>
                };
                entry.insert(Arc::new(wrapped));
                Ok(())
            }
        }
    }

    pub async fn is_registered(&self, method_id: u64) -> bool {
        self.prebuffered_handlers
            .read()
            .await
            .contains_key(&method_id)
    }

    /// Runs the handler for one request and turns its outcome into a response.
    pub async fn handle_request(&self, context: C, request: RpcRequest) -> RpcResponse {
        let handler = self
            .prebuffered_handlers
            .read()
            .await
            .get(&request.method_id)
            .cloned();

        let Some(handler) = handler else {
            tracing::warn!(
                "No handler for method {:#018x} (request {})",
                request.method_id,
                request.request_id
            );
            return RpcResponse::for_request(&request, RpcResultStatus::MethodNotFound, vec![]);
        };

        let payload = request.payload_bytes.clone();
        match handler(context, payload).await {
            Ok(encoded) => RpcResponse::for_request(&request, RpcResultStatus::Success, encoded),
            Err(err) => match err.downcast::<HandlerPayloadError>() {
                Ok(payload_error) => {
                    RpcResponse::for_request(&request, RpcResultStatus::Fail, payload_error.0)
                }
                Err(err) => {
                    tracing::error!("Request {} failed: {}", request.request_id, err);
                    RpcResponse::for_request(
                        &request,
                        RpcResultStatus::SystemError,
                        err.to_string().into_bytes(),
                    )
                }
            },
        }
    }

    /// Decodes one received message, runs its handler, and emits the encoded
    /// response.
    ///
    /// Processes the call inline; transports that want calls handled in
    /// parallel decode with the dispatcher themselves and spawn
    /// `handle_request`.
    pub async fn read_bytes<E>(
        &self,
        dispatcher: &mut RpcDispatcher,
        context: C,
        bytes: &[u8],
        on_emit: E,
    ) -> Result<(), RpcServiceEndpointError>
    where
        E: Fn(Vec<u8>) + Send + Sync,
    {
        let Some(request) = dispatcher.read_bytes(bytes)? else {
            return Ok(());
        };

        let response = self.handle_request(context, request).await;
        on_emit(dispatcher.respond(response)?);

        Ok(())
    }
}
