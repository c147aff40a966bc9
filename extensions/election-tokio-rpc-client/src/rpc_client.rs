use bytes::Bytes;
use election_rpc::rpc::RpcDispatcher;
use election_rpc_service_caller::RpcServiceCallerInterface;
use futures_util::{SinkExt, StreamExt};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, protocol::Message as WsMessage},
};

/// A WebSocket RPC client holding one connection.
///
/// Calls go through `RpcCallPrebuffered`, e.g.
/// `SubmitElectionData::call(&client, request)`. Dropping the client closes
/// the connection.
pub struct RpcClient {
    dispatcher: Arc<Mutex<RpcDispatcher>>,
    tx: mpsc::UnboundedSender<WsMessage>,
    is_connected: Arc<AtomicBool>,
    recv_task: JoinHandle<()>,
}

impl RpcClient {
    /// Connects to a server, e.g. `ws://localhost:50000/ws`.
    ///
    /// Fails with the socket's error kind (e.g. `ConnectionRefused`) when the
    /// server cannot be reached, `InvalidInput` for an unusable address, and
    /// `Other` when the server rejects the WebSocket upgrade.
    pub async fn new(websocket_address: &str) -> Result<RpcClient, io::Error> {
        let (ws_stream, _) = connect_async(websocket_address).await.map_err(|err| {
            let kind = match &err {
                WsError::Io(io_err) => io_err.kind(),
                WsError::Url(_) | WsError::HttpFormat(_) => io::ErrorKind::InvalidInput,
                _ => io::ErrorKind::Other,
            };
            io::Error::new(kind, format!("failed to connect to {websocket_address}: {err}"))
        })?;
        tracing::info!("Connected to {}", websocket_address);

        let (mut sender, mut receiver) = ws_stream.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
        let dispatcher = Arc::new(Mutex::new(RpcDispatcher::new()));
        let is_connected = Arc::new(AtomicBool::new(true));

        // Receive loop
        let recv_task = tokio::spawn({
            let dispatcher = dispatcher.clone();
            let is_connected = is_connected.clone();
            async move {
                while let Some(msg) = receiver.next().await {
                    match msg {
                        Ok(WsMessage::Binary(bytes)) => {
                            if let Err(err) = dispatcher.lock().await.read_bytes(&bytes) {
                                tracing::error!("Dropping malformed frame from server: {}", err);
                            }
                        }
                        Ok(WsMessage::Close(_)) => break,
                        Ok(_) => {} // Pings are answered by tungstenite.
                        Err(err) => {
                            tracing::warn!("Connection error: {}", err);
                            break;
                        }
                    }
                }
                Self::mark_disconnected(&is_connected, &dispatcher).await;
            }
        });

        // Send loop
        tokio::spawn({
            let dispatcher = dispatcher.clone();
            let is_connected = is_connected.clone();
            async move {
                while let Some(msg) = rx.recv().await {
                    if sender.send(msg).await.is_err() {
                        Self::mark_disconnected(&is_connected, &dispatcher).await;
                        break;
                    }
                }
                let _ = sender.close().await;
            }
        });

        Ok(RpcClient {
            dispatcher,
            tx,
            is_connected,
            recv_task,
        })
    }

    /// Clears the connected flag, then fails every call still waiting for a
    /// reply. The order matters; see `RpcServiceCallerInterface::is_connected`.
    async fn mark_disconnected(is_connected: &AtomicBool, dispatcher: &Mutex<RpcDispatcher>) {
        if !is_connected.swap(false, Ordering::SeqCst) {
            return;
        }

        let aborted = dispatcher.lock().await.cancel_pending();
        if aborted > 0 {
            tracing::warn!("Connection lost with {} call(s) in flight", aborted);
        } else {
            tracing::info!("Connection closed");
        }
    }
}

impl Drop for RpcClient {
    fn drop(&mut self) {
        // The send loop flushes the close frame, then exits once `tx` is gone.
        let _ = self.tx.send(WsMessage::Close(None));
        self.recv_task.abort();
    }
}

#[async_trait::async_trait]
impl RpcServiceCallerInterface for RpcClient {
    fn get_dispatcher(&self) -> Arc<Mutex<RpcDispatcher>> {
        self.dispatcher.clone()
    }

    fn get_emit_fn(&self) -> Arc<dyn Fn(Vec<u8>) + Send + Sync> {
        let tx = self.tx.clone();
        Arc::new(move |bytes: Vec<u8>| {
            let _ = tx.send(WsMessage::Binary(Bytes::from(bytes)));
        })
    }

    fn is_connected(&self) -> bool {
        self.is_connected.load(Ordering::SeqCst)
    }
}
