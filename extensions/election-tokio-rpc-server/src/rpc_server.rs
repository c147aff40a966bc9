//! Note: This `RpcServer` does not include authentication, authorization, or
//! transport encryption. It is meant for trusted, internal networks.

use axum::{
    Router,
    extract::ConnectInfo,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
};
use bytes::Bytes;
use election_rpc::frame::FrameCodec;
use election_rpc::rpc::{RpcDispatcher, RpcRequest};
use election_rpc_service::DEFAULT_RPC_WS_PATH;
use election_rpc_service_endpoint::RpcServiceEndpoint;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::{
    net::{TcpListener, ToSocketAddrs},
    sync::mpsc,
    time::{Instant, MissedTickBehavior},
};

/// The interval at which the server sends Ping messages to the client.
const HEARTBEAT_INTERVAL: u64 = 5;

/// The maximum time to wait for any message from the client (including Pong)
/// before considering the connection timed out.
const CLIENT_TIMEOUT: u64 = 15;

/// Per-connection data handed to every handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionContext {
    pub peer_addr: SocketAddr,
}

/// An RPC server that listens for WebSocket connections and handles RPC calls.
pub struct RpcServer {
    endpoint: Arc<RpcServiceEndpoint<ConnectionContext>>,
}

impl Default for RpcServer {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcServer {
    pub fn new() -> Self {
        RpcServer {
            endpoint: Arc::new(RpcServiceEndpoint::new()),
        }
    }

    /// Returns the endpoint handlers are registered on.
    pub fn endpoint(&self) -> Arc<RpcServiceEndpoint<ConnectionContext>> {
        self.endpoint.clone()
    }

    /// Binds to an address and serves until the process exits.
    ///
    /// The address can be anything implementing `ToSocketAddrs`, such as
    /// `"[::]:50000"` or a `SocketAddr`.
    pub async fn serve<A: ToSocketAddrs>(self, addr: A) -> Result<SocketAddr, axum::BoxError> {
        let listener = TcpListener::bind(addr).await?;
        Arc::new(self).serve_with_listener(listener).await
    }

    /// Serves on a pre-bound `TcpListener`.
    ///
    /// Useful for binding to an ephemeral port (port 0) and reading the
    /// actual address before serving.
    pub async fn serve_with_listener(
        self: Arc<Self>,
        listener: TcpListener,
    ) -> Result<SocketAddr, axum::BoxError> {
        self.serve_with_shutdown(listener, std::future::pending())
            .await
    }

    /// Serves on a pre-bound `TcpListener` until `shutdown` completes, then
    /// stops accepting connections and waits for open ones to close.
    pub async fn serve_with_shutdown<F>(
        self: Arc<Self>,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<SocketAddr, axum::BoxError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = listener.local_addr()?;
        let app = Router::new().route(
            DEFAULT_RPC_WS_PATH,
            get({
                let server = self.clone();
                move |ws, conn| Self::ws_handler(ws, conn, server)
            }),
        );

        tracing::info!("Election RPC server listening on {}", address);
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await?;
        tracing::info!("Election RPC server on {} stopped", address);

        Ok(address)
    }

    async fn ws_handler(
        ws: WebSocketUpgrade,
        ConnectInfo(addr): ConnectInfo<SocketAddr>,
        server: Arc<RpcServer>,
    ) -> impl IntoResponse {
        tracing::info!("Client connected: {}", addr);
        ws.on_upgrade(move |socket| server.handle_socket(socket, addr))
    }

    async fn handle_socket(self: Arc<Self>, socket: WebSocket, addr: SocketAddr) {
        let (sender, receiver) = socket.split();
        let (tx, rx) = mpsc::unbounded_channel::<Message>();

        tokio::spawn(Self::sender_task(sender, rx));
        tokio::spawn(Self::receiver_task(
            self.endpoint.clone(),
            ConnectionContext { peer_addr: addr },
            receiver,
            tx,
        ));
    }

    /// Forwards responses and pings from the channel to the WebSocket.
    async fn sender_task(
        mut sender: SplitSink<WebSocket, Message>,
        mut rx: mpsc::UnboundedReceiver<Message>,
    ) {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break; // Exit if the client has disconnected.
            }
        }
        let _ = sender.close().await;
    }

    /// Handles all inbound traffic of one client.
    ///
    /// - Sends a Ping every `HEARTBEAT_INTERVAL` seconds.
    /// - Closes the connection after `CLIENT_TIMEOUT` seconds of silence.
    /// - Decodes each binary message and handles the call in its own task, so
    ///   calls run in parallel on the worker pool and replies may go out in
    ///   any order.
    /// - Logs and skips frames it cannot decode; the connection stays open.
    async fn receiver_task(
        endpoint: Arc<RpcServiceEndpoint<ConnectionContext>>,
        context: ConnectionContext,
        mut receiver: SplitStream<WebSocket>,
        tx: mpsc::UnboundedSender<Message>,
    ) {
        let addr = context.peer_addr;
        let mut dispatcher = RpcDispatcher::new();
        let client_timeout = Duration::from_secs(CLIENT_TIMEOUT);
        let mut heartbeat = tokio::time::interval_at(
            Instant::now() + Duration::from_secs(HEARTBEAT_INTERVAL),
            Duration::from_secs(HEARTBEAT_INTERVAL),
        );
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_seen = Instant::now();

        loop {
            tokio::select! {
                _ = heartbeat.tick() => {
                    if last_seen.elapsed() > client_timeout {
                        tracing::warn!("Client {} timed out. Closing connection.", addr);
                        break;
                    }
                    if tx.send(Message::Ping(Bytes::new())).is_err() {
                        // The sender task has terminated, so the client is gone.
                        tracing::info!("Client {} disconnected (failed to send ping).", addr);
                        break;
                    }
                }

                msg = receiver.next() => {
                    last_seen = Instant::now();

                    match msg {
                        Some(Ok(Message::Binary(bytes))) => match dispatcher.read_bytes(&bytes) {
                            Ok(Some(request)) => {
                                tokio::spawn(Self::handle_call(
                                    endpoint.clone(),
                                    context,
                                    request,
                                    tx.clone(),
                                ));
                            }
                            Ok(None) => {}
                            Err(err) => {
                                tracing::error!("Dropping malformed frame from {}: {}", addr, err);
                            }
                        },
                        Some(Ok(Message::Pong(_))) => {
                            tracing::trace!("Received pong from {}", addr);
                        }
                        Some(Ok(Message::Close(_))) => {
                            tracing::info!("Client {} initiated close.", addr);
                            break;
                        }
                        Some(Ok(_)) => {} // Text and Ping carry no calls.
                        None | Some(Err(_)) => {
                            tracing::info!("Client {} disconnected.", addr);
                            break;
                        }
                    }
                }
            }
        }

        tracing::info!("Terminated connection for {}.", addr);
    }

    async fn handle_call(
        endpoint: Arc<RpcServiceEndpoint<ConnectionContext>>,
        context: ConnectionContext,
        request: RpcRequest,
        tx: mpsc::UnboundedSender<Message>,
    ) {
        let request_id = request.request_id;
        let response = endpoint.handle_request(context, request).await;

        match FrameCodec::encode(&response.into_frame()) {
            Ok(bytes) => {
                if tx.send(Message::Binary(Bytes::from(bytes))).is_err() {
                    tracing::warn!(
                        "Reply to request {} from {} dropped: connection closed",
                        request_id,
                        context.peer_addr
                    );
                }
            }
            Err(err) => {
                tracing::error!("Failed to encode reply to request {}: {}", request_id, err);
            }
        }
    }
}
