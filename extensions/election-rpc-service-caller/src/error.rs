use std::io;
use thiserror::Error;

/// Errors seen by the calling side of an RPC.
#[derive(Debug, Error)]
pub enum RpcCallerError {
    /// A transport-level or encoding error occurred during the call.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The remote handler ran but returned an application-level error.
    /// The payload contains the error data sent by the server.
    #[error("Remote handler failed with payload: {payload:?}")]
    RemoteError { payload: Vec<u8> },

    /// The remote endpoint reported a system-level failure, such as a request
    /// payload it could not decode.
    #[error("Remote system error: {0}")]
    RemoteSystemError(String),

    /// No handler is registered for the method on the remote endpoint.
    #[error("Remote method {0:#018x} not found")]
    MethodNotFound(u64),

    /// The connection closed before a reply arrived.
    #[error("RPC call aborted: connection closed before a reply arrived")]
    Aborted,

    /// The call was attempted on a transport that is already closed.
    #[error("RPC transport is not connected")]
    NotConnected,
}
