use election_rpc::frame::{FrameDecodeError, FrameEncodeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcServiceEndpointError {
    #[error("failed to decode frame: {0}")]
    Decode(#[from] FrameDecodeError),

    #[error("failed to encode response: {0}")]
    Encode(#[from] FrameEncodeError),

    #[error("a handler for method ID {0:#018x} is already registered")]
    AlreadyRegistered(u64),
}

/// Returned by a handler to report an application-level failure.
///
/// The bytes travel back to the caller with a `Fail` status. Any other error
/// a handler returns is reported as a `SystemError` carrying its message.
#[derive(Debug, Error)]
#[error("handler failed with a {}-byte error payload", .0.len())]
pub struct HandlerPayloadError(pub Vec<u8>);
