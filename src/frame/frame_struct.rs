use crate::frame::FrameKind;

/// A single encoded RPC message.
///
/// Each transport message carries exactly one frame, so there is no chunking
/// or stream reassembly: the frame header is followed by the complete payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Whether this frame is a call or the response to one.
    pub kind: FrameKind,

    /// Correlates a response with the call that produced it.
    pub request_id: u32,

    /// Hashed method name the call is routed by.
    pub method_id: u64,

    /// Raw `RpcResultStatus` byte. Calls leave this at zero.
    pub status: u8,

    /// Encoded request or reply message. Its interpretation is left to the
    /// service definition.
    pub payload: Vec<u8>,
}
