use crate::frame::{Frame, FrameDecodeError, FrameKind};
use crate::rpc::RpcResultStatus;

/// An inbound or outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcRequest {
    pub request_id: u32,
    pub method_id: u64,
    pub payload_bytes: Vec<u8>,
}

impl RpcRequest {
    pub fn into_frame(self) -> Frame {
        Frame {
            kind: FrameKind::Call,
            request_id: self.request_id,
            method_id: self.method_id,
            status: 0,
            payload: self.payload_bytes,
        }
    }
}

impl From<Frame> for RpcRequest {
    fn from(frame: Frame) -> Self {
        RpcRequest {
            request_id: frame.request_id,
            method_id: frame.method_id,
            payload_bytes: frame.payload,
        }
    }
}

/// The reply to an `RpcRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcResponse {
    pub request_id: u32,
    pub method_id: u64,
    pub result_status: RpcResultStatus,
    pub payload_bytes: Vec<u8>,
}

impl RpcResponse {
    /// Builds a response that answers `request`.
    pub fn for_request(
        request: &RpcRequest,
        result_status: RpcResultStatus,
        payload_bytes: Vec<u8>,
    ) -> RpcResponse {
        RpcResponse {
            request_id: request.request_id,
            method_id: request.method_id,
            result_status,
            payload_bytes,
        }
    }

    pub fn into_frame(self) -> Frame {
        Frame {
            kind: FrameKind::Response,
            request_id: self.request_id,
            method_id: self.method_id,
            status: self.result_status.into(),
            payload: self.payload_bytes,
        }
    }
}

impl TryFrom<Frame> for RpcResponse {
    type Error = FrameDecodeError;

    fn try_from(frame: Frame) -> Result<Self, Self::Error> {
        let result_status = RpcResultStatus::try_from(frame.status)
            .map_err(|err| FrameDecodeError::UnknownResultStatus(err.number))?;

        Ok(RpcResponse {
            request_id: frame.request_id,
            method_id: frame.method_id,
            result_status,
            payload_bytes: frame.payload,
        })
    }
}
