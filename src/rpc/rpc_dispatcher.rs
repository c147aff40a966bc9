use crate::frame::{FrameCodec, FrameDecodeError, FrameEncodeError, FrameKind};
use crate::rpc::{RpcRequest, RpcResponse};
use std::collections::HashMap;

/// Invoked once with the response to a call.
pub type RpcResponseHandler = Box<dyn FnOnce(RpcResponse) + Send + 'static>;

/// Tracks outbound calls and sorts inbound frames.
///
/// The dispatcher owns no transport. `call` and `respond` return the bytes to
/// send; `read_bytes` takes the bytes of one received message. A client keeps
/// one dispatcher per connection so replies find their way back to the
/// pending call; a server uses it to decode calls and encode responses.
pub struct RpcDispatcher {
    next_request_id: u32,
    pending: HashMap<u32, RpcResponseHandler>,
}

impl Default for RpcDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcDispatcher {
    pub fn new() -> Self {
        Self {
            next_request_id: 1,
            pending: HashMap::new(),
        }
    }

    /// Registers a call and returns its encoded frame.
    ///
    /// `on_response` runs when the matching response arrives through
    /// `read_bytes`. It is dropped without running if the call is cancelled.
    pub fn call<H>(
        &mut self,
        method_id: u64,
        payload_bytes: Vec<u8>,
        on_response: H,
    ) -> Result<Vec<u8>, FrameEncodeError>
    where
        H: FnOnce(RpcResponse) + Send + 'static,
    {
        let request_id = self.allocate_request_id();
        let request = RpcRequest {
            request_id,
            method_id,
            payload_bytes,
        };

        let bytes = FrameCodec::encode(&request.into_frame())?;
        self.pending.insert(request_id, Box::new(on_response));

        Ok(bytes)
    }

    /// Encodes a response frame.
    pub fn respond(&self, response: RpcResponse) -> Result<Vec<u8>, FrameEncodeError> {
        FrameCodec::encode(&response.into_frame())
    }

    /// Decodes one received message.
    ///
    /// Calls are returned to the caller. Responses are delivered to the
    /// handler registered by `call`; a response nobody is waiting for is
    /// logged and dropped.
    pub fn read_bytes(&mut self, bytes: &[u8]) -> Result<Option<RpcRequest>, FrameDecodeError> {
        let frame = FrameCodec::decode(bytes)?;

        match frame.kind {
            FrameKind::Call => Ok(Some(RpcRequest::from(frame))),
            FrameKind::Response => {
                let response = RpcResponse::try_from(frame)?;

                match self.pending.remove(&response.request_id) {
                    Some(on_response) => on_response(response),
                    None => tracing::warn!(
                        "Dropping response for unknown request {}",
                        response.request_id
                    ),
                }

                Ok(None)
            }
        }
    }

    /// Number of calls still waiting for a response.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drops every pending handler and returns how many there were.
    ///
    /// Used when the transport goes away: handlers holding a reply channel
    /// drop their sender, which the waiting caller observes as an aborted call.
    pub fn cancel_pending(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    fn allocate_request_id(&mut self) -> u32 {
        loop {
            let id = self.next_request_id;
            self.next_request_id = self.next_request_id.wrapping_add(1);

            if !self.pending.contains_key(&id) {
                return id;
            }
        }
    }
}
