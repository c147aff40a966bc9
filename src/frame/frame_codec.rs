use crate::{
    constants::{
        FRAME_HEADER_SIZE, FRAME_KIND_OFFSET, FRAME_METHOD_ID_OFFSET, FRAME_PAYLOAD_LENGTH_OFFSET,
        FRAME_REQUEST_ID_OFFSET, FRAME_STATUS_OFFSET,
    },
    frame::{Frame, FrameDecodeError, FrameEncodeError, FrameKind},
};

/// Serializes frames to bytes and parses them back.
///
/// Layout: `kind | request_id | method_id | status | payload_len | payload`.
pub struct FrameCodec;

impl FrameCodec {
    /// Encodes a `Frame` into a byte vector ready to be handed to the transport.
    pub fn encode(frame: &Frame) -> Result<Vec<u8>, FrameEncodeError> {
        let payload_len = u32::try_from(frame.payload.len())
            .map_err(|_| FrameEncodeError::PayloadTooLarge(frame.payload.len()))?;

        let mut buf = Vec::with_capacity(FRAME_HEADER_SIZE + frame.payload.len());
        buf.push(frame.kind.into());
        buf.extend(&frame.request_id.to_le_bytes());
        buf.extend(&frame.method_id.to_le_bytes());
        buf.push(frame.status);
        buf.extend(&payload_len.to_le_bytes());
        buf.extend(&frame.payload);

        Ok(buf)
    }

    /// Decodes a complete frame.
    ///
    /// The buffer must hold exactly one frame: a short header, an unknown kind,
    /// or a payload whose size differs from the declared length are all
    /// rejected.
    pub fn decode(buf: &[u8]) -> Result<Frame, FrameDecodeError> {
        if buf.len() < FRAME_HEADER_SIZE {
            return Err(FrameDecodeError::IncompleteHeader(buf.len()));
        }

        let (header, payload) = buf.split_at(FRAME_HEADER_SIZE);

        let kind = FrameKind::try_from(header[FRAME_KIND_OFFSET])
            .map_err(|err| FrameDecodeError::CorruptFrame(err.number))?;
        let request_id = u32::from_le_bytes(le_array(header, FRAME_REQUEST_ID_OFFSET));
        let method_id = u64::from_le_bytes(le_array(header, FRAME_METHOD_ID_OFFSET));
        let status = header[FRAME_STATUS_OFFSET];
        let declared = u32::from_le_bytes(le_array(header, FRAME_PAYLOAD_LENGTH_OFFSET)) as usize;

        if declared != payload.len() {
            return Err(FrameDecodeError::PayloadLengthMismatch {
                declared,
                actual: payload.len(),
            });
        }

        Ok(Frame {
            kind,
            request_id,
            method_id,
            status,
            payload: payload.to_vec(),
        })
    }
}

/// Copies `N` bytes starting at `offset`. Callers have already checked the
/// header length.
fn le_array<const N: usize>(buf: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&buf[offset..offset + N]);
    out
}
