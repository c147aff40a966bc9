use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameEncodeError {
    /// The payload length does not fit the 32-bit length field.
    #[error("payload of {0} bytes exceeds the frame length field")]
    PayloadTooLarge(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameDecodeError {
    /// Fewer bytes than the fixed header were received.
    #[error("incomplete frame header: got {0} bytes")]
    IncompleteHeader(usize),

    /// The frame kind byte does not name a known kind.
    #[error("corrupt frame: unknown kind {0}")]
    CorruptFrame(u8),

    /// The declared payload length disagrees with the bytes that follow the
    /// header (truncated or padded frame).
    #[error("frame declares {declared} payload bytes but carries {actual}")]
    PayloadLengthMismatch { declared: usize, actual: usize },

    /// A response frame carries a status byte with no `RpcResultStatus`.
    #[error("unknown result status {0}")]
    UnknownResultStatus(u8),
}
