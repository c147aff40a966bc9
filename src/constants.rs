// Frame layout constants (all integers are little endian)

/// Byte offset of the 1-byte frame kind (u8).
/// Values correspond to `FrameKind` variants.
pub const FRAME_KIND_OFFSET: usize = 0;

/// Byte offset where the 4-byte request ID (u32) begins.
/// A response carries the ID of the call it answers.
pub const FRAME_REQUEST_ID_OFFSET: usize = 1;

/// Byte offset where the 8-byte method ID (u64) begins.
pub const FRAME_METHOD_ID_OFFSET: usize = 5;

/// Byte offset of the 1-byte result status. Always zero on calls.
pub const FRAME_STATUS_OFFSET: usize = 13;

/// Byte offset where the 4-byte payload length (u32) begins.
pub const FRAME_PAYLOAD_LENGTH_OFFSET: usize = 14;

/// Total size of the fixed-length header that precedes the payload.
pub const FRAME_HEADER_SIZE: usize = 18;
