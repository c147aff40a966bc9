use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Outcome of a call, carried in the status byte of a response frame.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
pub enum RpcResultStatus {
    Success = 0,
    Fail = 1,
    SystemError = 2,
    MethodNotFound = 3,
}
