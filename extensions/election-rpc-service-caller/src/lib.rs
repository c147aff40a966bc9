mod caller_interface;
pub use caller_interface::*;

pub mod error;
pub use error::RpcCallerError;

pub mod prebuffered;
