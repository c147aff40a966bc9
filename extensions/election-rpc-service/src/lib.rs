mod prebuffered;
pub use prebuffered::*;
pub mod constants;
pub use constants::*;
mod macros;
pub use macros::*;

pub use election_rpc::rpc::RpcResultStatus;
