//! Framing and dispatch core for the election data RPC exchange.
//!
//! Every RPC message travels as a single [`frame::Frame`]. The
//! [`rpc::RpcDispatcher`] sits on top of the codec: it assigns request IDs to
//! outbound calls, remembers who is waiting for which reply, and hands inbound
//! calls back to whoever owns the transport.

pub mod constants;
pub mod frame;
pub mod rpc;
