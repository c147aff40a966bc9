/// Route the WebSocket transport serves RPC frames on.
pub const DEFAULT_RPC_WS_PATH: &str = "/ws";
