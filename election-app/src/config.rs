use clap::Parser;
use election_rpc_service::DEFAULT_RPC_WS_PATH;
use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_LISTEN_ADDR: &str = "[::]:50000";
pub const DEFAULT_MAX_WORKERS: usize = 10;
pub const DEFAULT_SERVER_TARGET: &str = "localhost:50000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--max-workers must be at least 1")]
    NoWorkers,
}

/// Election data server
#[derive(Debug, Clone, Parser)]
#[command(name = "election-server")]
#[command(about = "Accepts election data submissions and logs them")]
pub struct ServerConfig {
    /// Address to listen on (format: IP:PORT)
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Number of worker threads handling calls
    #[arg(long, default_value_t = DEFAULT_MAX_WORKERS)]
    pub max_workers: usize,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }
}

/// Election data client
#[derive(Debug, Clone, Parser)]
#[command(name = "election-client")]
#[command(about = "Submits one sample election data request")]
pub struct ClientConfig {
    /// Server to submit to (format: HOST:PORT)
    #[arg(long, default_value = DEFAULT_SERVER_TARGET)]
    pub server_target: String,
}

impl ClientConfig {
    pub fn websocket_url(&self) -> String {
        format!("ws://{}{}", self.server_target, DEFAULT_RPC_WS_PATH)
    }
}
