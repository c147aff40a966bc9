use clap::Parser;
use election_app::{
    client::{sample_election_request, submit_election_data},
    config::ClientConfig,
    logging::init_tracing,
};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let config = ClientConfig::parse();
    let url = config.websocket_url();

    match submit_election_data(&url, sample_election_request()).await {
        Ok(reply) => {
            println!("Election client received: {}", reply.confirmation);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("Submitting to {} failed: {}", url, err);
            ExitCode::FAILURE
        }
    }
}
