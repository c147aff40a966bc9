use clap::Parser;
use election_app::{config::ServerConfig, logging::init_tracing, service::election_server};
use election_tokio_rpc_server::build_worker_runtime;
use std::process::ExitCode;
use tokio::net::TcpListener;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> ExitCode {
    init_tracing();
    let config = ServerConfig::parse();

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Election server failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: ServerConfig) -> Result<(), BoxError> {
    config.validate()?;
    let runtime = build_worker_runtime(config.max_workers)?;
    runtime.block_on(serve(config))
}

async fn serve(config: ServerConfig) -> Result<(), BoxError> {
    let server = election_server().await?;
    let listener = TcpListener::bind(config.listen_addr).await?;

    tracing::info!(
        "Election Server is running on {} with {} workers",
        config.listen_addr,
        config.max_workers
    );

    server
        .serve_with_shutdown(listener, async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Shutting down"),
                Err(err) => {
                    tracing::warn!("Cannot listen for Ctrl-C, serving until killed: {}", err);
                    std::future::pending::<()>().await
                }
            }
        })
        .await?;

    Ok(())
}
