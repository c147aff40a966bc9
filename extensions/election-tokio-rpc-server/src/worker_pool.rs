use std::io;
use tokio::runtime::{Builder, Runtime};

/// Builds the bounded multi-threaded runtime that hosts the server.
///
/// Exactly `max_workers` threads service connections and calls. Calls share
/// no state, so no other coordination is needed.
pub fn build_worker_runtime(max_workers: usize) -> io::Result<Runtime> {
    if max_workers == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "worker pool needs at least one worker",
        ));
    }

    Builder::new_multi_thread()
        .thread_name("election-rpc-worker")
        .worker_threads(max_workers)
        .enable_io()
        .enable_time()
        .build()
}
