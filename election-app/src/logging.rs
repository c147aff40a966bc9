use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber on stderr, leaving stdout to the
/// client's confirmation line. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
