use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber writing to stderr, filtered by
/// `directives` (the same `tracing_subscriber::EnvFilter` syntax as
/// `RUST_LOG`, e.g. `"torrentwatch_scanner=debug,info"`). Call once, near
/// process startup; a second call is a caller bug, not something this
/// function works around.
pub fn init_logging(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
