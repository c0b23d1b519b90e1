/// Configure tracing once at application startup for the entire
/// process. Verbosity is controlled through `RUST_LOG`:
///
/// ```bash
/// RUST_LOG=debug cargo run    # show per-request debug logs
/// RUST_LOG=info cargo run     # default
/// RUST_LOG=grocery_catalog::catalog=debug cargo run
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
