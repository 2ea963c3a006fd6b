//! Logging initialization and utilities

/// Initialize the logging system.
///
/// Uses env_logger with a default filter level of `info`.
/// Override with the RUST_LOG environment variable.
///
/// # Example
/// ```
/// tidepool::core::logging::init();
/// log::info!("scene ready");
/// ```
pub fn init() {
    init_with("info");
}

/// Initialize with an explicit default filter. Safe to call more than
/// once (later calls are no-ops), so tests and tools can share it.
pub fn init_with(default_filter: &str) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .try_init();
}
