use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr so tables and JSON on stdout stay clean.
///
/// `RUST_LOG` takes precedence over `level` when it is set.
pub fn init_logging(level: &str) {
    let default_filter = format!("usufruct={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::debug!("logging initialized (level={level})");
}
