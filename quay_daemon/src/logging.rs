use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber; `RUST_LOG` wins over the verbosity flag when set
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
