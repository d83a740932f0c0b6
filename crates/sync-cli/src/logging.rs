use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber.
///
/// Logs go to stderr so stdout stays clean for `--json`. `RUST_LOG` wins
/// when set; otherwise the level is `warn`, or `debug` with `debug` set.
pub fn init(debug: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_level = if debug { "debug" } else { "warn" };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(debug)
        .with_level(true)
        .compact();

    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
