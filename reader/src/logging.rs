use std::io;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::AnyResult;

/// Installs the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// Logs go to stderr, or to journald when `journald` is set, so stdout only
/// carries report lines.
///
/// # Errors
///
/// Fails on an invalid filter or when journald is unreachable.
pub fn init(level: &str, journald: bool) -> AnyResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log filter `{level}`"))?,
    };

    let (journald_layer, stderr_layer) = if journald {
        let layer = tracing_journald::layer().context("connecting to journald")?;
        (Some(layer), None)
    } else {
        let layer = fmt::layer().with_writer(io::stderr).with_target(false);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(journald_layer)
        .with(stderr_layer)
        .try_init()
        .context("installing tracing subscriber")
}
