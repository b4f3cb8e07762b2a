//! Tracing initialisation shared by the `abomd` and `abom` binaries.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` wins over `level` when set. With `json`, log lines are
/// newline-delimited JSON with span context attached. Only the first call
/// in a process takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let format_layer = if json {
        fmt::layer()
            .with_target(false)
            .json()
            .with_current_span(true)
            .boxed()
    } else {
        fmt::layer().with_target(false).compact().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(format_layer)
        .try_init()
        .ok();
}
