//! Tracing subscriber setup.

use tracing::subscriber::{set_global_default, SetGlobalDefaultError};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Build a subscriber writing formatted events to `sink`.
///
/// `RUST_LOG` takes precedence over `env_filter` when set.
pub fn get_subscriber<Sink>(env_filter: &str, sink: Sink) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = fmt::layer().with_target(true).with_writer(sink);

    Registry::default().with(env_filter).with(formatting_layer)
}

/// Install `subscriber` as the global default. Only the first call wins.
pub fn init_subscriber(
    subscriber: impl Subscriber + Send + Sync,
) -> Result<(), SetGlobalDefaultError> {
    set_global_default(subscriber)
}

/// Log to stderr at `level`, ignoring an already-installed subscriber.
pub fn try_init_logging(level: &str) -> bool {
    init_subscriber(get_subscriber(level, std::io::stderr)).is_ok()
}
