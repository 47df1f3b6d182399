use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the stderr subscriber; `RUST_LOG` wins over the verbosity flag.
pub(crate) fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    // A second initialisation (for example from an embedding program) is ignored.
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .try_init();
}
