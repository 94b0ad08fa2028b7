//! Tracing (logging)

use crate::cli::CommandLineArgs;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "decimator=debug,tower_http=debug";

/// Returns the filter from the `RUST_LOG` environment variable, or [DEFAULT_FILTER].
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Initialise tracing (logging)
///
/// Applies a filter based on the `RUST_LOG` environment variable, falling back to enable debug
/// logging for this crate and tower_http if not set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Log the effective configuration at start up.
pub fn log_startup(args: &CommandLineArgs) {
    tracing::info!(
        host = %args.host,
        port = args.port,
        https = args.https,
        data_dir = %args.data_dir,
        use_rayon = args.use_rayon,
        thread_limit = ?args.thread_limit,
        "starting decimator {}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!(
        las = cfg!(feature = "las"),
        segy = cfg!(feature = "segy"),
        "built-in readers"
    );
}
