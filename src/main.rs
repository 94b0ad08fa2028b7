//! This file defines the decimator binary entry point.

use decimator::app;
use decimator::cli;
use decimator::metrics;
use decimator::server;
use decimator::tracing;

use std::process::exit;

/// Application entry point
#[tokio::main]
async fn main() {
    let args = cli::parse();
    tracing::init_tracing();
    tracing::log_startup(&args);
    if let Err(err) = metrics::register_metrics() {
        ::tracing::error!("failed to register metrics: {}", err);
    }
    app::init(&args);
    let service = app::service(&args);
    if let Err(err) = server::serve(&args, service).await {
        ::tracing::error!("{}", err);
        exit(1)
    }
}
