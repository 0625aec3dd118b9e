//! This file defines the chartstats binary entry point.

use chartstats::app;
use chartstats::cli;
use chartstats::metrics;
use chartstats::server;
use chartstats::tracing;

/// Application entry point
#[tokio::main]
async fn main() {
    let args = cli::parse();
    tracing::init_tracing(&args);
    metrics::register_metrics();
    let service = app::service(&args);
    server::serve(&args, service).await;
    tracing::shutdown_tracing();
}
