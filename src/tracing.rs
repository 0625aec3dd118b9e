//! Tracing (logging)

use crate::cli::CommandLineArgs;

use opentelemetry::global;
use opentelemetry::sdk::propagation::TraceContextPropagator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initlialise tracing (logging)
///
/// Applies a filter based on the `RUST_LOG` environment variable, falling back to enable debug
/// logging for this crate and tower_http if not set. Spans are also exported to Jaeger when
/// enabled on the command line.
///
/// # Arguments
///
/// * `args`: Command line arguments
pub fn init_tracing(args: &CommandLineArgs) {
    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chartstats=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer());
    if args.enable_jaeger {
        global::set_text_map_propagator(TraceContextPropagator::new());
        let tracer = opentelemetry_jaeger::new_agent_pipeline()
            .with_service_name("chartstats")
            .install_simple()
            .expect("Failed to initialise Jaeger tracer");
        subscriber
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .init();
    } else {
        subscriber.init();
    }
}

/// Flush any spans not yet exported.
pub fn shutdown_tracing() {
    global::shutdown_tracer_provider();
}
