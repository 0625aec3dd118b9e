//! Web server

use crate::cli;

use std::{net::SocketAddr, path::PathBuf, process::exit, str::FromStr, time::Duration};

use axum::ServiceExt;
use axum_server::{tls_rustls::RustlsConfig, Handle};
use expanduser::expanduser;
use tokio::signal;
use tracing::{error, info};

/// Serve the chart statistics API
///
/// # Arguments
///
/// * `args`: Command line arguments
/// * `service`: The [crate::app::Service] to serve
pub async fn serve(args: &cli::CommandLineArgs, service: crate::app::Service) {
    let addr = SocketAddr::from_str(&format!("{}:{}", args.host, args.port))
        .expect("invalid host name, IP address or port number");

    // Catch ctrl+c and try to shutdown gracefully
    let handle = Handle::new();
    tokio::spawn(shutdown_signal(
        handle.clone(),
        args.graceful_shutdown_timeout,
    ));

    if args.https {
        let cert_file = resolve_pem_file(&args.cert_file, "certificate");
        let key_file = resolve_pem_file(&args.key_file, "key");
        let tls_config = RustlsConfig::from_pem_file(cert_file, key_file)
            .await
            .expect("Failed to load TLS certificate files");
        info!("Server starting on https://{}", addr);
        axum_server::bind_rustls(addr, tls_config)
            .handle(handle)
            .serve(service.into_make_service())
            .await
            .unwrap();
    } else {
        info!("Server starting on http://{}", addr);
        axum_server::bind(addr)
            .handle(handle)
            .serve(service.into_make_service())
            .await
            .unwrap();
    }
}

/// Expand `~` in a TLS PEM file path and return its absolute path, exiting if the file does not
/// exist.
///
/// # Arguments
///
/// * `path`: Configured path of the file
/// * `description`: What the file holds, for error messages
fn resolve_pem_file(path: &str, description: &str) -> PathBuf {
    let expanded = expanduser(path)
        .expect("Failed to expand ~ to user name. Please provide an absolute path instead.");
    match expanded.canonicalize() {
        Ok(absolute) if absolute.exists() => absolute,
        _ => {
            error!(
                "TLS {} file expected at '{}' but not found.",
                description,
                expanded.display()
            );
            exit(1)
        }
    }
}

/// Graceful shutdown handler
///
/// Installs signal handlers to catch Ctrl-C or SIGTERM and trigger a graceful shutdown.
async fn shutdown_signal(handle: Handle, timeout: u64) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("signal received, starting graceful shutdown");
    // Force shutdown if graceful shutdown takes longer than the timeout
    handle.graceful_shutdown(Some(Duration::from_secs(timeout)));
}
