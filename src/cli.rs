//! Command Line Interface (CLI) arguments.

use clap::Parser;

/// Chartstats command line interface
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct CommandLineArgs {
    /// The IP address on which the server should listen
    #[arg(long, default_value = "0.0.0.0", env = "CHARTSTATS_HOST")]
    pub host: String,
    /// The port to which the server should bind
    #[arg(long, default_value_t = 5000, env = "CHARTSTATS_PORT")]
    pub port: u16,
    /// Flag indicating whether HTTPS should be used
    #[arg(long, default_value_t = false, env = "CHARTSTATS_HTTPS")]
    pub https: bool,
    /// Path to the certificate file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/chartstats/certs/cert.pem",
        env = "CHARTSTATS_CERT_FILE"
    )]
    pub cert_file: String,
    /// Path to the key file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/chartstats/certs/key.pem",
        env = "CHARTSTATS_KEY_FILE"
    )]
    pub key_file: String,
    /// Maximum time in seconds to wait for requests to complete upon receiving `ctrl+c` signal.
    #[arg(long, default_value_t = 60, env = "CHARTSTATS_SHUTDOWN_TIMEOUT")]
    pub graceful_shutdown_timeout: u64,
    /// Whether to enable sending traces to Jaeger.
    #[arg(long, default_value_t = false, env = "CHARTSTATS_ENABLE_JAEGER")]
    pub enable_jaeger: bool,
    /// CSV file holding the chart dataset, loaded once at start-up
    #[arg(
        long,
        default_value = "TOP 100 Songs of 2024 - Billboard Hot 100.csv",
        env = "CHARTSTATS_DATA_FILE"
    )]
    pub data_file: String,
    /// HTML page served at /dashboard
    #[arg(long, default_value = "index.html", env = "CHARTSTATS_DASHBOARD_FILE")]
    pub dashboard_file: String,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}
