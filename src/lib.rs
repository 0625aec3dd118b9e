//! This crate provides a read-only analytics API over a song chart dataset. The dataset is a
//! CSV file of chart entries (title, channel, publication date, views, likes and comments)
//! that is loaded into memory once at start-up. Every request is a query over that immutable
//! table: summary statistics, the most viewed songs, per-artist totals, engagement rate
//! rankings and a paginated listing.
//!
//! If the dataset cannot be loaded the server still starts, serving an empty table and
//! reporting `data_loaded: false` from its health check.
//!
//! The server is built on top of a number of open source components.
//!
//! * [Tokio](tokio), the most popular asynchronous Rust runtime.
//! * [Axum](axum) web framework, built by the Tokio team, on top of the [hyper] HTTP library.
//! * [Serde](serde) performs serialisation of JSON response data.
//! * [csv] parses the dataset.
//! * [ndarray] provides the numerical arrays used for column statistics.

pub mod app;
pub mod app_state;
pub mod cli;
pub mod error;
pub mod metrics;
pub mod models;
pub mod operation;
pub mod operations;
pub mod server;
pub mod statistics;
pub mod table;
#[cfg(test)]
pub mod test_utils;
pub mod tracing;
