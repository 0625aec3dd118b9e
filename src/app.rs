//! HTTP API: routes and request handlers.

use crate::app_state::{AppState, SharedAppState};
use crate::cli::CommandLineArgs;
use crate::error::ChartStatsError;
use crate::metrics;
use crate::models::{self, Pagination};
use crate::operation::Operation;
use crate::operations;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::Uri,
    response::Html,
    routing::get,
    Json, Router,
};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tower::{Layer, ServiceBuilder};
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Chartstats Service type alias
///
/// This type implements [tower::Service].
pub type Service = NormalizePath<Router>;

/// Returns a [crate::app::Service] with all routes and the table loaded from the configured
/// data file.
///
/// # Arguments
///
/// * `args`: Command line arguments
pub fn service(args: &CommandLineArgs) -> Service {
    let state = Arc::new(AppState::new(args));
    service_with_state(state)
}

/// Returns a [crate::app::Service] over existing application state.
///
/// The service normalises trailing slashes before routing.
pub fn service_with_state(state: SharedAppState) -> Service {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Returns a [axum::Router] with all routes.
pub fn router(state: SharedAppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/dashboard", get(dashboard))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/songs", get(list_songs))
        .route("/stats/summary", get(summary))
        .route("/stats/top", get(top_default))
        .route("/stats/top/:n", get(top))
        .route("/stats/artist/:name", get(artist))
        .route("/stats/engagement", get(engagement))
        .fallback(not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .on_request(metrics::request_counter)
                        .on_response(metrics::record_response_metrics),
                )
                .layer(CorsLayer::permissive()),
        )
}

/// Execute an operation against the shared table.
fn run<T: Operation>(
    state: &AppState,
    params: T::Params,
) -> Result<Json<T::Output>, ChartStatsError> {
    let span = tracing::debug_span!("query", operation = T::NAME, params = ?params);
    let _enter = span.enter();
    T::execute(&state.table, params).map(Json)
}

/// API documentation and dataset metadata
async fn index(State(state): State<SharedAppState>) -> Json<models::ApiIndex> {
    let endpoints = BTreeMap::from([
        ("GET /stats/summary", "Overall dataset statistics"),
        ("GET /stats/top/<n>", "Top N songs by views (default 10)"),
        ("GET /stats/artist/<artist_name>", "Stats for specific artist"),
        ("GET /stats/engagement", "Engagement rate analysis"),
        ("GET /songs", "List all songs with pagination"),
        ("GET /health", "Health check"),
        ("GET /dashboard", "Dashboard page"),
        ("GET /metrics", "Prometheus metrics"),
    ]);
    Json(models::ApiIndex {
        message: "Music Analytics API - Billboard Hot 100 2024",
        endpoints,
        dataset_info: models::DatasetInfo {
            total_songs: state.table.len(),
            columns: state.table.columns().to_vec(),
        },
    })
}

/// Format a time as RFC 3339, falling back to seconds since the Unix epoch.
fn timestamp(time: OffsetDateTime) -> String {
    time.format(&Rfc3339).unwrap_or_else(|err| {
        warn!("Failed to format {} as RFC 3339: {}", time, err);
        time.unix_timestamp().to_string()
    })
}

async fn health(State(state): State<SharedAppState>) -> Json<models::Health> {
    Json(models::Health {
        status: "healthy",
        timestamp: timestamp(OffsetDateTime::now_utc()),
        data_loaded: !state.table.is_empty(),
    })
}

async fn dashboard(
    State(state): State<SharedAppState>,
) -> Result<Html<String>, ChartStatsError> {
    let path = &state.args.dashboard_file;
    tokio::fs::read_to_string(path)
        .await
        .map(Html)
        .map_err(|source| ChartStatsError::DashboardUnavailable {
            path: path.clone(),
            source,
        })
}

async fn summary(
    State(state): State<SharedAppState>,
) -> Result<Json<models::Summary>, ChartStatsError> {
    run::<operations::Summary>(&state, ())
}

async fn top_default(
    State(state): State<SharedAppState>,
) -> Result<Json<models::TopSongs>, ChartStatsError> {
    run::<operations::TopN>(&state, operations::DEFAULT_TOP_N)
}

async fn top(
    State(state): State<SharedAppState>,
    n: Result<Path<i64>, PathRejection>,
) -> Result<Json<models::TopSongs>, ChartStatsError> {
    let Path(n) = n?;
    run::<operations::TopN>(&state, n)
}

async fn artist(
    State(state): State<SharedAppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<models::ArtistStats>, ChartStatsError> {
    let Path(name) = name?;
    run::<operations::ArtistStats>(&state, name)
}

async fn engagement(
    State(state): State<SharedAppState>,
) -> Result<Json<models::Engagement>, ChartStatsError> {
    run::<operations::Engagement>(&state, ())
}

/// Song listing. Query parameters that cannot be read fall back to their defaults.
async fn list_songs(
    State(state): State<SharedAppState>,
    query: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<models::SongPage>, ChartStatsError> {
    let pagination = match query {
        Ok(Query(pagination)) => pagination,
        Err(rejection) => {
            debug!("Ignoring song listing query: {}", rejection);
            Pagination::default()
        }
    };
    run::<operations::ListSongs>(&state, pagination)
}

async fn not_found(uri: Uri) -> ChartStatsError {
    ChartStatsError::RouteNotFound {
        path: uri.path().to_string(),
    }
}
