//! Error handling.

use axum::{
    extract::rejection::PathRejection,
    http::header,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use strum_macros::Display;
use thiserror::Error;
use tracing::{event, Level};

/// Chartstats error type
///
/// This type encapsulates the various errors that may occur while loading or querying the
/// dataset. Each variant may result in a different API error response.
#[derive(Debug, Error)]
pub enum ChartStatsError {
    /// Error reading the dataset file
    #[error("failed to read dataset {path}")]
    DatasetRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing the dataset as CSV
    #[error("failed to parse dataset")]
    DatasetParse(#[from] csv::Error),

    /// The dataset header lacks a required column
    #[error("dataset is missing required column {column}")]
    MissingColumn { column: &'static str },

    /// Requested number of top songs is out of range
    #[error("N must be between {min} and {max}")]
    TopNOutOfRange { n: i64, min: i64, max: i64 },

    /// Error extracting a path parameter
    #[error("invalid path parameter")]
    PathRejection(#[from] PathRejection),

    /// No channel matches the requested artist
    #[error("No songs found for artist: {artist}")]
    ArtistNotFound { artist: String },

    /// No route matches the request path
    #[error("no route for {path}")]
    RouteNotFound { path: String },

    /// The dashboard page could not be read
    #[error("could not read dashboard {path}")]
    DashboardUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Attempt to aggregate over an empty dataset
    #[error("cannot compute {operation} on an empty dataset")]
    EmptyDataset { operation: &'static str },

    /// An aggregate evaluated to NaN or infinity
    #[error("{column} {statistic} is not defined for this dataset")]
    NonFiniteStatistic {
        column: &'static str,
        statistic: &'static str,
    },
}

/// Broad classification of [ChartStatsError] variants.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum ErrorKind {
    /// The dataset could not be loaded
    LoadFailure,
    /// A client supplied a bad argument
    InvalidArgument,
    /// The requested resource does not exist
    NotFound,
    /// A statistic has no defined value for the loaded data
    AggregateUndefined,
}

impl ChartStatsError {
    /// Returns the [ErrorKind] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DatasetRead { .. } | Self::DatasetParse(_) | Self::MissingColumn { .. } => {
                ErrorKind::LoadFailure
            }
            Self::TopNOutOfRange { .. } | Self::PathRejection(_) => ErrorKind::InvalidArgument,
            Self::ArtistNotFound { .. }
            | Self::RouteNotFound { .. }
            | Self::DashboardUnavailable { .. } => ErrorKind::NotFound,
            Self::EmptyDataset { .. } | Self::NonFiniteStatistic { .. } => {
                ErrorKind::AggregateUndefined
            }
        }
    }
}

impl IntoResponse for ChartStatsError {
    /// Convert from a `ChartStatsError` into an [axum::response::Response].
    fn into_response(self) -> Response {
        ErrorResponse::from(self).into_response()
    }
}

/// Body of error response
///
/// Implements serde (de)serialise.
#[derive(Deserialize, Serialize)]
struct ErrorBody {
    /// Main error message
    error: String,

    /// Optional list of causes
    #[serde(skip_serializing_if = "Option::is_none")]
    caused_by: Option<Vec<String>>,
}

impl ErrorBody {
    /// Return a new ErrorBody
    ///
    /// # Arguments
    ///
    /// * `error`: The error that occurred
    fn new<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        let mut caused_by: Option<Vec<String>> = None;
        let mut current = error.source();
        while let Some(source) = current {
            caused_by
                .get_or_insert_with(Vec::new)
                .push(source.to_string());
            current = source.source();
        }
        // Remove duplicate entries.
        if let Some(caused_by) = caused_by.as_mut() {
            caused_by.dedup()
        }
        ErrorBody {
            error: error.to_string(),
            caused_by,
        }
    }
}

/// A response to send in error cases
#[derive(Deserialize, Serialize)]
struct ErrorResponse {
    /// HTTP status of the response
    #[serde(skip)]
    status: StatusCode,

    /// Response body
    #[serde(flatten)]
    body: ErrorBody,
}

impl ErrorResponse {
    fn new<E>(status: StatusCode, error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        ErrorResponse {
            status,
            body: ErrorBody::new(error),
        }
    }
}

impl From<ChartStatsError> for ErrorResponse {
    /// Convert from a `ChartStatsError` into an `ErrorResponse`.
    fn from(error: ChartStatsError) -> Self {
        let status = match error.kind() {
            ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::LoadFailure | ErrorKind::AggregateUndefined => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let response = Self::new(status, &error);

        // Log server errors.
        if response.status.is_server_error() {
            event!(Level::ERROR, kind = %error.kind(), "{}", error);
            let mut current = error.source();
            while let Some(source) = current {
                event!(Level::ERROR, "Caused by: {}", source);
                current = source.source();
            }
        }

        response
    }
}

impl IntoResponse for ErrorResponse {
    /// Convert from an `ErrorResponse` into an `axum::response::Response`.
    ///
    /// Renders the response as JSON.
    fn into_response(self) -> Response {
        let json_body = serde_json::to_string_pretty(&self);
        match json_body {
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialise error response: {}", err),
            )
                .into_response(),
            Ok(json_body) => (
                self.status,
                [(&header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string())],
                json_body,
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hyper::HeaderMap;

    // Jump through the hoops to get the body as a string.
    async fn body_string(response: Response) -> String {
        String::from_utf8(
            hyper::body::to_bytes(response.into_body())
                .await
                .unwrap()
                .to_vec(),
        )
        .unwrap()
    }

    async fn test_chart_stats_error(
        error: ChartStatsError,
        status: StatusCode,
        message: &str,
        caused_by: Option<Vec<&'static str>>,
    ) {
        let response = error.into_response();
        assert_eq!(status, response.status());
        let mut headers = HeaderMap::new();
        headers.insert(&header::CONTENT_TYPE, "application/json".parse().unwrap());
        assert_eq!(headers, *response.headers());
        let error_response: ErrorResponse =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(message.to_string(), error_response.body.error);
        // Map Vec items from str to String
        let caused_by = caused_by.map(|cb| cb.iter().map(|s| s.to_string()).collect());
        assert_eq!(caused_by, error_response.body.caused_by);
    }

    #[tokio::test]
    async fn dataset_read_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = ChartStatsError::DatasetRead {
            path: "songs.csv".to_string(),
            source: io_error,
        };
        assert_eq!(error.kind(), ErrorKind::LoadFailure);
        let message = "failed to read dataset songs.csv";
        let caused_by = Some(vec!["no such file"]);
        test_chart_stats_error(error, StatusCode::INTERNAL_SERVER_ERROR, message, caused_by)
            .await;
    }

    #[tokio::test]
    async fn missing_column() {
        let error = ChartStatsError::MissingColumn { column: "views" };
        assert_eq!(error.kind(), ErrorKind::LoadFailure);
        let message = "dataset is missing required column views";
        test_chart_stats_error(error, StatusCode::INTERNAL_SERVER_ERROR, message, None).await;
    }

    #[tokio::test]
    async fn top_n_out_of_range() {
        let error = ChartStatsError::TopNOutOfRange {
            n: 101,
            min: 1,
            max: 100,
        };
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        let message = "N must be between 1 and 100";
        test_chart_stats_error(error, StatusCode::BAD_REQUEST, message, None).await;
    }

    #[tokio::test]
    async fn artist_not_found() {
        let error = ChartStatsError::ArtistNotFound {
            artist: "nobody".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::NotFound);
        let message = "No songs found for artist: nobody";
        test_chart_stats_error(error, StatusCode::NOT_FOUND, message, None).await;
    }

    #[tokio::test]
    async fn route_not_found() {
        let error = ChartStatsError::RouteNotFound {
            path: "/foo".to_string(),
        };
        let message = "no route for /foo";
        test_chart_stats_error(error, StatusCode::NOT_FOUND, message, None).await;
    }

    #[tokio::test]
    async fn dashboard_unavailable() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = ChartStatsError::DashboardUnavailable {
            path: "index.html".to_string(),
            source: io_error,
        };
        let message = "could not read dashboard index.html";
        let caused_by = Some(vec!["gone"]);
        test_chart_stats_error(error, StatusCode::NOT_FOUND, message, caused_by).await;
    }

    #[tokio::test]
    async fn empty_dataset() {
        let error = ChartStatsError::EmptyDataset {
            operation: "summary",
        };
        assert_eq!(error.kind(), ErrorKind::AggregateUndefined);
        let message = "cannot compute summary on an empty dataset";
        test_chart_stats_error(error, StatusCode::INTERNAL_SERVER_ERROR, message, None).await;
    }

    #[tokio::test]
    async fn non_finite_statistic() {
        let error = ChartStatsError::NonFiniteStatistic {
            column: "views",
            statistic: "standard deviation",
        };
        let message = "views standard deviation is not defined for this dataset";
        test_chart_stats_error(error, StatusCode::INTERNAL_SERVER_ERROR, message, None).await;
    }

    #[test]
    fn kind_display() {
        assert_eq!(ErrorKind::AggregateUndefined.to_string(), "AggregateUndefined");
    }
}
