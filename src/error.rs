use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Title not found: {0}")]
    NotFound(String),

    #[error("Title '{title}' is ambiguous: {matches} catalogue items share it")]
    AmbiguousTitle { title: String, matches: usize },

    #[error("Requested {requested} recommendations but only {available} candidates exist")]
    InsufficientData { requested: usize, available: usize },

    #[error("Cannot build a vector space from an empty corpus")]
    EmptyCorpus,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AmbiguousTitle { .. } => StatusCode::CONFLICT,
            AppError::InsufficientData { .. } | AppError::EmptyCorpus => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::HttpClient(_) | AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_)
            | AppError::Cache(_)
            | AppError::Csv(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_errors_map_to_client_statuses() {
        assert_eq!(
            AppError::NotFound("Nope".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::AmbiguousTitle {
                title: "Twin".to_string(),
                matches: 2
            }
            .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InsufficientData {
                requested: 5,
                available: 2
            }
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::EmptyCorpus.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_upstream_errors_map_to_bad_gateway() {
        let err = AppError::ExternalApi("catalogue host returned 503".to_string());
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_ambiguous_title_message() {
        let err = AppError::AmbiguousTitle {
            title: "Love".to_string(),
            matches: 3,
        };
        assert_eq!(
            err.to_string(),
            "Title 'Love' is ambiguous: 3 catalogue items share it"
        );
    }
}
