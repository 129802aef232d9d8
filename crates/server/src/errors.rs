use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use seoforge::SeoError;
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the
/// server, allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// Errors originating from the `seoforge` library.
    Seo(SeoError),
    /// Upstream quota exhaustion, surfaced to the client with a retry hint.
    Quota { retry_after_secs: u64 },
    /// The request payload was malformed or incomplete.
    BadRequest(String),
    /// The request targeted something this server does not serve.
    NotFound(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

/// Conversion from `SeoError` to `AppError`.
impl From<SeoError> for AppError {
    fn from(err: SeoError) -> Self {
        match err {
            SeoError::QuotaExceeded { retry_after_secs } => AppError::Quota { retry_after_secs },
            other => AppError::Seo(other),
        }
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            AppError::Quota { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({
                    "error": "AI provider quota exhausted. Please retry later.",
                    "retry_after_seconds": retry_after_secs,
                }),
            ),
            AppError::Seo(err) => {
                error!("SeoError: {:?}", err);
                let (status, message) = match err {
                    SeoError::AiRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Request to AI provider failed: {e}"),
                    ),
                    SeoError::AiDeserialization(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Failed to deserialize AI provider response: {e}"),
                    ),
                    SeoError::AiApi(e) => {
                        (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}"))
                    }
                    SeoError::UnparsableResponse => (
                        StatusCode::BAD_GATEWAY,
                        "AI provider returned an unusable response.".to_string(),
                    ),
                    SeoError::MissingApiKey => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Server is not configured correctly.".to_string(),
                    ),
                    other => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Internal error: {other}"),
                    ),
                };
                (status, json!({ "error": message }))
            }
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal server error occurred." }),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}
