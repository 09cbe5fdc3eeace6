use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures that cannot be turned into a rendered page.
///
/// Query failures never reach this type: handlers log them and re-render the
/// page with empty data instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something went wrong. Please try again later.",
        )
            .into_response()
    }
}
