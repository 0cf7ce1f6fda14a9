use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use intake_adapters::{CsrfError, SessionTokenError};

/// Failures a handler cannot turn into a form re-render or redirect.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("CSRF verification failed: {0}")]
    Csrf(#[from] CsrfError),
    #[error("Session error: {0}")]
    Session(#[from] SessionTokenError),
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        match self {
            RouteError::Csrf(err) => {
                tracing::warn!(error = %err, "rejected state-changing request");
                (
                    StatusCode::FORBIDDEN,
                    "The submitted form is invalid or has expired. Please go back and try again.",
                )
                    .into_response()
            }
            err => {
                // Cause stays server-side; the client only sees a generic notice.
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred. Please try again",
                )
                    .into_response()
            }
        }
    }
}
