use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::utils::KeyGenError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("URL parameter is missing")]
    MissingUrl,

    #[error("Shortened key is missing")]
    MissingKey,

    #[error("Shortened key not found")]
    NotFound,

    #[error("Failed to generate a short key")]
    KeyGeneration(#[from] KeyGenError),

    #[error("Failed to allocate a short key")]
    KeyspaceExhausted,

    #[error("Stored URL cannot be used as a redirect target")]
    InvalidTarget,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingUrl | AppError::MissingKey => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::KeyGeneration(_)
            | AppError::KeyspaceExhausted
            | AppError::InvalidTarget => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
