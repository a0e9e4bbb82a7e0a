//! Domain errors surfaced by the detail lookup

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Conditions a caller of [`crate::content::PostLoader::get_detail`] must handle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlogError {
    #[error("Invalid post id: {0}")]
    InvalidId(i64),

    #[error("Malformed post id: {0:?}")]
    MalformedId(String),

    #[error("Post not found: {0}")]
    NotFound(u32),
}

impl BlogError {
    /// HTTP status this condition maps to
    pub fn status(&self) -> StatusCode {
        match self {
            BlogError::InvalidId(_) | BlogError::MalformedId(_) => StatusCode::BAD_REQUEST,
            BlogError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
