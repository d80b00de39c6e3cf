use thiserror::Error;
use warp::http::StatusCode;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing 'question' in body or query string.")]
    MissingQuestion,

    #[error("Upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The request handler is the only place errors become HTTP statuses.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingQuestion => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
