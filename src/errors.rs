use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("Receipt not found")]
    NotFound,

    /// Body is not JSON, or does not have the receipt shape.
    #[error("Invalid receipt: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ReceiptError {
    pub fn status(&self) -> StatusCode {
        match self {
            ReceiptError::NotFound => StatusCode::NOT_FOUND,
            ReceiptError::Decode(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Errors are answered as plain text, never JSON.
impl IntoResponse for ReceiptError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
