use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fuzzy_infer::KnowledgeBaseError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Image error: {0}")]
    Image(#[from] ImagingError),

    #[error("Payload too large (max {max} bytes)")]
    PayloadTooLarge { max: usize },

    #[error("Invalid metrics: {0}")]
    InvalidMetrics(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Image has {pixels} pixels (max {max})")]
    TooManyPixels { pixels: usize, max: usize },

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read knowledge base {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse knowledge base {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("Invalid knowledge base: {0}")]
    Invalid(#[from] KnowledgeBaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Image(ImagingError::TooManyPixels { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Image(ImagingError::PngEncode(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Image(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InvalidMetrics(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
