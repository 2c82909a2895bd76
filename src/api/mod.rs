pub mod analyze;
pub mod enhance;
pub mod health;
pub mod infer;
pub mod knowledge_base;

pub use analyze::{handle_analyze, AnalyzeResponse, __path_handle_analyze};
pub use enhance::{handle_enhance, __path_handle_enhance};
pub use health::{handle_health, __path_handle_health};
pub use infer::{handle_infer, InferResponse, MetricsBody, __path_handle_infer};
pub use knowledge_base::{handle_knowledge_base, __path_handle_knowledge_base};

use axum::{body::Bytes, extract::rejection::BytesRejection, http::StatusCode};

use crate::error::ApiError;
use crate::imaging::{decode_png_limited, RgbaImage};
use crate::models::LimitsConfig;

/// Turn an uploaded body into an image, enforcing the configured limits.
///
/// Decoding runs on the blocking pool.
pub(crate) async fn decode_upload(
    body: Result<Bytes, BytesRejection>,
    limits: &LimitsConfig,
) -> Result<RgbaImage, ApiError> {
    let bytes = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge {
                max: limits.max_image_bytes,
            }
        } else {
            ApiError::BadRequest(e.body_text())
        }
    })?;
    if bytes.len() > limits.max_image_bytes {
        return Err(ApiError::PayloadTooLarge {
            max: limits.max_image_bytes,
        });
    }

    let max_pixels = limits.max_pixels;
    let image = tokio::task::spawn_blocking(move || decode_png_limited(&bytes, max_pixels))
        .await
        .map_err(|e| ApiError::Internal(format!("Decode task failed: {e}")))??;
    Ok(image)
}
