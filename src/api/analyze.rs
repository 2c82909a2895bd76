use axum::{body::Bytes, extract::rejection::BytesRejection, extract::State, response::Json};
use fuzzy_infer::interpret;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::{decode_upload, MetricsBody};
use crate::error::ApiError;
use crate::imaging::histogram;
use crate::server::AppState;

/// Measured quality of an uploaded image
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub width: u32,
    pub height: u32,
    pub metrics: MetricsBody,
    /// One-sentence description of the image
    pub interpretation: String,
    /// Luma histogram, 256 bins
    pub histogram: Vec<u32>,
}

/// Measure brightness, contrast, sharpness and noise of a PNG
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body(content = Vec<u8>, description = "PNG image", content_type = "image/png"),
    responses(
        (status = 200, description = "Image metrics", body = AnalyzeResponse),
        (status = 400, description = "Body is not a decodable PNG"),
        (status = 413, description = "Image exceeds the configured limits"),
    ),
    tag = "Imaging"
)]
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let image = Arc::new(decode_upload(body, &state.config.limits).await?);
    let metrics = state.pipeline.analyze_blocking(image.clone()).await?;

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        ?metrics,
        "Analyzed image"
    );

    Ok(Json(AnalyzeResponse {
        width: image.width(),
        height: image.height(),
        metrics: metrics.into(),
        interpretation: interpret(&metrics),
        histogram: histogram(&image),
    }))
}
