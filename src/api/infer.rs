use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use fuzzy_infer::{
    interpret, recommended_actions, rule_activations, ImageMetrics, InferenceResult,
    RuleActivation,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::server::AppState;

/// The four image quality measurements
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct MetricsBody {
    /// Mean luma, 0 to 255
    #[schema(example = 127.0)]
    pub brightness: f64,
    /// Luma spread, 0 to 100
    #[schema(example = 50.0)]
    pub contrast: f64,
    /// Edge energy, 0 to 100
    #[schema(example = 70.0)]
    pub sharpness: f64,
    /// Pixel-level variation, 0 to 100
    #[schema(example = 10.0)]
    pub noise: f64,
}

impl From<MetricsBody> for ImageMetrics {
    fn from(m: MetricsBody) -> Self {
        ImageMetrics::new(m.brightness, m.contrast, m.sharpness, m.noise)
    }
}

impl From<ImageMetrics> for MetricsBody {
    fn from(m: ImageMetrics) -> Self {
        Self {
            brightness: m.brightness,
            contrast: m.contrast,
            sharpness: m.sharpness,
            noise: m.noise,
        }
    }
}

/// Inference trace with a readable summary
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InferResponse {
    /// Fuzzified inputs, fired rules, aggregated curves and parameters
    #[schema(value_type = Object)]
    pub result: InferenceResult,
    /// One-sentence description of the image
    pub interpretation: String,
    /// What the parameters will do to the image
    pub recommended_actions: Vec<String>,
    /// Per-rule breakdown of the fired rules
    #[schema(value_type = Vec<Object>)]
    pub activations: Vec<RuleActivation>,
}

/// Infer enhancement parameters from metrics
///
/// Runs the Mamdani pipeline on the given metrics and returns the full trace.
/// Values outside the nominal ranges are accepted; they simply match no term.
#[utoipa::path(
    post,
    path = "/api/infer",
    request_body = MetricsBody,
    responses(
        (status = 200, description = "Inference result", body = InferResponse),
        (status = 422, description = "Body is not a metrics object"),
    ),
    tag = "Inference"
)]
pub async fn handle_infer(
    State(state): State<AppState>,
    body: Result<Json<MetricsBody>, JsonRejection>,
) -> Result<Json<InferResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::InvalidMetrics(e.body_text()))?;
    let metrics = ImageMetrics::from(body);

    let result = state.pipeline.infer(&metrics).await;
    tracing::debug!(?metrics, fired = ?result.fired_rule_ids(), "Inferred parameters");

    Ok(Json(InferResponse {
        interpretation: interpret(&metrics),
        recommended_actions: recommended_actions(&result.parameters),
        activations: rule_activations(&result),
        result: InferenceResult::clone(&result),
    }))
}
