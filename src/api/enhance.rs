use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use fuzzy_infer::EnhancementParameters;

use super::decode_upload;
use crate::error::ApiError;
use crate::imaging::encode_png;
use crate::server::AppState;

pub const BRIGHTNESS_ADJ_HEADER: &str = "x-brightness-adj";
pub const CONTRAST_ADJ_HEADER: &str = "x-contrast-adj";
pub const SHARPEN_HEADER: &str = "x-sharpen";
pub const DENOISE_HEADER: &str = "x-denoise";
pub const FIRED_RULES_HEADER: &str = "x-fired-rules";

/// Enhance a PNG
///
/// Analyzes the image, infers parameters and applies them. The enhanced
/// image is returned as PNG; the parameters used are echoed in headers.
#[utoipa::path(
    post,
    path = "/api/enhance",
    request_body(content = Vec<u8>, description = "PNG image", content_type = "image/png"),
    responses(
        (status = 200, description = "Enhanced PNG image", content_type = "image/png",
            headers(
                ("X-Brightness-Adj" = f64, description = "Brightness offset applied"),
                ("X-Contrast-Adj" = f64, description = "Contrast factor applied"),
                ("X-Sharpen" = f64, description = "Sharpen strength applied"),
                ("X-Denoise" = f64, description = "Denoise strength applied"),
                ("X-Fired-Rules" = String, description = "Comma-separated ids of the fired rules"),
            )
        ),
        (status = 400, description = "Body is not a decodable PNG"),
        (status = 413, description = "Image exceeds the configured limits"),
    ),
    tag = "Imaging"
)]
pub async fn handle_enhance(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let image = decode_upload(body, &state.config.limits).await?;
    let report = state.pipeline.enhance_blocking(image).await?;

    let enhanced = report.image;
    let png = tokio::task::spawn_blocking(move || encode_png(&enhanced))
        .await
        .map_err(|e| ApiError::Internal(format!("Encode task failed: {e}")))??;

    let fired = report
        .result
        .fired_rule_ids()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");

    let mut response = (
        [(header::CONTENT_TYPE, HeaderValue::from_static("image/png"))],
        png,
    )
        .into_response();
    let headers = response.headers_mut();
    for (name, value) in parameter_headers(&report.result.parameters) {
        headers.insert(name, value);
    }
    if let Ok(value) = HeaderValue::from_str(&fired) {
        headers.insert(HeaderName::from_static(FIRED_RULES_HEADER), value);
    }

    Ok(response)
}

fn parameter_headers(params: &EnhancementParameters) -> Vec<(HeaderName, HeaderValue)> {
    [
        (BRIGHTNESS_ADJ_HEADER, params.brightness_adj),
        (CONTRAST_ADJ_HEADER, params.contrast_adj),
        (SHARPEN_HEADER, params.sharpen),
        (DENOISE_HEADER, params.denoise),
    ]
    .into_iter()
    .filter_map(|(name, value)| {
        HeaderValue::from_str(&value.to_string())
            .ok()
            .map(|v| (HeaderName::from_static(name), v))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_headers_round_trip_exactly() {
        let params = EnhancementParameters {
            brightness_adj: -84.96774193548387,
            contrast_adj: 0.9997368421052629,
            sharpen: 0.0,
            denoise: 5.142857142857143,
        };
        let headers = parameter_headers(&params);
        assert_eq!(headers.len(), 4);

        let parsed: Vec<f64> = headers
            .iter()
            .map(|(_, v)| v.to_str().unwrap().parse().unwrap())
            .collect();
        assert_eq!(
            parsed,
            vec![
                params.brightness_adj,
                params.contrast_adj,
                params.sharpen,
                params.denoise
            ]
        );
        assert_eq!(headers[0].0.as_str(), "x-brightness-adj");
    }
}
