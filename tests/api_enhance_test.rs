//! Integration tests for POST /api/enhance

mod common;

use axum::http::StatusCode;
use common::fixtures::{dark_image, flat_image, png_bytes};
use common::{assert_api_error, assert_close, assert_png, TestApp};
use fuzzy_enhance::imaging::{analyze, apply_enhancements, decode_png};
use fuzzy_infer::{infer, EnhancementParameters};
use pretty_assertions::assert_eq;

fn header_parameters(response: &common::app::TestResponse) -> EnhancementParameters {
    EnhancementParameters {
        brightness_adj: response.header_f64("x-brightness-adj"),
        contrast_adj: response.header_f64("x-contrast-adj"),
        sharpen: response.header_f64("x-sharpen"),
        denoise: response.header_f64("x-denoise"),
    }
}

#[tokio::test]
async fn test_enhance_dark_image() {
    let app = TestApp::new();
    let image = dark_image();

    let response = app.post_png("/api/enhance", png_bytes(&image)).await;
    assert_png(&response);

    let params = header_parameters(&response);
    assert_close(params.brightness_adj, 84.96774193548387, 1e-9);
    assert!(params.contrast_adj > 1.0);

    let fired = response.header("x-fired-rules").unwrap();
    assert!(fired.starts_with("1,2,"), "unexpected fired rules {fired}");

    let enhanced = decode_png(response.bytes()).unwrap();
    assert_eq!(enhanced.width(), image.width());
    assert_eq!(enhanced.height(), image.height());
    assert!(analyze(&enhanced).brightness > analyze(&image).brightness + 50.0);
}

#[tokio::test]
async fn test_enhance_matches_library_pipeline() {
    let app = TestApp::new();
    let image = dark_image();

    let response = app.post_png("/api/enhance", png_bytes(&image)).await;
    let params = header_parameters(&response);

    // Header values are printed with full precision
    let expected = infer(&analyze(&image)).parameters;
    assert_eq!(params, expected);

    let enhanced = decode_png(response.bytes()).unwrap();
    assert_eq!(enhanced, apply_enhancements(&image, &expected));
}

#[tokio::test]
async fn test_enhance_bright_image_darkens() {
    let app = TestApp::new();

    let response = app
        .post_png("/api/enhance", png_bytes(&flat_image(8, 8, 200)))
        .await;
    assert_png(&response);
    assert!(response.header_f64("x-brightness-adj") < -20.0);
}

#[tokio::test]
async fn test_enhance_rejects_non_png() {
    let app = TestApp::new();

    let response = app.post_png("/api/enhance", b"not an image".to_vec()).await;
    assert_api_error(&response, StatusCode::BAD_REQUEST);
}
