//! Integration tests for POST /api/analyze

mod common;

use axum::http::StatusCode;
use common::fixtures::{dark_image, flat_image, png_bytes};
use common::{assert_api_error, assert_close, assert_ok, TestApp};
use fuzzy_enhance::models::{AppConfig, LimitsConfig};
use pretty_assertions::assert_eq;
use serde_json::Value;

#[tokio::test]
async fn test_analyze_flat_image() {
    let app = TestApp::new();

    let response = app
        .post_png("/api/analyze", png_bytes(&flat_image(8, 8, 200)))
        .await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(json["width"], 8);
    assert_eq!(json["height"], 8);
    assert_close(json["metrics"]["brightness"].as_f64().unwrap(), 200.0, 1e-9);
    assert_close(json["metrics"]["contrast"].as_f64().unwrap(), 0.0, 1e-9);
    assert_close(json["metrics"]["sharpness"].as_f64().unwrap(), 0.0, 1e-9);
    assert_close(json["metrics"]["noise"].as_f64().unwrap(), 0.0, 1e-9);
    assert_eq!(
        json["interpretation"],
        "Image is bright, very low contrast, very blurry, clean."
    );

    let histogram = json["histogram"].as_array().unwrap();
    assert_eq!(histogram.len(), 256);
    assert_eq!(histogram[200], 64);
}

#[tokio::test]
async fn test_analyze_matches_library() {
    let app = TestApp::new();
    let image = dark_image();

    let json: Value = app
        .post_png("/api/analyze", png_bytes(&image))
        .await
        .json();
    let expected = fuzzy_enhance::imaging::analyze(&image);

    assert_eq!(json["metrics"]["brightness"].as_f64().unwrap(), expected.brightness);
    assert_eq!(json["metrics"]["contrast"].as_f64().unwrap(), expected.contrast);
    assert_eq!(json["metrics"]["sharpness"].as_f64().unwrap(), expected.sharpness);
    assert_eq!(json["metrics"]["noise"].as_f64().unwrap(), expected.noise);
}

#[tokio::test]
async fn test_analyze_rejects_non_png() {
    let app = TestApp::new();

    let response = app
        .post_png("/api/analyze", b"GIF89a this is not a png".to_vec())
        .await;
    assert_api_error(&response, StatusCode::BAD_REQUEST);

    let response = app.post_png("/api/analyze", Vec::new()).await;
    assert_api_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_enforces_pixel_limit() {
    let app = TestApp::with_config(AppConfig {
        limits: LimitsConfig {
            max_pixels: 63,
            ..LimitsConfig::default()
        },
        ..AppConfig::default()
    });

    let response = app
        .post_png("/api/analyze", png_bytes(&flat_image(8, 8, 10)))
        .await;
    assert_api_error(&response, StatusCode::PAYLOAD_TOO_LARGE);

    let response = app
        .post_png("/api/analyze", png_bytes(&flat_image(7, 9, 10)))
        .await;
    assert_ok(&response);
}

#[tokio::test]
async fn test_analyze_enforces_body_limit() {
    let app = TestApp::with_config(AppConfig {
        limits: LimitsConfig {
            max_image_bytes: 64,
            ..LimitsConfig::default()
        },
        ..AppConfig::default()
    });

    let response = app.post_png("/api/analyze", vec![0u8; 1024]).await;
    assert_api_error(&response, StatusCode::PAYLOAD_TOO_LARGE);
}
