//! # Generation Endpoint Tests
//!
//! Integration tests for `/generate`, covering template mode, a merged
//! remote package, the quota path, and the parse-failure fallback.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::{gemini_response, TestApp};
use httpmock::Method;
use serde_json::{json, Value};

#[tokio::test]
async fn test_generate_template_mode_returns_full_package() -> Result<()> {
    let app = TestApp::spawn().await?;

    let response = app
        .client
        .post(format!("{}/generate", app.address))
        .json(&json!({ "productName": "yoga mat" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await?;
    assert!(body["productDescription"]
        .as_str()
        .unwrap()
        .contains("yoga mat"));
    assert!(body["seoTitle"].as_str().unwrap().contains("Premium yoga mat"));
    assert!(!body["metaDescription"].as_str().unwrap().is_empty());
    assert!(!body["keywords"].as_array().unwrap().is_empty());
    assert!(!body["longTailKeywords"].as_array().unwrap().is_empty());
    assert_eq!(body["productFeatures"].as_array().unwrap().len(), 10);
    assert_eq!(body["targetAudience"].as_array().unwrap().len(), 7);
    assert!(!body["ecommerceKeywords"]["amazon"]
        .as_array()
        .unwrap()
        .is_empty());
    let combined = body["combinedKeywords"].as_array().unwrap();
    assert!(!combined.is_empty() && combined.len() <= 50);

    Ok(())
}

#[tokio::test]
async fn test_generate_rejects_blank_product() -> Result<()> {
    let app = TestApp::spawn().await?;

    let response = app
        .client
        .post(format!("{}/generate", app.address))
        .json(&json!({ "productName": "" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_generate_merges_remote_package() -> Result<()> {
    let app = TestApp::spawn_with_gemini().await?;
    let remote_package = json!({
        "seoTitle": "Remote Title For Yoga Mats",
        "keywords": ["remote keyword one", "remote keyword two"]
    });
    app.mock_server
        .mock_async(move |when, then| {
            when.method(Method::POST)
                .path("/v1beta/models/gemini-pro:generateContent");
            then.status(200)
                .json_body(gemini_response(&remote_package.to_string()));
        })
        .await;

    let response = app
        .client
        .post(format!("{}/generate", app.address))
        .json(&json!({ "productName": "yoga mat", "description": "a thick mat" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await?;
    assert_eq!(body["seoTitle"], "Remote Title For Yoga Mats");
    let keywords: Vec<&str> = body["keywords"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    // Template keywords come first, remote additions are appended.
    assert_eq!(keywords[0], "yoga mat");
    assert!(keywords.contains(&"remote keyword one"));

    Ok(())
}

#[tokio::test]
async fn test_generate_quota_exhaustion_returns_429() -> Result<()> {
    let app = TestApp::spawn_with_gemini().await?;
    app.mock_server
        .mock_async(|when, then| {
            when.method(Method::POST)
                .path("/v1beta/models/gemini-pro:generateContent");
            then.status(429).body("quota exceeded for this project");
        })
        .await;

    let response = app
        .client
        .post(format!("{}/generate", app.address))
        .json(&json!({ "productName": "yoga mat" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body: Value = response.json().await?;
    assert_eq!(body["retry_after_seconds"], 60);
    assert!(!body["error"].as_str().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_generate_unparsable_remote_falls_back_to_template() -> Result<()> {
    let app = TestApp::spawn_with_gemini().await?;
    app.mock_server
        .mock_async(|when, then| {
            when.method(Method::POST)
                .path("/v1beta/models/gemini-pro:generateContent");
            then.status(200)
                .json_body(gemini_response("I cannot produce JSON today."));
        })
        .await;

    let response = app
        .client
        .post(format!("{}/generate", app.address))
        .json(&json!({ "productName": "yoga mat" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // The template package is served unchanged.
    let body: Value = response.json().await?;
    assert!(body["seoTitle"].as_str().unwrap().contains("Premium yoga mat"));
    assert_eq!(body["keywords"][0], "yoga mat");

    Ok(())
}
