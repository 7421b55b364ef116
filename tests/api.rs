mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use kbqa_nlu::{api, Extractor};
use tower::ServiceExt;

fn app() -> axum::Router {
    let extractor = Extractor::new(common::context(common::vocabulary())).unwrap();
    api::router(Arc::new(extractor))
}

#[tokio::test]
async fn extract_endpoint_returns_flat_result() {
    let request = Request::builder()
        .method("POST")
        .uri("/extract")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"question":"感冒有什么症状"}"#))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "Disease": ["感冒"], "intentions": ["query_symptom"] })
    );
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
