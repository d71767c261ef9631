//! Integration tests for REST API endpoints
//!
//! These tests build the real router around a CanvaApp backed by
//! MockTransport and drive it with tower's `oneshot`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use canva_client::{ApiResponse, CanvaApp, ClientConfig, MockTransport};
use canva_server::api::create_router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Helper to create the router and keep a handle on the transport
fn create_test_router(transport: Arc<MockTransport>) -> Router {
    let app = CanvaApp::with_transport(ClientConfig::default(), transport)
        .expect("Failed to build app");
    create_router(Arc::new(app))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let router = create_test_router(Arc::new(MockTransport::new()));
    let (status, body) = send(router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["tools"], 32);
}

#[tokio::test]
async fn test_list_tools() {
    let router = create_test_router(Arc::new(MockTransport::new()));
    let (status, body) = send(router, get("/v1/tools")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 32);

    let tools = body["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 32);
    assert_eq!(tools[0]["name"], "get_app_jwks");
    assert_eq!(tools[0]["method"], "GET");
    assert_eq!(tools[0]["path"], "/v1/apps/{appId}/jwks");
}

#[tokio::test]
async fn test_get_single_tool() {
    let router = create_test_router(Arc::new(MockTransport::new()));
    let (status, body) = send(router, get("/v1/tools/create_folder")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["method"], "POST");
    assert_eq!(body["parameters"]["body"], json!(["name", "parent_folder_id"]));
}

#[tokio::test]
async fn test_get_unknown_tool() {
    let router = create_test_router(Arc::new(MockTransport::new()));
    let (status, body) = send(router, get("/v1/tools/v1_designs1")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_call_tool_returns_canva_payload() {
    let payload = json!({"asset": {"id": "abc123", "name": "logo.png"}});
    let transport = Arc::new(MockTransport::with_json(200, payload.clone()));
    let router = create_test_router(transport.clone());

    let (status, body) = send(
        router,
        post_json("/v1/tools/get_asset", json!({"assetId": "abc123"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tool"], "get_asset");
    assert_eq!(body["result"], payload);

    let request = transport.last_request().await.unwrap();
    assert_eq!(request.path, "/v1/assets/abc123");
}

#[tokio::test]
async fn test_call_tool_without_body() {
    let transport = Arc::new(MockTransport::with_json(200, json!({"team_user": {}})));
    let router = create_test_router(transport.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/v1/tools/get_current_user")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(transport.call_count().await, 1);
}

#[tokio::test]
async fn test_call_tool_missing_parameter() {
    let transport = Arc::new(MockTransport::new());
    let router = create_test_router(transport.clone());

    let (status, body) = send(router, post_json("/v1/tools/get_folder", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("folderId"));
    assert_eq!(transport.call_count().await, 0);
}

#[tokio::test]
async fn test_call_tool_upstream_not_found() {
    let transport = Arc::new(MockTransport::new());
    transport
        .push_response(ApiResponse::json(404, &json!({"code": "design_not_found"})))
        .await;
    let router = create_test_router(transport);

    let (status, body) = send(
        router,
        post_json("/v1/tools/get_design", json!({"designId": "D404"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["upstream_status"], 404);
    assert_eq!(body["upstream_body"]["code"], "design_not_found");
}

#[tokio::test]
async fn test_call_unknown_tool() {
    let transport = Arc::new(MockTransport::new());
    let router = create_test_router(transport.clone());

    let (status, _) = send(router, post_json("/v1/tools/not_a_tool", json!({}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(transport.call_count().await, 0);
}

#[tokio::test]
async fn test_call_tool_malformed_json() {
    let router = create_test_router(Arc::new(MockTransport::new()));

    let request = Request::builder()
        .method("POST")
        .uri("/v1/tools/get_asset")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("JSON"));
}

#[tokio::test]
async fn test_call_tool_non_object_arguments() {
    let router = create_test_router(Arc::new(MockTransport::new()));
    let (status, _) = send(router, post_json("/v1/tools/get_asset", json!(["abc"]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_call_tool_strips_null_body_fields() {
    let transport = Arc::new(MockTransport::new());
    let router = create_test_router(transport.clone());

    let (status, _) = send(
        router,
        post_json(
            "/v1/tools/create_folder",
            json!({"name": "Campaign", "parent_folder_id": null}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let request = transport.last_request().await.unwrap();
    assert_eq!(request.body, Some(json!({"name": "Campaign"})));
}
