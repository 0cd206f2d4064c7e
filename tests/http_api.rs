//! HTTP surface: routing, envelope shape, error mapping.

mod common;

use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::setup;
use venue_server::api;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn health_reports_ok() {
    let app = setup().await;
    let router = api::build_app(app.state.clone());

    let response = router.oneshot(get("/api/health")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "ok");
    assert!(body["error"].is_null());
}

#[tokio::test]
async fn unknown_department_is_not_found() {
    let app = setup().await;
    let router = api::build_app(app.state.clone());

    let response = router
        .oneshot(get("/api/nope/menu"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert!(body["data"].is_null());
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn admin_table_crud_round_trip() {
    let app = setup().await;
    let router = api::build_app(app.state.clone());

    let response = router
        .clone()
        .oneshot(post(
            "/api/cs/admin/tables",
            json!({"code": "T1", "capacity": 4}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["data"]["code"], "T1");

    let response = router
        .clone()
        .oneshot(get("/api/cs/admin/tables"))
        .await
        .expect("response");
    let listed = body_json(response).await;
    assert_eq!(listed["data"].as_array().expect("array").len(), 1);

    // Duplicate code surfaces the business code with a 400
    let response = router
        .oneshot(post("/api/cs/admin/tables", json!({"code": "T1"})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "DUPLICATE_CODE");
}

#[tokio::test]
async fn occupancy_conflict_maps_to_table_occupied() {
    let app = setup().await;
    let table = app.seed_table("T1").await;
    let router = api::build_app(app.state.clone());

    let start = json!({"type": "QR", "tableId": table.id});

    let response = router
        .clone()
        .oneshot(post("/api/cs/sessions/start", start.clone()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["type"], "QR");
    assert_eq!(body["data"]["status"], "ACTIVE");

    let response = router
        .oneshot(post("/api/cs/sessions/start", start))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "TABLE_OCCUPIED");
}

#[tokio::test]
async fn order_flow_over_http_uses_camel_case() {
    let app = setup().await;
    let menu = app.seed_menu("Pasta", 6500).await;
    let router = api::build_app(app.state.clone());

    let response = router
        .clone()
        .oneshot(post(
            "/api/cs/orders",
            json!({"items": [{"menuId": menu.id, "quantity": 2}]}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let order_id = body["data"]["id"].as_i64().expect("order id");
    assert_eq!(body["data"]["totalPrice"], 13000);
    assert_eq!(body["data"]["paymentStatus"], "PENDING");
    assert_eq!(body["data"]["items"][0]["name"], "Pasta");

    // Confirming payment over HTTP trips the coupling rule
    let response = router
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/cs/admin/orders/{order_id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"paymentStatus": "CONFIRMED"}).to_string(),
                ))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "PREPARING");
    assert_eq!(body["data"]["paymentStatus"], "CONFIRMED");
}

#[tokio::test]
async fn validation_errors_are_bad_requests() {
    let app = setup().await;
    let router = api::build_app(app.state.clone());

    // Quantity below 1 fails payload validation
    let response = router
        .oneshot(post(
            "/api/cs/orders",
            json!({"items": [{"menuId": 1, "quantity": 0}]}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION");
}
