use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;
use server::ServerState;

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    server::router(ServerState {
        engine: Arc::new(engine),
    })
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn create_coop(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/coops",
        Some(json!({"name": "Chuồng 1"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn coop_creation_validates_name() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/coops",
        Some(json!({"name": "Chuồng 7", "location": "Khu A"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Chuồng 7");
    assert_eq!(body["chickens"], 0);
    assert_eq!(body["totalChickenCost"], 0);

    let (status, body) = send(
        &app,
        "POST",
        "/api/coops",
        Some(json!({"name": "Barn 7"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));

    let (status, _) = send(&app, "POST", "/api/coops", Some(json!({})), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_coop_name_is_rejected() {
    let app = app().await;
    create_coop(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/coops",
        Some(json!({"name": "Chuồng 1"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chicken_transaction_moves_coop_counters() {
    let app = app().await;
    let coop_id = create_coop(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/chickens",
        Some(json!({
            "coopId": coop_id,
            "type": "IN",
            "quantity": 100,
            "chickPrice": 15000,
            "breed": "Gà ri"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coop"]["chickens"], 100);
    assert_eq!(body["coop"]["totalChickenCost"], 1_500_000);
    assert_eq!(body["ok"], true);
    assert_eq!(body["tx"]["type"], "IN");

    let (status, body) = send(
        &app,
        "POST",
        "/api/chickens",
        Some(json!({
            "coopId": coop_id,
            "type": "OUT",
            "quantity": 30,
            "salePrice": 60000
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coop"]["chickens"], 70);
    assert_eq!(body["coop"]["totalRevenue"], 1_800_000);
}

#[tokio::test]
async fn over_export_returns_400() {
    let app = app().await;
    let coop_id = create_coop(&app).await;

    send(
        &app,
        "POST",
        "/api/chickens",
        Some(json!({"coopId": coop_id, "type": "IN", "quantity": 10})),
        None,
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/chickens",
        Some(json!({"coopId": coop_id, "type": "OUT", "quantity": 11})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("export"));
}

#[tokio::test]
async fn transaction_payload_is_validated() {
    let app = app().await;
    let coop_id = create_coop(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/chickens",
        Some(json!({"type": "IN", "quantity": 5})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("coopId"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/chickens",
        Some(json!({"coopId": coop_id, "type": "SIDEWAYS", "quantity": 5})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/chickens",
        Some(json!({"coopId": coop_id, "type": "IN", "quantity": 0})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/chickens",
        Some(json!({"coopId": "missing", "type": "IN", "quantity": 5})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn transactions_can_be_listed_per_coop() {
    let app = app().await;
    let coop_a = create_coop(&app).await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/coops",
        Some(json!({"name": "Chuồng 2"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let coop_b = body["id"].as_str().unwrap().to_string();

    for coop in [&coop_a, &coop_a, &coop_b] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/chickens",
            Some(json!({"coopId": coop, "type": "IN", "quantity": 5})),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/chickens/coop/{coop_a}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(&app, "GET", "/api/chickens?limit=2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn root_answers_liveness_probe() {
    let app = app().await;
    let (status, _) = send(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn deleting_a_transaction_reverses_the_coop() {
    let app = app().await;
    let coop_id = create_coop(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/chickens",
        Some(json!({"coopId": coop_id, "type": "IN", "quantity": 50, "chickPrice": 10000})),
        None,
    )
    .await;
    let tx_id = body["tx"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "DELETE", &format!("/api/chickens/{tx_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coop"]["chickens"], 0);
    assert_eq!(body["coop"]["totalChickenCost"], 0);

    let (status, _) = send(&app, "DELETE", &format!("/api/chickens/{tx_id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn feeds_attribute_cost_to_the_coop() {
    let app = app().await;
    let coop_id = create_coop(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/feed",
        Some(json!({
            "name": "Cám tổng hợp",
            "type": "compound",
            "coopId": coop_id,
            "totalCost": 200000,
            "ingredients": [
                {"name": "Ngô", "quantity": 50.0, "unitPrice": 4000, "totalPrice": 200000}
            ]
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let feed_id = body["id"].as_str().unwrap().to_string();

    let (_, coop) = send(&app, "GET", &format!("/api/coops/{coop_id}"), None, None).await;
    assert_eq!(coop["totalFeedCost"], 200_000);

    let (status, _) = send(&app, "DELETE", &format!("/api/feed/{feed_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, coop) = send(&app, "GET", &format!("/api/coops/{coop_id}"), None, None).await;
    assert_eq!(coop["totalFeedCost"], 0);
}

#[tokio::test]
async fn recompute_endpoint_returns_fresh_counters() {
    let app = app().await;
    let coop_id = create_coop(&app).await;

    send(
        &app,
        "POST",
        "/api/chickens",
        Some(json!({"coopId": coop_id, "type": "IN", "quantity": 40, "chickPrice": 12000})),
        None,
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/coops/{coop_id}/recompute"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chickens"], 40);
    assert_eq!(body["totalChickenCost"], 480_000);
}

#[tokio::test]
async fn order_lifecycle_over_http() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customerName": "Nguyễn Văn A",
            "customerPhone": "0901234567",
            "customerAddress": "12 Lê Lợi, Huế",
            "items": [
                {"productName": "Trứng gà ta", "quantity": 10, "price": 4000, "subtotal": 40000}
            ],
            "totalAmount": 40000,
            "paymentMethod": "cash"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderNumber"], "ORD000001");
    assert_eq!(body["status"], "pending");
    let order_id = body["id"].as_str().unwrap().to_string();

    // Skipping straight to delivered violates the state machine.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}"),
        Some(json!({"status": "delivered"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for status_name in ["confirmed", "shipping", "delivered"] {
        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/orders/{order_id}"),
            Some(json!({"status": status_name})),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], status_name);
    }
}

#[tokio::test]
async fn unknown_resources_return_404() {
    let app = app().await;

    for uri in [
        "/api/coops/nope",
        "/api/chickens/nope",
        "/api/feed/nope",
        "/api/products/nope",
        "/api/orders/nope",
        "/api/stores/nope",
    ] {
        let (status, _) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {uri}");
    }
}

#[tokio::test]
async fn account_routes_require_a_valid_token() {
    let app = app().await;

    let (status, _) = send(&app, "GET", "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/users/me", None, Some("bogus")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/register",
        Some(json!({
            "email": "farmer@example.com",
            "password": "secret123",
            "fullName": "Trần Thị B"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "farmer@example.com");

    let (status, body) = send(
        &app,
        "PUT",
        "/api/users/profile",
        Some(json!({"fullName": "Trần Thị C"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fullName"], "Trần Thị C");
}

#[tokio::test]
async fn login_rejects_bad_credentials_with_401() {
    let app = app().await;

    send(
        &app,
        "POST",
        "/api/users/register",
        Some(json!({
            "email": "farmer@example.com",
            "password": "secret123",
            "fullName": "Trần Thị B"
        })),
        None,
    )
    .await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/users/login",
        Some(json!({"email": "farmer@example.com", "password": "wrong"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/login",
        Some(json!({"email": "farmer@example.com", "password": "secret123"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn products_and_stores_crud_over_http() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({"name": "Trứng gà ta", "category": "trung", "price": 4000})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let product_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["inStock"], true);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/products/{product_id}"),
        Some(json!({"price": 4500, "inStock": false})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 4500);
    assert_eq!(body["inStock"], false);

    let (status, body) = send(
        &app,
        "GET",
        "/api/products?category=trung",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "POST",
        "/api/stores",
        Some(json!({
            "name": "Cửa hàng Huế",
            "address": "5 Trần Hưng Đạo, Huế",
            "lat": 16.4667,
            "lng": 107.5792,
            "phone": "0234567890"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["openingHours"], "08:00 - 22:00");
    let store_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "DELETE", &format!("/api/stores/{store_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &format!("/api/stores/{store_id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ratings_outside_the_scale_are_rejected() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({"name": "Trứng gà ta", "price": 4000, "rating": 6.0})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("rating"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/stores",
        Some(json!({
            "name": "Cửa hàng Huế",
            "address": "5 Trần Hưng Đạo, Huế",
            "lat": 16.4667,
            "lng": 107.5792,
            "rating": -1.0
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("rating"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({"name": "Trứng gà ta", "price": 4000, "rating": 4.5})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 4.5);
}
