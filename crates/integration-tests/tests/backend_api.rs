//! Wire format of the mock shop endpoints over real HTTP.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};
use shopfront_integration_tests::TestContext;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .get(ctx.url("/products"))
        .header("origin", "http://widget.example")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_products_query_parameters() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .get(ctx.url("/products?q=the&category=Movies"))
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!([{"id": 2, "name": "The Matrix", "category": "Movies", "price": 12.0}])
    );
}

#[tokio::test]
async fn test_add_rejects_unknown_product() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .post(ctx.url("/cart"))
        .json(&json!({"product_id": 42, "quantity": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({"detail": "Product not found"})
    );
}

#[tokio::test]
async fn test_checkout_insufficient_quantity() {
    let ctx = TestContext::new().await;
    ctx.client
        .post(ctx.url("/cart"))
        .json(&json!({"product_id": 1, "quantity": 1}))
        .send()
        .await
        .unwrap();

    let resp = ctx
        .client
        .post(ctx.url("/checkout"))
        .json(&json!({"items": [{"product_id": 1, "quantity": 3}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({"detail": "Insufficient quantity for product 1"})
    );
}
