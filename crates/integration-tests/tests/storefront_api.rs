//! Storefront API tests.
//!
//! These tests require a running, migrated and seeded server.

use reqwest::StatusCode;
use serde_json::json;

use royal_trust_integration_tests::{base_url, client, json_body};

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_health() {
    let resp = client()
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to get health");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_settings_are_created_on_first_read() {
    let resp = client()
        .get(format!("{}/api/frontend/settings", base_url()))
        .send()
        .await
        .expect("Failed to get settings");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert!(body["deliveryChargeInsideDhaka"].is_number());
    assert!(body["whatsappNumber"].is_string());
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_products_are_active_and_newest_first() {
    let resp = client()
        .get(format!("{}/api/frontend/products", base_url()))
        .send()
        .await
        .expect("Failed to list products");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    let products = body.as_array().expect("products array");
    assert!(products.iter().all(|p| p["isActive"] == true));

    let dates: Vec<&str> = products
        .iter()
        .filter_map(|p| p["createdAt"].as_str())
        .collect();
    assert!(dates.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_unknown_product_is_404() {
    let resp = client()
        .get(format!(
            "{}/api/frontend/products/{}",
            base_url(),
            uuid::Uuid::new_v4()
        ))
        .send()
        .await
        .expect("Failed to get product");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_place_order_inside_dhaka() {
    let resp = client()
        .post(format!("{}/api/frontend/order", base_url()))
        .json(&json!({
            "customerName": "Integration Test",
            "phone": "01700000000",
            "address": "House 1, Road 2, Dhanmondi, Dhaka",
            "productName": "Test Panjabi",
            "color": "White",
            "size": "L",
            "quantity": 1,
            "totalPrice": 1450,
        }))
        .send()
        .await
        .expect("Failed to place order");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["success"], true);

    let order_id = body["orderId"].as_str().expect("orderId");
    assert_eq!(order_id.len(), 12);
    assert!(order_id.starts_with("RT"));
    assert!(order_id[2..].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(body["discount"], 0.0);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_order_with_unknown_coupon_is_rejected() {
    let resp = client()
        .post(format!("{}/api/frontend/order", base_url()))
        .json(&json!({
            "customerName": "Integration Test",
            "phone": "01700000000",
            "address": "Sylhet",
            "productName": "Test Panjabi",
            "color": "White",
            "size": "L",
            "totalPrice": 1450,
            "couponCode": "NO-SUCH-COUPON",
        }))
        .send()
        .await
        .expect("Failed to place order");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "Coupon not found");
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_review_is_hidden_until_approved() {
    let marker = format!("integration {}", uuid::Uuid::new_v4());
    let resp = client()
        .post(format!("{}/api/frontend/review", base_url()))
        .json(&json!({
            "name": "Integration Test",
            "location": "Dhaka",
            "rating": 5,
            "text": marker,
        }))
        .send()
        .await
        .expect("Failed to submit review");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client()
        .get(format!("{}/api/frontend/reviews", base_url()))
        .send()
        .await
        .expect("Failed to list reviews");
    let body = json_body(resp).await;
    let reviews = body.as_array().expect("reviews array");
    assert!(reviews.len() <= 10);
    assert!(reviews.iter().all(|r| r["text"] != marker.as_str()));
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_review_rating_out_of_range() {
    let resp = client()
        .post(format!("{}/api/frontend/review", base_url()))
        .json(&json!({
            "name": "Integration Test",
            "location": "Dhaka",
            "rating": 6,
            "text": "too good",
        }))
        .send()
        .await
        .expect("Failed to submit review");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
