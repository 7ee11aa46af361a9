//! Admin API tests.
//!
//! These tests require a running server and `ADMIN_USERNAME` /
//! `ADMIN_PASSWORD` matching its configuration.

use reqwest::StatusCode;
use serde_json::json;

use royal_trust_integration_tests::{admin_client, base_url, client, json_body};

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_admin_routes_require_login() {
    let resp = client()
        .get(format!("{}/api/admin/dashboard/stats", base_url()))
        .send()
        .await
        .expect("Failed to get stats");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_login_rejects_wrong_password() {
    let resp = client()
        .post(format!("{}/api/admin/login", base_url()))
        .json(&json!({ "username": "admin", "password": "definitely-wrong" }))
        .send()
        .await
        .expect("Failed to post login");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["error"], "Invalid credentials");
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_logout_ends_session() {
    let client = admin_client().await;
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/api/admin/logout"))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/api/admin/products"))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// CRUD
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_product_lifecycle() {
    let client = admin_client().await;
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/api/admin/products"))
        .json(&json!({
            "name": "Integration Gym Tee",
            "description": "Breathable",
            "size": "M, L",
            "regularPrice": 1000,
            "offerPrice": 750,
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    let product = &body["product"];
    assert_eq!(product["offerPercentage"], 25);
    assert_eq!(product["category"], "fitness");
    let id = product["_id"].as_str().expect("product id").to_owned();

    // Partial update leaves other fields alone
    let resp = client
        .put(format!("{base_url}/api/admin/products/{id}"))
        .json(&json!({ "isActive": false }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["product"]["isActive"], false);
    assert_eq!(body["product"]["name"], "Integration Gym Tee");

    // Inactive products are hidden from the storefront
    let resp = client
        .get(format!("{base_url}/api/frontend/products/{id}"))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .delete(format!("{base_url}/api/admin/products/{id}"))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/api/admin/products/{id}"))
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_coupon_applies_to_order() {
    let client = admin_client().await;
    let base_url = base_url();
    let code = format!("IT{}", &uuid::Uuid::new_v4().simple().to_string()[..8]).to_uppercase();

    let resp = client
        .post(format!("{base_url}/api/admin/coupons"))
        .json(&json!({
            "code": code.to_lowercase(),
            "discountType": "percentage",
            "discountValue": 10,
            "minOrderAmount": 500,
            "maxUses": 1,
        }))
        .send()
        .await
        .expect("Failed to create coupon");
    assert_eq!(resp.status(), StatusCode::OK);
    let coupon_id = json_body(resp).await["coupon"]["_id"]
        .as_str()
        .expect("coupon id")
        .to_owned();

    let resp = client
        .post(format!("{base_url}/api/frontend/coupon/validate"))
        .json(&json!({ "code": code, "amount": 1000 }))
        .send()
        .await
        .expect("Failed to validate coupon");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["finalAmount"], 900.0);

    let order = json!({
        "customerName": "Integration Test",
        "phone": "01700000000",
        "address": "Chattogram",
        "productName": "Test Panjabi",
        "color": "White",
        "size": "L",
        "totalPrice": 1000,
        "couponCode": code,
    });
    let resp = client
        .post(format!("{base_url}/api/frontend/order"))
        .json(&order)
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["discount"], 100.0);
    assert_eq!(body["totalPrice"], 900.0);

    // maxUses = 1, so a second order is refused
    let resp = client
        .post(format!("{base_url}/api/frontend/order"))
        .json(&order)
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .delete(format!("{base_url}/api/admin/coupons/{coupon_id}"))
        .send()
        .await
        .expect("Failed to delete coupon");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_dashboard_and_notifications() {
    let client = admin_client().await;
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/admin/dashboard/stats"))
        .send()
        .await
        .expect("Failed to get stats");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert!(body["totalOrders"].is_number());
    assert!(body["recentOrders"].as_array().expect("recent orders").len() <= 5);

    let resp = client
        .post(format!("{base_url}/api/admin/notifications/read"))
        .json(&json!({ "type": "all" }))
        .send()
        .await
        .expect("Failed to mark notifications read");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/api/admin/notifications"))
        .send()
        .await
        .expect("Failed to get notifications");
    let body = json_body(resp).await;
    assert_eq!(body["unreadOrders"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["unreadReviews"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["unreadContacts"].as_array().map(Vec::len), Some(0));
}
