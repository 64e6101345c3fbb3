//! Public tracking lookup.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::Value;

use streamline_core::Role;
use streamline_integration_tests::{TestApp, express_shipment};

#[tokio::test]
async fn test_anonymous_tracking_lookup() {
    let app = TestApp::spawn().await;
    let (staff, _) = app.login_as("staff@streamlinelogistics.com", Role::Staff).await;
    let created: Value = app
        .create_shipment(&staff, &express_shipment())
        .await
        .json()
        .await
        .unwrap();
    let code = created["tracking_id"].as_str().unwrap();

    let resp = TestApp::client()
        .get(app.url(&format!("/api/track/{}", code.to_lowercase())))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let view: Value = resp.json().await.unwrap();
    assert_eq!(view["tracking_id"], code);
    assert_eq!(view["status"], "pending");
    assert_eq!(view["status_label"], "Pending");
    assert_eq!(view["destination"], "Los Angeles, CA");
    assert!(view.get("weight").is_none());
    assert!(view.get("customer_id").is_none());
    assert!(view.get("notes").is_none());
}

#[tokio::test]
async fn test_tracking_errors() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let resp = client
        .get(app.url("/api/track/SL12"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .get(app.url("/api/track/SL999999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
