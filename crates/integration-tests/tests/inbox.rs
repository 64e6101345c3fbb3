//! Contact form, staff inbox and dashboard summary.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use streamline_core::Role;
use streamline_integration_tests::{TestApp, express_shipment};

fn contact_form() -> Value {
    json!({
        "name": "Dana Shipper",
        "email": "dana@example.com",
        "company": "Acme Freight",
        "service": "Warehousing",
        "message": "Quote for 20 pallets, Chicago to Dallas.",
    })
}

async fn submit(app: &TestApp, body: &Value) -> reqwest::Response {
    TestApp::client()
        .post(app.url("/api/contact"))
        .json(body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_public_contact_submission() {
    let app = TestApp::spawn().await;

    let resp = submit(&app, &contact_form()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let receipt: Value = resp.json().await.unwrap();
    assert_eq!(receipt["status"], "new");

    for field in ["name", "email", "message"] {
        let mut body = contact_form();
        body[field] = json!("");
        assert_eq!(
            submit(&app, &body).await.status(),
            StatusCode::BAD_REQUEST,
            "{field}"
        );
    }
}

#[tokio::test]
async fn test_customer_inbox_is_forbidden_regardless_of_data() {
    let app = TestApp::spawn().await;
    let (customer, _) = app.login_as("buyer@example.com", Role::Customer).await;

    let resp = customer.get(app.url("/api/messages")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    submit(&app, &contact_form()).await;
    let resp = customer.get(app.url("/api/messages")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_staff_reads_and_marks_messages() {
    let app = TestApp::spawn().await;
    let (staff, _) = app.login_as("staff@streamlinelogistics.com", Role::Staff).await;
    let (customer, _) = app.login_as("buyer@example.com", Role::Customer).await;

    submit(&app, &contact_form()).await;
    let mut second = contact_form();
    second["name"] = json!("Lee Later");
    submit(&app, &second).await;

    let messages: Vec<Value> = staff
        .get(app.url("/api/messages"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["name"], "Lee Later");
    assert_eq!(messages[1]["name"], "Dana Shipper");

    let read_url = app.url(&format!(
        "/api/messages/{}/read",
        messages[0]["id"].as_str().unwrap()
    ));
    let resp = customer.post(&read_url).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = staff.post(&read_url).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let read: Value = resp.json().await.unwrap();
    assert_eq!(read["status"], "read");
}

#[tokio::test]
async fn test_dashboard_summary_by_role() {
    let app = TestApp::spawn().await;
    let (admin, _) = app.login_as("admin@streamlinelogistics.com", Role::Admin).await;
    let (customer, _) = app.login_as("buyer@example.com", Role::Customer).await;

    let created: Value = app
        .create_shipment(&admin, &express_shipment())
        .await
        .json()
        .await
        .unwrap();
    app.create_shipment(&admin, &express_shipment()).await;
    admin
        .post(app.url(&format!(
            "/api/shipments/{}/status",
            created["id"].as_str().unwrap()
        )))
        .json(&json!({ "status": "in_transit" }))
        .send()
        .await
        .unwrap();
    submit(&app, &contact_form()).await;

    let summary: Value = admin
        .get(app.url("/api/dashboard"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary["title"], "Admin Dashboard");
    assert_eq!(summary["shipments"]["total"], 2);
    assert_eq!(summary["shipments"]["pending"], 1);
    assert_eq!(summary["shipments"]["in_transit"], 1);
    assert_eq!(summary["messages"]["total"], 1);
    assert_eq!(summary["messages"]["unread"], 1);

    let summary: Value = customer
        .get(app.url("/api/dashboard"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary["title"], "My Dashboard");
    assert_eq!(summary["shipments"]["total"], 2);
    assert!(summary.get("messages").is_none());
}
