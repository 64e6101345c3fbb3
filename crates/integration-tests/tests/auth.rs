//! Login, logout and session context.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use streamline_core::Role;
use streamline_integration_tests::{PASSWORD, TestApp};

#[tokio::test]
async fn test_login_sets_session_cookie_and_returns_context() {
    let app = TestApp::spawn().await;
    app.provision("staff@streamlinelogistics.com", "Sam Staff", Role::Staff)
        .await;

    let client = TestApp::client();
    let resp = client
        .post(app.url("/auth/login"))
        .json(&json!({ "email": "Staff@StreamlineLogistics.com", "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_owned();
    assert!(cookie.starts_with("sl_session="), "{cookie}");
    assert!(cookie.contains("HttpOnly"), "{cookie}");
    assert!(cookie.contains("SameSite=Lax"), "{cookie}");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["email"], "staff@streamlinelogistics.com");
    assert_eq!(body["role"], "staff");
    assert_eq!(body["elevated"], true);
    assert_eq!(body["display_name"], "Sam Staff");

    let me: Value = client
        .get(app.url("/api/me"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["user_id"], body["user_id"]);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.provision("admin@streamlinelogistics.com", "Admin", Role::Admin)
        .await;
    let client = TestApp::client();

    for (email, password) in [
        ("admin@streamlinelogistics.com", "not-the-password"),
        ("ghost@streamlinelogistics.com", PASSWORD),
    ] {
        let resp = client
            .post(app.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Invalid credentials");
    }

    let resp = client.get(app.url("/api/me")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::spawn().await;
    let (client, _) = app.login_as("buyer@example.com", Role::Customer).await;

    let resp = client.get(app.url("/api/me")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client.post(app.url("/auth/logout")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client.get(app.url("/api/me")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_without_profile_is_customer() {
    let app = TestApp::spawn().await;
    let hash = streamline_dashboard::services::auth::hash_password(PASSWORD).unwrap();
    app.backend
        .provision_user_without_profile(
            streamline_core::Email::parse("orphan@example.com").unwrap(),
            hash,
        )
        .await
        .unwrap();

    let client = TestApp::client();
    let resp = client
        .post(app.url("/auth/login"))
        .json(&json!({ "email": "orphan@example.com", "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["role"], "customer");
    assert_eq!(body["elevated"], false);
    assert_eq!(body["profile"], Value::Null);
    assert_eq!(body["display_name"], "orphan@example.com");
}
