//! `PgBackend` against a real database.
//!
//! These tests require a running `PostgreSQL` reachable through
//! `STREAMLINE_DATABASE_URL` (or `DATABASE_URL`). Migrations are applied on
//! connect. Run with:
//!
//! ```bash
//! cargo test -p streamline-integration-tests --test postgres -- --ignored
//! ```

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;

use streamline_core::{ShipmentStatus, TrackingCode, UserId, Weight};
use streamline_dashboard::backend::{Backend, BackendError};
use streamline_dashboard::db::{self, PgBackend};
use streamline_dashboard::models::{NewShipment, ShipmentQuery};

async fn backend() -> PgBackend {
    let url = std::env::var("STREAMLINE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("STREAMLINE_DATABASE_URL or DATABASE_URL must be set");
    let pool = db::create_pool(&SecretString::from(url))
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("../dashboard/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    PgBackend::new(pool)
}

/// A code not yet stored, so reruns against the same database do not collide.
async fn unused_code(backend: &PgBackend) -> TrackingCode {
    loop {
        let code = TrackingCode::generate(&mut rand::rng());
        if !backend.tracking_code_exists(&code).await.unwrap() {
            return code;
        }
    }
}

async fn new_shipment(backend: &PgBackend, weight: &str) -> NewShipment {
    NewShipment {
        tracking_code: unused_code(backend).await,
        customer_id: None,
        origin: "Seattle, WA".to_owned(),
        destination: "Denver, CO".to_owned(),
        status: ShipmentStatus::Pending,
        service_type: "Standard Shipping".to_owned(),
        weight: Weight::parse(weight).unwrap(),
        estimated_delivery: None,
        notes: None,
    }
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_list_returns_newest_first() {
    let backend = backend().await;
    let older = backend
        .insert_shipment(new_shipment(&backend, "10").await)
        .await
        .unwrap();
    let newer = backend
        .insert_shipment(new_shipment(&backend, "20").await)
        .await
        .unwrap();

    let ids: Vec<_> = backend
        .list_shipments(ShipmentQuery::all())
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .filter(|id| *id == older.id || *id == newer.id)
        .collect();
    assert_eq!(ids, [newer.id, older.id]);
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_duplicate_tracking_code_conflicts() {
    let backend = backend().await;
    let first = new_shipment(&backend, "5").await;
    let second = NewShipment {
        tracking_code: first.tracking_code.clone(),
        ..new_shipment(&backend, "6").await
    };

    backend.insert_shipment(first).await.unwrap();
    let err = backend.insert_shipment(second).await.unwrap_err();
    assert!(matches!(err, BackendError::Conflict(_)), "{err:?}");
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_unknown_customer_is_an_unknown_reference() {
    let backend = backend().await;
    let new = NewShipment {
        customer_id: Some(UserId::generate()),
        ..new_shipment(&backend, "5").await
    };

    let err = backend.insert_shipment(new).await.unwrap_err();
    assert!(
        matches!(err, BackendError::UnknownReference(ref what) if what == "customer"),
        "{err:?}"
    );
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_weight_round_trips_exactly() {
    let backend = backend().await;
    for weight in ["0", "12.5", "0.01", "9999999999.99"] {
        let stored = backend
            .insert_shipment(new_shipment(&backend, weight).await)
            .await
            .unwrap();
        let read = backend.find_shipment(stored.id).await.unwrap().unwrap();
        assert_eq!(read.weight, Weight::parse(weight).unwrap(), "{weight}");
    }
}
