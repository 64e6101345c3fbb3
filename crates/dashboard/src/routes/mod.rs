//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness
//! GET  /health/ready                - Backend ping
//!
//! # Auth
//! POST /auth/login                  - Email + password login
//! POST /auth/logout                 - End the session
//!
//! # Dashboard (requires session)
//! GET  /api/me                      - Session context
//! GET  /api/dashboard               - Summary counters
//! GET  /api/shipments               - Shipment list
//! POST /api/shipments               - Create shipment (staff/admin)
//! POST /api/shipments/{id}/status   - Change status (staff/admin)
//! GET  /api/messages                - Inbox (staff/admin)
//! POST /api/messages/{id}/read      - Mark message read (staff/admin)
//!
//! # Public
//! GET  /api/track/{tracking_code}   - Tracking lookup
//! POST /api/contact                 - Contact / quote form
//! ```

pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod health;
pub mod messages;
pub mod shipments;
pub mod tracking;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::SessionStore;
use tracing::Span;

use crate::middleware::{create_session_layer, request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(dashboard::me))
        .route("/dashboard", get(dashboard::summary))
        .route("/shipments", get(shipments::list).post(shipments::create))
        .route("/shipments/{id}/status", post(shipments::update_status))
        .route("/messages", get(messages::list))
        .route("/messages/{id}/read", post(messages::mark_read))
        .route("/track/{tracking_code}", get(tracking::track))
        .route("/contact", post(contact::submit))
}

/// Create all routes for the dashboard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
}

/// Assemble the application with sessions, request IDs and tracing.
///
/// Sentry layers are added by the binary, outermost.
pub fn app<S>(state: AppState, session_store: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = create_session_layer(session_store, state.config());

    routes()
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
