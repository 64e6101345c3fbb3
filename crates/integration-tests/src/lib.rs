//! Integration test harness for the Streamline dashboard.
//!
//! Each [`TestApp`] serves the real router on an ephemeral localhost port
//! with the in-memory backend and session store, so the tests need no
//! database.
//!
//! ```bash
//! cargo test -p streamline-integration-tests
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_sessions::MemoryStore;

use streamline_core::{Email, Role};
use streamline_dashboard::backend::MemoryBackend;
use streamline_dashboard::config::DashboardConfig;
use streamline_dashboard::models::Profile;
use streamline_dashboard::routes;
use streamline_dashboard::services::auth::hash_password;
use streamline_dashboard::state::AppState;

/// Password every provisioned test account shares.
pub const PASSWORD: &str = "correct-horse-battery";

// Hashing is slow in debug builds; every account reuses one hash.
fn password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(PASSWORD).expect("Failed to hash test password"))
        .clone()
}

/// A dashboard served on `127.0.0.1:<random port>`.
pub struct TestApp {
    pub addr: SocketAddr,
    pub backend: Arc<MemoryBackend>,
}

impl TestApp {
    /// Start with default configuration.
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Start after adjusting the configuration.
    pub async fn spawn_with(configure: impl FnOnce(&mut DashboardConfig)) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let mut config = DashboardConfig::in_memory(&format!("http://{addr}"));
        configure(&mut config);

        let backend = Arc::new(MemoryBackend::new());
        let state = AppState::new(config, backend.clone());
        let app = routes::app(state, MemoryStore::default());

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self { addr, backend }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Client that keeps session cookies between requests.
    #[must_use]
    pub fn client() -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Provision an account with [`PASSWORD`].
    pub async fn provision(&self, email: &str, name: &str, role: Role) -> Profile {
        self.backend
            .provision_user(
                Email::parse(email).expect("Invalid test email"),
                password_hash(),
                name,
                role,
            )
            .await
            .expect("Failed to provision test user")
    }

    /// Provision an account and return a client logged in as it.
    pub async fn login_as(&self, email: &str, role: Role) -> (Client, Profile) {
        let profile = self.provision(email, "Test User", role).await;
        let client = Self::client();
        let resp = client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": PASSWORD }))
            .send()
            .await
            .expect("Login request failed");
        assert_eq!(resp.status(), StatusCode::OK, "login as {email}");
        (client, profile)
    }

    /// POST /api/shipments with the given fields.
    pub async fn create_shipment(&self, client: &Client, body: &Value) -> reqwest::Response {
        client
            .post(self.url("/api/shipments"))
            .json(body)
            .send()
            .await
            .expect("Create shipment request failed")
    }
}

/// The New York to Los Angeles express shipment used across tests.
#[must_use]
pub fn express_shipment() -> Value {
    json!({
        "origin": "New York, NY",
        "destination": "Los Angeles, CA",
        "service_type": "Express Freight",
        "weight": 1500,
        "estimated_delivery": "2025-01-05",
    })
}

/// Whether `s` looks like `SL` followed by six digits.
#[must_use]
pub fn is_tracking_code(s: &str) -> bool {
    s.len() == 8
        && s.starts_with("SL")
        && s.bytes().skip(2).all(|b| b.is_ascii_digit())
}
