//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::Backend;
use crate::config::DashboardConfig;
use crate::services::{AuthService, IdentityService, Inbox, ShipmentRegistry};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Services are built per call
/// and borrow the backend for the duration of a request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    backend: Arc<dyn Backend>,
}

impl AppState {
    #[must_use]
    pub fn new(config: DashboardConfig, backend: Arc<dyn Backend>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, backend }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn backend(&self) -> &dyn Backend {
        self.inner.backend.as_ref()
    }

    #[must_use]
    pub fn identity(&self) -> IdentityService<'_> {
        IdentityService::new(self.backend())
    }

    /// Shipment registry using the configured policy and visibility.
    #[must_use]
    pub fn registry(&self) -> ShipmentRegistry<'_> {
        let config = self.config();
        ShipmentRegistry::new(self.backend(), config.transitions, config.visibility)
    }

    #[must_use]
    pub fn inbox(&self) -> Inbox<'_> {
        Inbox::new(self.backend())
    }

    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.backend())
    }
}
