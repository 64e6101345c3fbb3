//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STREAMLINE_BASE_URL` - Public URL of the dashboard (`https://` enables secure cookies)
//! - `STREAMLINE_DATABASE_URL` - `PostgreSQL` connection string (postgres backend only;
//!   falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `STREAMLINE_BACKEND` - `postgres` (default) or `memory`
//! - `STREAMLINE_HOST` - Bind address (default: 127.0.0.1)
//! - `STREAMLINE_PORT` - Listen port (default: 3000)
//! - `SHIPMENT_VISIBILITY` - `shared` (default) or `owner`
//! - `STATUS_TRANSITIONS` - `unconstrained` (default) or `strict`
//! - `STREAMLINE_BOOTSTRAP_ADMIN_EMAIL` / `STREAMLINE_BOOTSTRAP_ADMIN_PASSWORD` -
//!   admin account provisioned at startup (memory backend only)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use streamline_core::{Email, TransitionPolicy};

use crate::services::ShipmentVisibility;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where shipments, profiles and messages are stored.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    Postgres {
        /// Connection URL (contains password)
        database_url: SecretString,
    },
    Memory {
        bootstrap_admin: Option<BootstrapAdmin>,
    },
}

/// Admin account created when the memory backend starts.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: Email,
    pub password: SecretString,
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub backend: BackendConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the dashboard
    pub base_url: String,
    /// List scoping for non-elevated users
    pub visibility: ShipmentVisibility,
    /// Which status changes are accepted
    pub transitions: TransitionPolicy,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    /// Emit JSON logs instead of text
    pub json_logs: bool,
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&get);

        let backend = match env.or_default("STREAMLINE_BACKEND", "postgres").as_str() {
            "postgres" => BackendConfig::Postgres {
                database_url: env.database_url("STREAMLINE_DATABASE_URL")?,
            },
            "memory" => BackendConfig::Memory {
                bootstrap_admin: env.bootstrap_admin()?,
            },
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "STREAMLINE_BACKEND".to_string(),
                    format!("expected postgres or memory, got {other:?}"),
                ));
            }
        };
        let host = env.parsed("STREAMLINE_HOST", "127.0.0.1")?;
        let port = env.parsed("STREAMLINE_PORT", "3000")?;
        let base_url = env.required("STREAMLINE_BASE_URL")?;
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STREAMLINE_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            backend,
            host,
            port,
            base_url,
            visibility: env.parsed("SHIPMENT_VISIBILITY", "shared")?,
            transitions: env.parsed("STATUS_TRANSITIONS", "unconstrained")?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            json_logs: env
                .optional("LOG_FORMAT")
                .is_some_and(|f| f.eq_ignore_ascii_case("json")),
        })
    }

    /// Memory-backed configuration with defaults, for local runs and tests.
    #[must_use]
    pub fn in_memory(base_url: &str) -> Self {
        Self {
            backend: BackendConfig::Memory {
                bootstrap_admin: None,
            },
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: base_url.to_string(),
            visibility: ShipmentVisibility::default(),
            transitions: TransitionPolicy::default(),
            sentry_dsn: None,
            sentry_environment: None,
            json_logs: false,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies get the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable; blank counts as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Get database URL with fallback to generic `DATABASE_URL`.
    fn database_url(&self, primary_key: &str) -> Result<SecretString, ConfigError> {
        self.optional(primary_key)
            .or_else(|| self.optional("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
    }

    fn bootstrap_admin(&self) -> Result<Option<BootstrapAdmin>, ConfigError> {
        const EMAIL: &str = "STREAMLINE_BOOTSTRAP_ADMIN_EMAIL";
        const PASSWORD: &str = "STREAMLINE_BOOTSTRAP_ADMIN_PASSWORD";

        let Some(raw_email) = self.optional(EMAIL) else {
            return Ok(None);
        };
        let email = Email::parse(&raw_email)
            .map_err(|e| ConfigError::InvalidEnvVar(EMAIL.to_string(), e.to_string()))?;
        let password = self.required(PASSWORD)?;

        Ok(Some(BootstrapAdmin {
            email,
            password: SecretString::from(password),
        }))
    }
}
