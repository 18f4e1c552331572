// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Every setting has a development default, so a bare `cargo run` against a
//! local MongoDB works; deployments override through the environment.

use anyhow::Result;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads an optional environment variable, falling back to a default.
///
/// Appropriate here because the service treats all of its configuration as
/// tunable with local-development fallbacks rather than hard requirements.
macro_rules! optional_env {
    // ---
    ($key:literal, $default:expr) => {
        std::env::var($key).unwrap_or_else(|_| $default.to_string())
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used. This macro is appropriate for non-critical
/// tuning parameters where fallback behavior is acceptable.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration,
/// assembled once in `main` before anything else is built.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: server::ServerConfig,
    pub mongo: mongo::MongoConfig,
}

impl AppConfig {
    /// Loads all application configuration from the environment.
    ///
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            server: server::ServerConfig::from_env()?,
            mongo: mongo::MongoConfig::from_env()?,
        })
    }
}

// ============================================================
// HTTP server configuration
// ============================================================

mod server {
    // ---
    use super::*;

    /// Listener and CORS configuration for the HTTP server.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// TCP port to bind on all interfaces. Defaults to 3000.
        pub port: u16,

        /// Origins allowed by the CORS layer, with credentials.
        /// Defaults to the two local frontend dev-server origins.
        pub allowed_origins: Vec<String>,
    }

    impl ServerConfig {
        /// Builds a [`ServerConfig`] from environment variables.
        ///
        /// `CORS_ALLOWED_ORIGINS` is a comma-separated list; entries are
        /// trimmed and empty entries dropped.
        pub fn from_env() -> Result<Self> {
            // ---
            let port = optional_env_parse!("PORT", u16, 3000);

            let raw_origins = optional_env!(
                "CORS_ALLOWED_ORIGINS",
                "http://localhost:3000,http://localhost:3001"
            );
            let allowed_origins = raw_origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_owned)
                .collect();

            Ok(Self {
                port,
                allowed_origins,
            })
        }
    }
}
pub use server::ServerConfig;

// ============================================================
// MongoDB configuration
// ============================================================

mod mongo {
    // ---
    use super::*;

    /// MongoDB connection settings.
    ///
    /// The URI and the database name are split so that the driver can
    /// address the database explicitly; together the defaults point at the
    /// same `mongodb://localhost:27017/travelmemory` a local stack uses.
    #[derive(Debug, Clone)]
    pub struct MongoConfig {
        /// Connection string, without the database path.
        pub uri: String,

        /// Database holding the `trips` collection.
        pub database: String,
    }

    impl MongoConfig {
        /// Builds a [`MongoConfig`] from environment variables.
        pub fn from_env() -> Result<Self> {
            // ---
            let uri = optional_env!("MONGODB_URI", "mongodb://localhost:27017");
            let database = optional_env!("MONGODB_DATABASE", "travelmemory");

            Ok(Self { uri, database })
        }
    }
}
pub use mongo::MongoConfig;

// ============================================================
// Tests
// ============================================================
