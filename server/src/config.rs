//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Ed25519 public key used to verify access tokens (PEM, base64-encoded)
    pub jwt_public_key: String,

    /// Ed25519 private key used to mint access tokens (PEM, base64-encoded).
    /// Only needed by tooling; the server itself never signs tokens.
    pub jwt_private_key: Option<String>,

    /// JWT access token expiry in seconds (default: 900 = 15 min)
    pub jwt_access_expiry: i64,

    /// JSON file replacing the built-in permission table (optional)
    pub permissions_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            jwt_public_key: env::var("JWT_PUBLIC_KEY").context("JWT_PUBLIC_KEY must be set")?,
            jwt_private_key: env::var("JWT_PRIVATE_KEY").ok(),
            jwt_access_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(900),
            permissions_file: env::var("PERMISSIONS_FILE")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Check if this configuration can mint tokens.
    #[must_use]
    pub const fn can_issue_tokens(&self) -> bool {
        self.jwt_private_key.is_some()
    }

    /// Create a config for testing with the bundled test key pair.
    #[doc(hidden)]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            jwt_public_key: crate::auth::jwt::TEST_PUBLIC_KEY.into(),
            jwt_private_key: Some(crate::auth::jwt::TEST_PRIVATE_KEY.into()),
            jwt_access_expiry: 900,
            permissions_file: None,
        }
    }
}
