//! Connection settings for the inventory API.
//!
//! # Design
//! `ClientConfig` is validated once when it is built: the token must be
//! non-empty and the base URL must parse as http or https. Clients then hold
//! it immutably. `from_env` reads `INVENTORY_API_BASE_URL` and
//! `INVENTORY_API_TOKEN`, loading a `.env` file first if one exists. The
//! `Debug` output redacts the token so configs can be logged.

use std::env;
use std::fmt;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://web.zaico.co.jp";

/// Base host and bearer token, fixed for the lifetime of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    token: String,
}

impl ClientConfig {
    pub fn new(base_url: &str, token: &str) -> Result<Self, ConfigError> {
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        let base_url = base_url.trim_end_matches('/');
        let parsed = reqwest::Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        Ok(Self {
            base_url: base_url.to_string(),
            token: token.to_string(),
        })
    }

    /// Reads `INVENTORY_API_BASE_URL` and `INVENTORY_API_TOKEN`, loading a
    /// `.env` file first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_url =
            env::var("INVENTORY_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let token = env::var("INVENTORY_API_TOKEN").map_err(|_| ConfigError::MissingToken)?;
        Self::new(&base_url, &token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
