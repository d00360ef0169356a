//! Configuration provider for the Trello authorization endpoints.
//!
//! # Design
//! Plain data, no globals. A `Config` value is handed to whatever needs
//! one, which keeps the URL builder a pure function and the tests free of
//! ambient state. `from_env` covers the common deployment case; everything
//! except the key and secret has a default.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default authorization host.
pub const DEFAULT_BASE_URL: &str = "https://trello.com";

/// Default API version path segment.
pub const DEFAULT_VERSION_PATH: &str = "/1";

/// Application-level settings consumed by the authorization helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application key (OAuth1 consumer identifier).
    pub key: String,
    /// Application secret (OAuth1 consumer secret).
    pub secret: String,
    /// Name shown on the authorization page; left out of the query string
    /// when unset.
    pub application_name: Option<String>,
    /// Callback URL the server redirects the resource owner back to.
    pub callback_url: Option<String>,
    /// API version path segment, including the leading slash, e.g. `/1`.
    pub version_path: String,
    /// Authorization host; overridable for tests.
    pub base_url: String,
}

impl Config {
    /// Create a config with the given key and secret and default endpoints.
    pub fn new(key: &str, secret: &str) -> Self {
        Self {
            key: key.to_string(),
            secret: secret.to_string(),
            application_name: None,
            callback_url: None,
            version_path: DEFAULT_VERSION_PATH.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read configuration from `TRELLO_*` environment variables.
    ///
    /// `TRELLO_KEY` and `TRELLO_SECRET` are required; `TRELLO_APP_NAME`,
    /// `TRELLO_CALLBACK_URL`, `TRELLO_VERSION_PATH` and `TRELLO_BASE_URL`
    /// fall back to the defaults when unset or empty.
    pub fn from_env() -> Result<Self, Error> {
        let key = require_env("TRELLO_KEY")?;
        let secret = require_env("TRELLO_SECRET")?;

        let mut config = Self::new(&key, &secret);
        config.application_name = optional_env("TRELLO_APP_NAME");
        config.callback_url = optional_env("TRELLO_CALLBACK_URL");
        if let Some(path) = optional_env("TRELLO_VERSION_PATH") {
            config.version_path = path;
        }
        if let Some(base) = optional_env("TRELLO_BASE_URL") {
            config.base_url = base.trim_end_matches('/').to_string();
        }
        Ok(config)
    }
}

fn require_env(name: &str) -> Result<String, Error> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MissingEnv(name.to_string())),
    }
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
