//! Authorization core for the Trello web API.
//!
//! # Overview
//! Sequences the three-step OAuth1 dance against a caller-supplied server
//! implementation and builds authorization-page URLs. Also parses the
//! nested validation-error payloads the API returns for rejected writes
//! into a traversable tree.
//!
//! # Design
//! - `AuthorizationFlow` owns the dance state explicitly; nothing is kept
//!   in ambient storage. Callers persist the serialized flow between the
//!   two HTTP requests of the dance.
//! - Signing and transport are delegated through the `OAuth1Server` trait;
//!   the core performs no network IO of its own.
//! - `ValidationErrorCollection` mirrors the payload tree instead of
//!   flattening it, so callers can address errors by key and index.
//!
//! # Example
//! ```
//! use trello_core::{authorization_url, Config, Scope};
//!
//! let config = Config::new("app-key", "app-secret");
//! let url = authorization_url(&config, Scope::Read, Some("30")).unwrap();
//! assert!(url.starts_with("https://trello.com/1/authorize?"));
//! ```

pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod validation;

pub use auth::{authorization_url, parse_expiration, AuthorizationFlow, OAuth1Server, Scope};
pub use config::Config;
pub use credentials::{TemporaryCredentials, TokenCredentials};
pub use error::Error;
pub use validation::{ValidationError, ValidationErrorCollection};
