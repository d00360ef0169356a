//! OAuth1 credential pairs issued by the authorization server.
//!
//! # Design
//! Both pairs are opaque to this crate: the server abstraction issues them
//! and the flow passes them back unchanged. They derive the serde traits
//! because web callers park the pending pair in a session store between the
//! two HTTP requests of the dance.

use serde::{Deserialize, Serialize};

/// Short-lived credential pair used only to obtain user authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryCredentials {
    /// Public identifier, the `oauth_token` that appears on the redirect.
    pub identifier: String,
    /// Shared secret the server implementation signs requests with.
    pub secret: String,
}

/// Long-lived credential pair used for authenticated API calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCredentials {
    /// Public identifier sent along with API requests.
    pub identifier: String,
    /// Shared secret the server implementation signs requests with.
    pub secret: String,
}
