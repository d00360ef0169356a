//! Three-step OAuth1 authorization against the Trello web API.
//!
//! # Design
//! - Signing and transport live behind [`OAuth1Server`]; this module only
//!   sequences the dance and owns no network code.
//! - Flow state is explicit. [`AuthorizationFlow`] carries the pending
//!   temporary credentials between the two HTTP requests of the dance and
//!   serializes with serde so a web app can park it in its session store.
//! - [`authorization_url`] is a pure function of [`Config`]; it performs no
//!   network call.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::credentials::{TemporaryCredentials, TokenCredentials};
use crate::error::Error;

/// Delegated OAuth1 server operations, one per step of the dance.
///
/// Implementations own the network side of the dance, request signing
/// included. Any failure they report comes back as [`Error::Server`].
pub trait OAuth1Server {
    /// Request a fresh pair of temporary credentials.
    fn temporary_credentials(&self) -> Result<TemporaryCredentials, Error>;

    /// The URL the resource owner must visit to approve the request.
    fn authorize_url(&self, temporary: &TemporaryCredentials) -> String;

    /// Exchange approved temporary credentials and the returned verifier for
    /// long-lived token credentials.
    fn token_credentials(
        &self,
        temporary: &TemporaryCredentials,
        oauth_token: &str,
        oauth_verifier: &str,
    ) -> Result<TokenCredentials, Error>;
}

/// Permission scope requested on the authorization page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Read,
    ReadWrite,
    ReadWriteAccount,
}

impl Scope {
    /// The comma-separated form Trello expects in the `scope` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Read => "read",
            Scope::ReadWrite => "read,write",
            Scope::ReadWriteAccount => "read,write,account",
        }
    }
}

/// State of one resource owner's authorization dance.
///
/// Web callers serialize the flow into their session store after
/// [`authorize`](Self::authorize) and restore it when the callback request
/// arrives, under the key [`session_key`](Self::session_key).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizationFlow {
    pending: Option<TemporaryCredentials>,
}

impl AuthorizationFlow {
    /// A flow with no authorization in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespaced storage key for a serialized flow.
    pub fn session_key() -> String {
        format!("{}:temporary_credentials", std::any::type_name::<Self>())
    }

    /// Whether temporary credentials are stored and awaiting exchange.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// First and second steps: request temporary credentials, remember them
    /// as pending and return the URL to redirect the resource owner to.
    pub fn authorize<S: OAuth1Server>(&mut self, server: &S) -> Result<String, Error> {
        let temporary = server.temporary_credentials()?;
        let redirect = server.authorize_url(&temporary);
        debug!("stored temporary credentials {}", temporary.identifier);
        self.pending = Some(temporary);
        Ok(redirect)
    }

    /// Third step: exchange the pending credentials plus the verifier from
    /// the callback for token credentials.
    ///
    /// Fails with [`Error::NoPendingAuthorization`] when no dance is in
    /// progress. The pending credentials are cleared only on success, so a
    /// failed exchange may be retried.
    pub fn exchange_token<S: OAuth1Server>(
        &mut self,
        server: &S,
        oauth_token: &str,
        oauth_verifier: &str,
    ) -> Result<TokenCredentials, Error> {
        let pending = self.pending.as_ref().ok_or(Error::NoPendingAuthorization)?;
        let token = server.token_credentials(pending, oauth_token, oauth_verifier)?;
        debug!("exchanged temporary credentials for token {}", token.identifier);
        self.pending = None;
        Ok(token)
    }
}

/// Build the URL of the authorization page for token-based (non-OAuth)
/// approval.
///
/// Query parameters appear in the order `key`, `name`, `response_type`,
/// `expiration`, `scope`; `name` and `expiration` are left out when unset.
pub fn authorization_url(
    config: &Config,
    scope: Scope,
    expiration: Option<&str>,
) -> Result<String, Error> {
    let base = format!(
        "{}{}/authorize",
        config.base_url.trim_end_matches('/'),
        config.version_path
    );
    let mut url = Url::parse(&base).map_err(|e| Error::InvalidBaseUrl(e.to_string()))?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("key", &config.key);
        if let Some(name) = &config.application_name {
            query.append_pair("name", name);
        }
        query.append_pair("response_type", "token");
        if let Some(expiration) = parse_expiration(expiration) {
            query.append_pair("expiration", &expiration);
        }
        query.append_pair("scope", scope.as_str());
    }
    Ok(url.into())
}

/// Normalize an expiration value into Trello's fixed `{n}day`/`{n}days`
/// forms.
///
/// Numeric values are rounded half away from zero on their absolute value,
/// so `"1"` becomes `1day` and `"2.5"` becomes `3days`. Anything
/// non-numeric passes through unchanged for the server to interpret.
pub fn parse_expiration(expiration: Option<&str>) -> Option<String> {
    let raw = expiration?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => {
            let days = value.abs().round();
            let suffix = if days == 1.0 { "day" } else { "days" };
            Some(format!("{days}{suffix}"))
        }
        _ => Some(raw.to_string()),
    }
}
