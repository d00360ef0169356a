//! Error types for the Trello authorization core.
//!
//! # Design
//! `NoPendingAuthorization` gets a dedicated variant because callers must be
//! able to tell "the dance was never started (or already finished)" apart
//! from a server-side failure. Whatever the delegated OAuth1 layer reports,
//! whether a transport problem or a rejected exchange, lands in `Server`
//! with its message, since this crate treats that layer as opaque.

use std::fmt;

/// Errors returned by the authorization flow and payload parsers.
#[derive(Debug)]
pub enum Error {
    /// Token exchange was attempted with no stored temporary credentials.
    NoPendingAuthorization,

    /// A required environment variable was unset or empty.
    MissingEnv(String),

    /// The configured base URL could not be parsed while building the
    /// authorization URL.
    InvalidBaseUrl(String),

    /// The delegated OAuth1 server reported a failure.
    Server(String),

    /// A validation-error payload did not have the expected shape.
    MalformedPayload(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoPendingAuthorization => write!(f, "no pending authorization"),
            Error::MissingEnv(name) => {
                write!(f, "missing required environment variable {name}")
            }
            Error::InvalidBaseUrl(msg) => write!(f, "invalid base url: {msg}"),
            Error::Server(msg) => write!(f, "authorization server error: {msg}"),
            Error::MalformedPayload(msg) => {
                write!(f, "malformed validation payload: {msg}")
            }
        }
    }
}

impl std::error::Error for Error {}
