//! Collaborators the session core depends on: the auth and business REST
//! APIs and the server-state cache.
//!
//! The guards and the logout cascade only ever see the traits here, so tests
//! inject fakes and the host wires the HTTP implementations from
//! [`ApiClient::from_env`].

mod cache;
mod http;

pub use cache::{MemoryCache, QueryCache};
pub use http::{ApiClient, HttpAuthApi, HttpBusinessApi};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{BusinessProfile, Identity, LoginCredentials};

/// Errors surfaced by the REST collaborators.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: session expired or credentials rejected")]
    Unauthorized,

    #[error("Server error: {0}")]
    Server(String),
}

/// The authentication endpoints the session core drives.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange/renew the session server-side. This is the validation probe:
    /// success proves the locally-flagged session is still live.
    async fn refresh(&self) -> Result<Identity, ApiError>;

    async fn login(&self, credentials: &LoginCredentials) -> Result<Identity, ApiError>;

    /// Invalidate the server-side session. Best-effort: callers must not
    /// block local logout on it.
    async fn logout(&self) -> Result<(), ApiError>;
}

/// Read access to the signed-in user's business record.
#[async_trait]
pub trait BusinessApi: Send + Sync {
    /// The user's business profile, or `None` if onboarding never completed.
    async fn get(&self) -> Result<Option<BusinessProfile>, ApiError>;
}
