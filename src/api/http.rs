//! HTTP implementations of the REST collaborators.
//!
//! Configuration is via environment variables:
//! - `POCKETLEDGER_API_URL` - Base URL (default: `http://localhost:17410/api/v1`)
//! - `POCKETLEDGER_API_TOKEN` - Bearer token for staging setups (optional;
//!   production uses cookie-based sessions)

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::{ApiError, AuthApi, BusinessApi};
use crate::models::{BusinessProfile, Identity, LoginCredentials};

/// Default URL for local development.
const DEFAULT_URL: &str = "http://localhost:17410/api/v1";

/// Shared HTTP plumbing for the REST collaborators.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ApiClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("POCKETLEDGER_API_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let token = std::env::var("POCKETLEDGER_API_TOKEN").ok();
        Self::new(base_url, token)
    }

    /// Create with explicit configuration.
    ///
    /// The cookie store is enabled so the session cookie set by login is
    /// carried on every refresh probe.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("HTTP client construction failed");
        Self {
            base_url: base_url.into(),
            token,
            client,
        }
    }

    /// Build a request with optional auth header.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Handle response, converting HTTP errors to ApiError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    /// Handle a response whose body we don't care about.
    async fn handle_empty(&self, response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    async fn status_error(status: StatusCode, response: reqwest::Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(body),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(body),
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            _ => ApiError::Server(format!("{}: {}", status, body)),
        }
    }
}

/// [`AuthApi`] over the PocketLedger REST backend.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: ApiClient,
}

impl HttpAuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn refresh(&self) -> Result<Identity, ApiError> {
        let response = self
            .client
            .request(reqwest::Method::POST, "/auth/refresh")
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<Identity, ApiError> {
        let response = self
            .client
            .request(reqwest::Method::POST, "/auth/login")
            .json(credentials)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .request(reqwest::Method::POST, "/auth/logout")
            .send()
            .await?;
        self.client.handle_empty(response).await
    }
}

/// [`BusinessApi`] over the PocketLedger REST backend.
#[derive(Debug, Clone)]
pub struct HttpBusinessApi {
    client: ApiClient,
}

impl HttpBusinessApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BusinessApi for HttpBusinessApi {
    async fn get(&self) -> Result<Option<BusinessProfile>, ApiError> {
        let response = self
            .client
            .request(reqwest::Method::GET, "/business")
            .send()
            .await?;
        match self.client.handle_response(response).await {
            Ok(profile) => Ok(Some(profile)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
