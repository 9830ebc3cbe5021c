//! # API Client
//!
//! Main HTTP client for backend API communication.
//!
//! Every call goes through [`ApiClient::request`]: default JSON headers,
//! cookies kept across calls, one attempt, and a response translated into
//! either the caller's type or an [`ApiError`].

use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    CreateUserRequest, Envelope, ErrorResponse, LoginRequest, MessageResponse, User, VerifyEmailRequest, WalletBinding,
};

use crate::core::config::ClientConfig;
use crate::core::error::{ApiError, ApiResult};
use crate::core::service::AuthService;

/// HTTP client for the marketplace backend.
///
/// Cheap to clone; clones share the connection pool and cookie store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl ApiClient {
    /// Create a client for the configured backend.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let mut builder = Client::builder()
            .default_headers(default_headers())
            .cookie_store(true);

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.request_timeout.map(|t| t.as_secs()).unwrap_or_default(),
        })
    }

    /// Create a client for `base_url` with otherwise default settings.
    pub fn with_base_url(base_url: &str) -> ApiResult<Self> {
        Self::new(&ClientConfig {
            api_base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    /// Get the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request and decode the JSON response.
    ///
    /// `body` is only sent for POST, PUT and PATCH. An empty success body
    /// decodes as JSON `null`, so `T = ()` or `Option<_>` suit endpoints that
    /// return nothing.
    #[tracing::instrument(skip_all, fields(method = %method, path = %path))]
    pub async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let start = Instant::now();

        let carries_body = method == Method::POST || method == Method::PUT || method == Method::PATCH;
        let mut request = self.client.request(method, &url);
        if let (true, Some(body)) = (carries_body, body) {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                tracing::error!(error = %e, url = %url, "Request could not be built");
                ApiError::InvalidRequest(e.to_string())
            } else if e.is_timeout() {
                tracing::error!(error = %e, url = %url, "Request timed out");
                ApiError::Timeout { url: url.clone(), secs: self.timeout_secs }
            } else {
                // No status means the server was never reached.
                tracing::error!(error = %e, url = %url, "Backend unreachable");
                ApiError::Connectivity { url: url.clone() }
            }
        })?;

        let status = response.status();
        let duration = start.elapsed();

        if !status.is_success() {
            let err = server_error(response).await;
            tracing::warn!(
                status = status.as_u16(),
                error = %err,
                duration_ms = duration.as_millis(),
                "Request failed"
            );
            return Err(err);
        }

        let text = response.text().await.map_err(|e| {
            tracing::error!(error = %e, url = %url, "Response body read error");
            if e.is_timeout() {
                ApiError::Timeout { url: url.clone(), secs: self.timeout_secs }
            } else {
                ApiError::Connectivity { url: url.clone() }
            }
        })?;

        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        let value = serde_json::from_str::<T>(text).map_err(|e| {
            tracing::error!(error = %e, url = %url, "Response parse error");
            ApiError::Decode(e.to_string())
        })?;

        tracing::debug!(
            status = status.as_u16(),
            duration_ms = duration.as_millis(),
            "Request succeeded"
        );
        Ok(value)
    }

    /// Like [`request`](Self::request), for endpoints that may wrap the
    /// payload as `{ "user": ... }`.
    pub async fn request_enveloped<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request::<B, Envelope<T>>(method, path, body)
            .await
            .map(Envelope::into_inner)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request::<(), T>(Method::DELETE, path, None).await
    }
}

// Implement AuthService trait for ApiClient
#[async_trait::async_trait]
impl AuthService for ApiClient {
    async fn create_user(&self, request: CreateUserRequest) -> ApiResult<User> {
        super::auth::create_user(self, &request).await
    }

    async fn login(&self, request: LoginRequest) -> ApiResult<User> {
        super::auth::login(self, &request).await
    }

    async fn login_with_wallet(&self, wallet: WalletBinding) -> ApiResult<User> {
        super::auth::login_with_wallet(self, &wallet).await
    }

    async fn register(&self, request: CreateUserRequest) -> ApiResult<MessageResponse> {
        super::auth::register(self, &request).await
    }

    async fn verify_email(&self, request: VerifyEmailRequest) -> ApiResult<MessageResponse> {
        super::auth::verify_email(self, &request).await
    }

    async fn complete_registration(&self, request: CreateUserRequest) -> ApiResult<User> {
        super::auth::complete_registration(self, &request).await
    }

    async fn resend_verification_code(&self, email: String) -> ApiResult<MessageResponse> {
        super::auth::resend_verification_code(self, &email).await
    }
}

/// `Content-Type` and `Accept` sent with every request.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Build [`ApiError::Server`] from a non-success response.
async fn server_error(response: Response) -> ApiError {
    let status = response.status();
    let fallback = format!(
        "Error {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    );

    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(fallback);

    ApiError::Server {
        status: status.as_u16(),
        message,
    }
}
