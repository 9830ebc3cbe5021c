//! # Authentication Endpoints
//!
//! User creation, login (email or wallet) and the email-verified
//! registration flow. Every call that yields a user unwraps the response
//! envelope before returning.

use reqwest::Method;
use shared::{
    CreateUserRequest, LoginRequest, MessageResponse, ResendVerificationRequest, User, VerifyEmailRequest,
    WalletBinding,
};

use super::client::ApiClient;
use crate::core::error::ApiResult;

/// Create a user directly (wallet-based sign-up).
#[tracing::instrument(skip(client, request), fields(username = ?request.username))]
pub async fn create_user(client: &ApiClient, request: &CreateUserRequest) -> ApiResult<User> {
    tracing::info!("Creating user");
    client.request_enveloped(Method::POST, "/users", Some(request)).await
}

/// Login with email and password.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn login(client: &ApiClient, request: &LoginRequest) -> ApiResult<User> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let user = client
        .request_enveloped::<_, User>(Method::POST, "/users/login", Some(request))
        .await?;

    tracing::info!(duration_ms = start.elapsed().as_millis(), user_id = %user.id, "Login successful");
    Ok(user)
}

/// Login with a wallet address.
#[tracing::instrument(skip(client, wallet), fields(wallet_type = %wallet.wallet_type))]
pub async fn login_with_wallet(client: &ApiClient, wallet: &WalletBinding) -> ApiResult<User> {
    tracing::info!("Attempting wallet login");
    client.request_enveloped(Method::POST, "/users/login/wallet", Some(wallet)).await
}

/// Start registration; the backend emails a verification code.
#[tracing::instrument(skip(client, request), fields(email = ?request.email))]
pub async fn register(client: &ApiClient, request: &CreateUserRequest) -> ApiResult<MessageResponse> {
    client.post("/users/register", request).await
}

/// Verify the emailed code.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn verify_email(client: &ApiClient, request: &VerifyEmailRequest) -> ApiResult<MessageResponse> {
    client.post("/users/verify-email", request).await
}

/// Finish registration after the email was verified.
#[tracing::instrument(skip(client, request), fields(email = ?request.email))]
pub async fn complete_registration(client: &ApiClient, request: &CreateUserRequest) -> ApiResult<User> {
    client
        .request_enveloped(Method::POST, "/users/complete-registration", Some(request))
        .await
}

/// Ask for a fresh verification code.
#[tracing::instrument(skip(client))]
pub async fn resend_verification_code(client: &ApiClient, email: &str) -> ApiResult<MessageResponse> {
    let request = ResendVerificationRequest {
        email: email.to_string(),
    };
    client.post("/users/resend-verification", &request).await
}
