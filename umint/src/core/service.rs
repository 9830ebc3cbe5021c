//! # Service Traits
//!
//! Traits for dependency injection, so the session manager can be driven by a
//! mock backend in tests.

use async_trait::async_trait;
use shared::{CreateUserRequest, LoginRequest, MessageResponse, User, VerifyEmailRequest, WalletBinding};

use super::error::ApiResult;

/// Authentication endpoints used by the session manager.
///
/// Implemented by [`crate::services::api::ApiClient`]. Every method that
/// returns a [`User`] has already unwrapped the response envelope.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account directly (wallet sign-up)
    async fn create_user(&self, request: CreateUserRequest) -> ApiResult<User>;

    /// Email/password login
    async fn login(&self, request: LoginRequest) -> ApiResult<User>;

    /// Login by wallet address
    async fn login_with_wallet(&self, wallet: WalletBinding) -> ApiResult<User>;

    /// First registration step: sends a verification code to the email
    async fn register(&self, request: CreateUserRequest) -> ApiResult<MessageResponse>;

    /// Second registration step
    async fn verify_email(&self, request: VerifyEmailRequest) -> ApiResult<MessageResponse>;

    /// Final registration step, returns the new user
    async fn complete_registration(&self, request: CreateUserRequest) -> ApiResult<User>;

    /// Send another verification code
    async fn resend_verification_code(&self, email: String) -> ApiResult<MessageResponse>;
}
