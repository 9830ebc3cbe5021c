//! # Registration Handlers
//!
//! Email registration in three steps: send a code, verify it, then choose a
//! username and password. Each later step needs the email from the first.

use shared::{CreateUserRequest, User, VerifyEmailRequest, WalletBinding};

use crate::app::state::RegistrationState;
use crate::app::SessionManager;
use crate::core::error::{Result, SessionError};

use super::auth;

fn pending_email(manager: &SessionManager) -> Result<String> {
    manager
        .snapshot()
        .registration()
        .pending_email()
        .map(str::to_string)
        .ok_or(SessionError::RegistrationNotStarted)
}

pub(crate) async fn start_registration(manager: &SessionManager, email: &str) -> Result<()> {
    let request = CreateUserRequest {
        email: Some(email.to_string()),
        ..Default::default()
    };

    let response = manager.auth.register(request).await?;
    tracing::info!(email, message = ?response.message, "Verification code sent");

    manager.update(|session| session.set_registration(RegistrationState::code_sent(email)));
    Ok(())
}

pub(crate) async fn verify_email(manager: &SessionManager, code: &str) -> Result<()> {
    let email = pending_email(manager)?;

    manager
        .auth
        .verify_email(VerifyEmailRequest {
            email: email.clone(),
            code: code.to_string(),
        })
        .await?;
    tracing::info!(email = %email, "Email verified");

    manager.update(|session| {
        let verified = session.registration().verified();
        session.set_registration(verified);
    });
    Ok(())
}

pub(crate) async fn resend_verification_code(manager: &SessionManager) -> Result<()> {
    let email = pending_email(manager)?;
    manager.auth.resend_verification_code(email.clone()).await?;
    tracing::info!(email = %email, "Verification code resent");
    Ok(())
}

/// The connected wallet, if any, is bound to the new account.
pub(crate) async fn complete_registration(
    manager: &SessionManager,
    username: &str,
    password: &str,
) -> Result<User> {
    let email = pending_email(manager)?;

    let session = manager.snapshot();
    let wallet = match (session.wallet().kind(), session.wallet().address()) {
        (Some(wallet_type), Some(address)) => Some(WalletBinding {
            wallet_type,
            address: address.to_string(),
        }),
        _ => None,
    };

    let request = CreateUserRequest {
        username: Some(username.to_string()),
        email: Some(email),
        password: Some(password.to_string()),
        wallet,
    };

    let user = manager.auth.complete_registration(request).await?;
    auth::persist(manager, &user)?;

    manager.update(|session| {
        session.set_registration(RegistrationState::default());
        session.set_user(Some(user.clone()));
    });
    tracing::info!(user_id = %user.id, "Registration complete");
    Ok(user)
}
