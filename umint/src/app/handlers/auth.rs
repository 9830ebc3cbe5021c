//! # Authentication Handlers
//!
//! Email login, logout and the persisted copy of the session user.

use std::time::Instant;

use shared::{LoginRequest, User};

use crate::app::SessionManager;
use crate::core::error::{Result, SessionError};
use crate::services::storage::USER_KEY;

/// Write `user` to durable storage without touching the in-memory session.
pub(crate) fn persist(manager: &SessionManager, user: &User) -> Result<()> {
    let json = serde_json::to_string(user).map_err(|e| SessionError::Unparseable(e.to_string()))?;
    manager.storage.set(USER_KEY, &json)?;
    Ok(())
}

/// Persist first, then switch the session user; a failed write leaves the
/// session untouched.
pub(crate) fn set_session(manager: &SessionManager, user: User) -> Result<()> {
    persist(manager, &user)?;
    tracing::debug!(user_id = %user.id, "Session user set");
    manager.update(|session| session.set_user(Some(user)));
    Ok(())
}

pub(crate) fn clear_session(manager: &SessionManager) -> Result<()> {
    manager.storage.remove(USER_KEY)?;
    manager.update(|session| session.set_user(None));
    tracing::info!("Logged out");
    Ok(())
}

pub(crate) async fn login_with_email(manager: &SessionManager, email: &str, password: &str) -> Result<User> {
    let start = Instant::now();
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let user = match manager.auth.login(request).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, duration_ms = start.elapsed().as_millis() as u64, "Email login failed");
            return Err(e.into());
        }
    };

    set_session(manager, user.clone())?;
    tracing::info!(user_id = %user.id, duration_ms = start.elapsed().as_millis() as u64, "Logged in with email");
    Ok(user)
}

/// Load the stored user into the session.
///
/// Unreadable content is logged and removed; the session then stays anonymous.
pub(crate) fn restore_user(manager: &SessionManager) {
    let stored = match manager.storage.get(USER_KEY) {
        Ok(Some(stored)) => stored,
        Ok(None) => return,
        Err(e) => {
            tracing::warn!(error = %e, "Session storage unreadable, discarding stored user");
            discard_stored_user(manager);
            return;
        }
    };

    match serde_json::from_str::<User>(&stored) {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "Restored stored session");
            manager.update(|session| session.set_user(Some(user)));
        }
        Err(e) => {
            let err = SessionError::Unparseable(e.to_string());
            tracing::warn!(error = %err, "Failed to parse stored user, discarding");
            discard_stored_user(manager);
        }
    }
}

fn discard_stored_user(manager: &SessionManager) {
    if let Err(e) = manager.storage.remove(USER_KEY) {
        tracing::error!(error = %e, "Failed to remove stored user");
    }
}
