//! # Wallet Handlers
//!
//! Wallet connection, wallet login/registration and disconnection.

use std::sync::Arc;

use rand::distr::Alphanumeric;
use rand::Rng;
use shared::{wallet_username, CreateUserRequest, User, WalletBinding};

use crate::app::state::WalletState;
use crate::app::SessionManager;
use crate::core::error::{Result, SessionError};
use crate::services::wallet::{WalletConnection, WalletKind, WalletProvider};

use super::auth;

/// Length of the placeholder password given to wallet-created accounts.
const WALLET_PASSWORD_LEN: usize = 32;

fn random_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(WALLET_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

/// First provider, in priority order, that reports an authorized account.
async fn probe_wallets(manager: &SessionManager) -> Option<(Arc<dyn WalletProvider>, WalletConnection)> {
    for provider in manager.wallets.iter() {
        if !provider.is_installed() {
            continue;
        }
        if let Some(connection) = provider.probe().await {
            return Some((provider.clone(), connection));
        }
    }
    None
}

/// Startup wallet probe. An authenticated user gets the probed address
/// attached and re-persisted.
pub(crate) async fn restore_wallet(manager: &SessionManager) -> Result<()> {
    let Some((provider, connection)) = probe_wallets(manager).await else {
        tracing::debug!("No connected wallet found");
        return Ok(());
    };

    tracing::info!(wallet = %connection.kind, address = %connection.address, "Found connected wallet");

    let linked = manager
        .snapshot()
        .user()
        .map(|user| user.with_wallet_address(&connection.address));
    if let Some(user) = &linked {
        auth::persist(manager, user)?;
    }

    manager.update(|session| {
        session.set_wallet(WalletState::connected(&provider, &connection.address));
        if linked.is_some() {
            session.set_user(linked);
        }
    });
    Ok(())
}

/// Log in by wallet address, registering the wallet when the backend does
/// not know it.
pub(crate) async fn wallet_login(manager: &SessionManager, kind: WalletKind, address: &str) -> Result<User> {
    let binding = WalletBinding {
        wallet_type: kind,
        address: address.to_string(),
    };

    let user = match manager.auth.login_with_wallet(binding).await {
        Ok(user) => user,
        Err(e) if e.is_not_found() => {
            tracing::info!(wallet = %kind, "Wallet not registered, creating account");
            return register_with_wallet(manager, address, kind).await;
        }
        Err(e) => return Err(e.into()),
    };

    let user = user.with_wallet_address(address);
    auth::set_session(manager, user.clone())?;
    Ok(user)
}

pub(crate) async fn connect_wallet(manager: &SessionManager, kind: WalletKind) -> Result<String> {
    let provider = manager
        .wallets
        .get(kind)
        .filter(|p| p.is_installed())
        .cloned()
        .ok_or(SessionError::WalletUnavailable(kind))?;

    let address = match provider.connect().await {
        Ok(address) => address,
        Err(e) => {
            tracing::warn!(wallet = %kind, error = %e, "Wallet connect failed");
            return Err(e.into());
        }
    };
    tracing::info!(wallet = %kind, address = %address, "Wallet connected");

    let current = manager.snapshot().user().cloned();
    match current {
        // Linking mode: attach the wallet to the logged-in account.
        Some(user) => {
            let linked = user.with_wallet_address(&address);
            auth::persist(manager, &linked)?;
            manager.update(|session| {
                session.set_wallet(WalletState::connected(&provider, &address));
                session.set_user(Some(linked));
            });
        }
        None => {
            manager.update(|session| session.set_wallet(WalletState::connected(&provider, &address)));
            wallet_login(manager, kind, &address).await?;
        }
    }

    Ok(address)
}

pub(crate) async fn register_with_wallet(manager: &SessionManager, address: &str, kind: WalletKind) -> Result<User> {
    let binding = WalletBinding {
        wallet_type: kind,
        address: address.to_string(),
    };
    let request = CreateUserRequest {
        username: Some(wallet_username(address)),
        email: None,
        password: Some(random_password()),
        wallet: Some(binding.clone()),
    };

    let user = match manager.auth.create_user(request).await {
        Ok(user) => user,
        // Registered in the meantime: one login attempt, else the conflict stands.
        Err(conflict) if conflict.is_conflict() => {
            tracing::warn!(wallet = %kind, "Wallet already registered, retrying login");
            match manager.auth.login_with_wallet(binding).await {
                Ok(user) => user,
                Err(e) => {
                    tracing::warn!(error = %e, "Login after registration conflict failed");
                    return Err(conflict.into());
                }
            }
        }
        Err(e) => return Err(e.into()),
    };

    let user = user.with_wallet_address(address);
    auth::set_session(manager, user.clone())?;
    tracing::info!(user_id = %user.id, wallet = %kind, "Wallet account ready");
    Ok(user)
}

pub(crate) async fn disconnect_wallet(manager: &SessionManager) -> Result<()> {
    let session = manager.snapshot();

    if let Some(provider) = session.wallet().provider_handle().and_then(|h| h.upgrade()) {
        if provider.supports_disconnect() {
            match provider.disconnect().await {
                Ok(()) => tracing::debug!(wallet = %provider.kind(), "Provider disconnected"),
                Err(e) => tracing::warn!(wallet = %provider.kind(), error = %e, "Provider disconnect failed"),
            }
        }
    }

    let stripped = session
        .user()
        .filter(|user| user.wallet_address.is_some())
        .map(User::without_wallet_address);
    let persisted = match &stripped {
        Some(user) => auth::persist(manager, user),
        None => Ok(()),
    };

    manager.update(|session| {
        session.set_wallet(WalletState::disconnected());
        if persisted.is_ok() && stripped.is_some() {
            session.set_user(stripped);
        }
    });

    tracing::info!("Wallet disconnected");
    persisted
}
