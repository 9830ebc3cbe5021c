//! # Session Manager
//!
//! [`SessionManager`] owns the client session and runs every action that
//! changes it: startup reconciliation, email login, wallet connect and
//! disconnect, and the email registration flow.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI / UI                                                   │
//! │  - manager.init()          - reconcile stored session       │
//! │  - manager.connect_wallet  - user actions                   │
//! │  - manager.snapshot()      - read state for rendering       │
//! └──────────────┬──────────────────────────────▲───────────────┘
//!                │                              │ async_channel
//! ┌──────────────▼──────────────────────────────┴───────────────┐
//! │  SessionManager                                             │
//! │  - action guard: one mutating action at a time              │
//! │  - state: Arc<RwLock<Session>>, multi-field updates in one  │
//! │    write                                                    │
//! │  - handlers/: auth, wallet, registration                    │
//! └──────┬──────────────────────┬──────────────────────┬────────┘
//!        │                      │                      │
//!   AuthService          SessionStorage          WalletRegistry
//! ```
//!
//! ## Startup Reconciliation
//!
//! [`SessionManager::init`]:
//!
//! 1. Restore the user from storage. Unreadable content is removed.
//! 2. Probe wallet providers silently in priority order; the first connected
//!    account wins and is attached to the restored user.
//! 3. A connected wallet without a logged-in user triggers a wallet login
//!    (registering the wallet if the backend does not know it). Failure
//!    leaves the session in [`SessionPhase::WalletConnectedOnly`].
//!
//! ## Concurrency
//!
//! Actions do not queue. Starting an action while another is running fails
//! immediately with [`SessionError::ActionInFlight`].
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use umint::app::SessionManager;
//! use umint::core::ClientConfig;
//! use umint::services::{api::ApiClient, storage::MemoryStorage, wallet::WalletRegistry};
//!
//! # async fn run() -> umint::core::Result<()> {
//! let config = ClientConfig::from_env().unwrap();
//! let manager = SessionManager::new(
//!     Arc::new(ApiClient::new(&config)?),
//!     Arc::new(MemoryStorage::new()),
//!     WalletRegistry::new(),
//! );
//!
//! manager.init().await?;
//! manager.login_with_email("a@b.com", "secret").await?;
//! assert!(manager.snapshot().is_authenticated());
//! # Ok(())
//! # }
//! ```

mod events;
mod handlers;
pub mod router;
mod state;

pub use events::SessionEvent;
pub use router::Route;
pub use state::*;

use std::sync::Arc;

use async_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use shared::User;
use tokio::sync::{Mutex, MutexGuard};

use crate::core::error::{Result, SessionError};
use crate::core::service::AuthService;
use crate::services::storage::SessionStorage;
use crate::services::wallet::{WalletKind, WalletRegistry};

/// Owner of the client session.
///
/// Cheap to share behind an `Arc`; every action takes `&self`.
pub struct SessionManager {
    pub(crate) auth: Arc<dyn AuthService>,
    pub(crate) storage: Arc<dyn SessionStorage>,
    pub(crate) wallets: WalletRegistry,

    /// Session contents. Locks are held only for the duration of a
    /// read or a single update, never across an await.
    state: Arc<RwLock<Session>>,

    /// Held for the whole duration of a mutating action.
    action: Mutex<()>,

    events: Option<Sender<SessionEvent>>,
}

impl SessionManager {
    pub fn new(
        auth: Arc<dyn AuthService>,
        storage: Arc<dyn SessionStorage>,
        wallets: WalletRegistry,
    ) -> Self {
        Self {
            auth,
            storage,
            wallets,
            state: Arc::new(RwLock::new(Session::default())),
            action: Mutex::new(()),
            events: None,
        }
    }

    /// Create an unbounded event channel and return its receiving end.
    ///
    /// Replaces any previous subscription.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = unbounded();
        self.events = Some(tx);
        rx
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.read().phase()
    }

    pub fn wallets(&self) -> &WalletRegistry {
        &self.wallets
    }

    /// Apply `f` under a single write lock and notify observers afterwards.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let (result, phase) = {
            let mut session = self.state.write();
            let result = f(&mut session);
            (result, session.phase())
        };
        self.notify(SessionEvent::Changed(phase));
        result
    }

    pub(crate) fn notify(&self, event: SessionEvent) {
        if let Some(tx) = &self.events {
            // Closed receivers are fine; nobody is listening.
            let _ = tx.try_send(event);
        }
    }

    fn begin(&self, action: &'static str) -> Result<MutexGuard<'_, ()>> {
        self.action.try_lock().map_err(|_| {
            tracing::warn!(action, "Session action refused, another one is running");
            SessionError::ActionInFlight(action)
        })
    }

    /// Reconcile the stored session with live wallet state. Run once at startup.
    #[tracing::instrument(skip(self))]
    pub async fn init(&self) -> Result<SessionPhase> {
        let _guard = self.begin("init")?;

        handlers::auth::restore_user(self);
        handlers::wallet::restore_wallet(self).await?;

        let session = self.snapshot();
        if let (false, Some(kind), Some(address)) = (
            session.is_authenticated(),
            session.wallet().kind(),
            session.wallet().address(),
        ) {
            match handlers::wallet::wallet_login(self, kind, address).await {
                Ok(user) => tracing::info!(user_id = %user.id, "Logged in with connected wallet"),
                Err(e) => {
                    tracing::warn!(error = %e, wallet = %kind, "Wallet login at startup failed");
                    self.notify(SessionEvent::WalletLoginSkipped(e.to_string()));
                }
            }
        }

        let phase = self.phase();
        tracing::info!(%phase, "Session restored");
        self.notify(SessionEvent::Restored(phase));
        Ok(phase)
    }

    /// Email/password login.
    pub async fn login_with_email(&self, email: &str, password: &str) -> Result<User> {
        let _guard = self.begin("login")?;
        handlers::auth::login_with_email(self, email, password).await
    }

    /// Persist `user` and make it the session user.
    pub fn set_session(&self, user: User) -> Result<()> {
        let _guard = self.begin("set session")?;
        handlers::auth::set_session(self, user)
    }

    /// Log out. The wallet connection, if any, is kept.
    pub fn clear_session(&self) -> Result<()> {
        let _guard = self.begin("log out")?;
        handlers::auth::clear_session(self)
    }

    /// Interactively connect the `kind` wallet and log in with it.
    ///
    /// When a user is already logged in the wallet is linked to that account
    /// instead. Returns the wallet address.
    pub async fn connect_wallet(&self, kind: WalletKind) -> Result<String> {
        let _guard = self.begin("connect wallet")?;
        handlers::wallet::connect_wallet(self, kind).await
    }

    /// Create an account for a wallet the backend does not know yet.
    pub async fn register_with_wallet(&self, address: &str, kind: WalletKind) -> Result<User> {
        let _guard = self.begin("register wallet")?;
        handlers::wallet::register_with_wallet(self, address, kind).await
    }

    /// Disconnect the active wallet. Never logs the user out.
    pub async fn disconnect_wallet(&self) -> Result<()> {
        let _guard = self.begin("disconnect wallet")?;
        handlers::wallet::disconnect_wallet(self).await
    }

    /// Send a verification code to `email` and begin registration.
    pub async fn start_registration(&self, email: &str) -> Result<()> {
        let _guard = self.begin("start registration")?;
        handlers::registration::start_registration(self, email).await
    }

    pub async fn verify_email(&self, code: &str) -> Result<()> {
        let _guard = self.begin("verify email")?;
        handlers::registration::verify_email(self, code).await
    }

    pub async fn resend_verification_code(&self) -> Result<()> {
        let _guard = self.begin("resend verification code")?;
        handlers::registration::resend_verification_code(self).await
    }

    /// Finish registration and log the new user in.
    pub async fn complete_registration(&self, username: &str, password: &str) -> Result<User> {
        let _guard = self.begin("complete registration")?;
        handlers::registration::complete_registration(self, username, password).await
    }
}

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
