//! # Session State Types
//!
//! The session owned by [`crate::app::SessionManager`]: current user, wallet
//! connection and registration progress.
//!
//! Fields are private and only changed through constructors that keep the
//! session consistent:
//!
//! - authenticated exactly when a user is present
//! - a wallet is connected exactly when a provider handle is held
//! - a verification code is only ever "sent" to a pending email

use std::fmt;
use std::sync::{Arc, Weak};

use shared::User;

use crate::services::wallet::{WalletKind, WalletProvider};

/// Coarse session phase, derived from the session contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Anonymous,
    Authenticated,
    /// A wallet is connected but no account is logged in.
    WalletConnectedOnly,
    AuthenticatedWithWallet,
}

impl SessionPhase {
    pub fn title(&self) -> &'static str {
        match self {
            SessionPhase::Anonymous => "Anonymous",
            SessionPhase::Authenticated => "Authenticated",
            SessionPhase::WalletConnectedOnly => "Wallet connected (not logged in)",
            SessionPhase::AuthenticatedWithWallet => "Authenticated with wallet",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Non-owning reference to a wallet provider.
///
/// The registry owns providers; the session only borrows them while connected.
#[derive(Clone)]
pub struct ProviderHandle(Weak<dyn WalletProvider>);

impl ProviderHandle {
    pub fn new(provider: &Arc<dyn WalletProvider>) -> Self {
        Self(Arc::downgrade(provider))
    }

    /// The provider, if it is still registered.
    pub fn upgrade(&self) -> Option<Arc<dyn WalletProvider>> {
        self.0.upgrade()
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(provider) => write!(f, "ProviderHandle({})", provider.kind()),
            None => f.write_str("ProviderHandle(<dropped>)"),
        }
    }
}

#[derive(Debug, Clone)]
struct ConnectedWallet {
    handle: ProviderHandle,
    kind: WalletKind,
    address: String,
}

/// Wallet connection state.
#[derive(Debug, Clone, Default)]
pub struct WalletState {
    connected: Option<ConnectedWallet>,
}

impl WalletState {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connected(provider: &Arc<dyn WalletProvider>, address: impl Into<String>) -> Self {
        Self {
            connected: Some(ConnectedWallet {
                handle: ProviderHandle::new(provider),
                kind: provider.kind(),
                address: address.into(),
            }),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.is_some()
    }

    pub fn provider_handle(&self) -> Option<&ProviderHandle> {
        self.connected.as_ref().map(|w| &w.handle)
    }

    /// `None` when disconnected.
    pub fn kind(&self) -> Option<WalletKind> {
        self.connected.as_ref().map(|w| w.kind)
    }

    pub fn address(&self) -> Option<&str> {
        self.connected.as_ref().map(|w| w.address.as_str())
    }
}

/// Multi-step email registration progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationState {
    in_progress: bool,
    pending_email: Option<String>,
    verification_sent: bool,
    email_verified: bool,
}

impl RegistrationState {
    /// State right after the backend accepted `email` and sent a code.
    pub fn code_sent(email: impl Into<String>) -> Self {
        Self {
            in_progress: true,
            pending_email: Some(email.into()),
            verification_sent: true,
            email_verified: false,
        }
    }

    /// Same registration with the email confirmed.
    pub fn verified(&self) -> Self {
        Self {
            email_verified: self.pending_email.is_some(),
            ..self.clone()
        }
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn pending_email(&self) -> Option<&str> {
        self.pending_email.as_deref()
    }

    pub fn verification_sent(&self) -> bool {
        self.verification_sent
    }

    pub fn email_verified(&self) -> bool {
        self.email_verified
    }
}

/// The client session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
    wallet: WalletState,
    registration: RegistrationState,
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn wallet(&self) -> &WalletState {
        &self.wallet
    }

    pub fn registration(&self) -> &RegistrationState {
        &self.registration
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.is_authenticated(), self.wallet.is_connected()) {
            (false, false) => SessionPhase::Anonymous,
            (true, false) => SessionPhase::Authenticated,
            (false, true) => SessionPhase::WalletConnectedOnly,
            (true, true) => SessionPhase::AuthenticatedWithWallet,
        }
    }

    pub(crate) fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub(crate) fn set_wallet(&mut self, wallet: WalletState) {
        self.wallet = wallet;
    }

    pub(crate) fn set_registration(&mut self, registration: RegistrationState) {
        self.registration = registration;
    }
}
