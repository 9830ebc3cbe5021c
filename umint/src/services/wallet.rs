//! # Wallet Providers
//!
//! Browser-style wallet capability: a provider is "installed" or not, can be
//! probed silently for an already-authorized account, and can be asked
//! interactively to connect.
//!
//! ## Features
//! - [`WalletProvider`] trait implemented once per provider family
//! - [`WalletRegistry`] holding providers in probe priority order
//! - [`KeyfileWallet`]: native provider backed by a Solana CLI keypair file

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Supported wallet provider families.
pub use shared::WalletType as WalletKind;

/// Size of a Solana CLI keypair file: 32 secret bytes followed by 32 public bytes.
const KEYPAIR_LEN: usize = 64;

/// Wallet provider errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    /// Provider not present on this machine
    #[error("{0} wallet is not available")]
    Unavailable(WalletKind),

    /// User declined, or the provider could not produce an account
    #[error("{0}")]
    Rejected(String),
}

/// An account the provider reports as connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConnection {
    pub kind: WalletKind,
    pub address: String,
}

/// A wallet provider.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    fn kind(&self) -> WalletKind;

    /// Whether the provider exists at all.
    fn is_installed(&self) -> bool;

    /// Non-interactive check for an already-authorized account.
    ///
    /// Never prompts. `None` when nothing is authorized or the provider is
    /// unusable.
    async fn probe(&self) -> Option<WalletConnection>;

    /// Interactive connect; returns the account address.
    async fn connect(&self) -> Result<String, WalletError>;

    /// Whether [`WalletProvider::disconnect`] does anything for this provider.
    fn supports_disconnect(&self) -> bool;

    async fn disconnect(&self) -> Result<(), WalletError>;
}

/// Probe order. Earlier kinds win when several providers are connected.
fn priority(kind: WalletKind) -> u8 {
    match kind {
        WalletKind::Phantom => 0,
        WalletKind::Solflare => 1,
    }
}

/// Registered providers, kept sorted by probe priority.
#[derive(Clone, Default)]
pub struct WalletRegistry {
    providers: Vec<Arc<dyn WalletProvider>>,
}

impl WalletRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider, replacing any previous provider of the same kind.
    pub fn register(&mut self, provider: Arc<dyn WalletProvider>) {
        let kind = provider.kind();
        self.providers.retain(|p| p.kind() != kind);
        self.providers.push(provider);
        self.providers.sort_by_key(|p| priority(p.kind()));
    }

    /// Builder-style [`WalletRegistry::register`].
    pub fn with(mut self, provider: Arc<dyn WalletProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn get(&self, kind: WalletKind) -> Option<&Arc<dyn WalletProvider>> {
        self.providers.iter().find(|p| p.kind() == kind)
    }

    /// Providers in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn WalletProvider>> {
        self.providers.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for WalletRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|p| p.kind()))
            .finish()
    }
}

/// Wallet provider backed by a Solana CLI keypair file (`solana-keygen` format).
///
/// The file is a JSON array of 64 bytes; the account address is the base58
/// encoding of the last 32. The secret half is never kept in memory.
///
/// A trusted wallet starts out authorized, so [`WalletProvider::probe`]
/// reports it without prompting, like a browser wallet that has already
/// approved this site.
#[derive(Debug)]
pub struct KeyfileWallet {
    kind: WalletKind,
    path: PathBuf,
    authorized: AtomicBool,
}

impl KeyfileWallet {
    pub fn new(kind: WalletKind, path: impl Into<PathBuf>, trusted: bool) -> Self {
        Self {
            kind,
            path: path.into(),
            authorized: AtomicBool::new(trusted),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the keypair file and return its public address.
    pub fn read_address(&self) -> Result<String, WalletError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            WalletError::Rejected(format!("Failed to read keypair {}: {}", self.path.display(), e))
        })?;

        address_from_keypair_json(&contents)
    }
}

/// Base58 public address from the contents of a Solana CLI keypair file.
pub fn address_from_keypair_json(contents: &str) -> Result<String, WalletError> {
    let bytes: Vec<u8> = serde_json::from_str(contents.trim())
        .map_err(|e| WalletError::Rejected(format!("Invalid keypair format: {}", e)))?;

    if bytes.len() != KEYPAIR_LEN {
        return Err(WalletError::Rejected(format!(
            "Expected {} keypair bytes, got {}",
            KEYPAIR_LEN,
            bytes.len()
        )));
    }

    Ok(bs58::encode(&bytes[32..]).into_string())
}

#[async_trait]
impl WalletProvider for KeyfileWallet {
    fn kind(&self) -> WalletKind {
        self.kind
    }

    fn is_installed(&self) -> bool {
        self.path.is_file()
    }

    async fn probe(&self) -> Option<WalletConnection> {
        if !self.authorized.load(Ordering::SeqCst) || !self.is_installed() {
            return None;
        }

        match self.read_address() {
            Ok(address) => Some(WalletConnection { kind: self.kind, address }),
            Err(e) => {
                tracing::debug!(wallet = %self.kind, error = %e, "Wallet probe failed");
                None
            }
        }
    }

    async fn connect(&self) -> Result<String, WalletError> {
        if !self.is_installed() {
            return Err(WalletError::Unavailable(self.kind));
        }

        let address = self.read_address()?;
        self.authorized.store(true, Ordering::SeqCst);
        Ok(address)
    }

    fn supports_disconnect(&self) -> bool {
        matches!(self.kind, WalletKind::Phantom)
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        if !self.supports_disconnect() {
            return Err(WalletError::Rejected(format!("{} does not support disconnect", self.kind)));
        }

        self.authorized.store(false, Ordering::SeqCst);
        Ok(())
    }
}
