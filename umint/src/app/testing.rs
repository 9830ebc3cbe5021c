//! Mock collaborators for session manager tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{CreateUserRequest, LoginRequest, MessageResponse, User, VerifyEmailRequest, WalletBinding};

use crate::core::error::{ApiError, ApiResult};
use crate::core::service::AuthService;
use crate::services::storage::{MemoryStorage, SessionStorage, StorageError};
use crate::services::wallet::{WalletConnection, WalletError, WalletKind, WalletProvider};

pub(crate) const PASSWORD: &str = "pw";
pub(crate) const CODE: &str = "123456";

pub(crate) fn alice() -> User {
    User {
        id: "u1".to_string(),
        email: "a@b.com".to_string(),
        display_name: "alice".to_string(),
        bio: None,
        wallet_address: None,
    }
}

fn server(status: u16, message: &str) -> ApiError {
    ApiError::Server {
        status,
        message: message.to_string(),
    }
}

/// In-memory backend recording every call.
#[derive(Default)]
pub(crate) struct MockAuth {
    calls: Mutex<Vec<&'static str>>,
    /// Wallet address -> account
    wallets: Mutex<HashMap<String, User>>,
    /// Forces `create_user` to answer 409
    pub create_conflict: AtomicBool,
    /// Error returned by every `login_with_wallet` call
    pub wallet_login_error: Mutex<Option<ApiError>>,
    pub created: Mutex<Vec<CreateUserRequest>>,
    pub completed: Mutex<Vec<CreateUserRequest>>,
}

impl MockAuth {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_wallet_user(self: Arc<Self>, address: &str, user: User) -> Arc<Self> {
        self.wallets.lock().insert(address.to_string(), user);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl AuthService for MockAuth {
    async fn create_user(&self, request: CreateUserRequest) -> ApiResult<User> {
        self.record("create_user");
        if self.create_conflict.load(Ordering::SeqCst) {
            return Err(server(409, "User already exists"));
        }

        let user = User {
            id: "w1".to_string(),
            email: request.email.clone().unwrap_or_default(),
            display_name: request.username.clone().unwrap_or_default(),
            bio: None,
            wallet_address: request.wallet.as_ref().map(|w| w.address.clone()),
        };
        if let Some(wallet) = &request.wallet {
            self.wallets.lock().insert(wallet.address.clone(), user.clone());
        }
        self.created.lock().push(request);
        Ok(user)
    }

    async fn login(&self, request: LoginRequest) -> ApiResult<User> {
        self.record("login");
        if request.email == "a@b.com" && request.password == PASSWORD {
            Ok(alice())
        } else {
            Err(server(401, "Invalid credentials"))
        }
    }

    async fn login_with_wallet(&self, wallet: WalletBinding) -> ApiResult<User> {
        self.record("login_with_wallet");
        if let Some(err) = self.wallet_login_error.lock().clone() {
            return Err(err);
        }
        self.wallets
            .lock()
            .get(&wallet.address)
            .cloned()
            .ok_or_else(|| server(404, "User not found"))
    }

    async fn register(&self, request: CreateUserRequest) -> ApiResult<MessageResponse> {
        self.record("register");
        match request.email {
            Some(_) => Ok(MessageResponse {
                message: Some("Verification code sent".to_string()),
                success: Some(true),
            }),
            None => Err(server(400, "Email is required")),
        }
    }

    async fn verify_email(&self, request: VerifyEmailRequest) -> ApiResult<MessageResponse> {
        self.record("verify_email");
        if request.code == CODE {
            Ok(MessageResponse::default())
        } else {
            Err(server(400, "Invalid verification code"))
        }
    }

    async fn complete_registration(&self, request: CreateUserRequest) -> ApiResult<User> {
        self.record("complete_registration");
        let user = User {
            id: "u2".to_string(),
            email: request.email.clone().unwrap_or_default(),
            display_name: request.username.clone().unwrap_or_default(),
            bio: None,
            wallet_address: None,
        };
        self.completed.lock().push(request);
        Ok(user)
    }

    async fn resend_verification_code(&self, _email: String) -> ApiResult<MessageResponse> {
        self.record("resend_verification_code");
        Ok(MessageResponse::default())
    }
}

/// Memory storage whose writes can be made to fail, like a full or
/// read-only disk.
#[derive(Default)]
pub(crate) struct FlakyStorage {
    inner: MemoryStorage,
    pub fail_writes: AtomicBool,
}

impl FlakyStorage {
    fn check(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                path: "session.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        Ok(())
    }
}

impl SessionStorage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.remove(key)
    }
}

/// Scriptable wallet provider.
pub(crate) struct MockWallet {
    kind: WalletKind,
    address: String,
    pub installed: AtomicBool,
    pub authorized: AtomicBool,
    pub reject: AtomicBool,
    pub disconnects: AtomicUsize,
}

impl MockWallet {
    pub fn new(kind: WalletKind, address: &str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            address: address.to_string(),
            installed: AtomicBool::new(true),
            authorized: AtomicBool::new(false),
            reject: AtomicBool::new(false),
            disconnects: AtomicUsize::new(0),
        })
    }

    /// Already authorized, so a silent probe finds it.
    pub fn authorized(kind: WalletKind, address: &str) -> Arc<Self> {
        let wallet = Self::new(kind, address);
        wallet.authorized.store(true, Ordering::SeqCst);
        wallet
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    fn kind(&self) -> WalletKind {
        self.kind
    }

    fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    async fn probe(&self) -> Option<WalletConnection> {
        self.authorized.load(Ordering::SeqCst).then(|| WalletConnection {
            kind: self.kind,
            address: self.address.clone(),
        })
    }

    async fn connect(&self) -> Result<String, WalletError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(WalletError::Rejected("User rejected the request".to_string()));
        }
        self.authorized.store(true, Ordering::SeqCst);
        Ok(self.address.clone())
    }

    fn supports_disconnect(&self) -> bool {
        matches!(self.kind, WalletKind::Phantom)
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        self.authorized.store(false, Ordering::SeqCst);
        Ok(())
    }
}
