use std::sync::atomic::Ordering;
use std::sync::Arc;

use shared::User;

use super::testing::{alice, FlakyStorage, MockAuth, MockWallet, CODE, PASSWORD};
use super::*;
use crate::core::error::ApiError;
use crate::services::storage::{MemoryStorage, SessionStorage, StorageError, USER_KEY};

const PHANTOM_ADDR: &str = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
const SOLFLARE_ADDR: &str = "5FHwkrdxntdK24hgQU8qgBjn35Y1zwhz1GZwCkP2UJnM";

struct Fixture {
    manager: SessionManager,
    auth: Arc<MockAuth>,
    storage: Arc<MemoryStorage>,
}

fn fixture(auth: Arc<MockAuth>, wallets: Vec<Arc<MockWallet>>) -> Fixture {
    let storage = Arc::new(MemoryStorage::new());
    let mut registry = WalletRegistry::new();
    for wallet in wallets {
        registry.register(wallet);
    }
    let manager = SessionManager::new(auth.clone(), storage.clone(), registry);
    Fixture { manager, auth, storage }
}

fn stored_user(storage: &MemoryStorage) -> Option<User> {
    storage
        .get(USER_KEY)
        .unwrap()
        .map(|json| serde_json::from_str(&json).unwrap())
}

fn assert_consistent(session: &Session) {
    assert_eq!(session.is_authenticated(), session.user().is_some());
    assert_eq!(session.wallet().is_connected(), session.wallet().provider_handle().is_some());
    if session.registration().verification_sent() {
        assert!(session.registration().pending_email().is_some());
    }
}

#[tokio::test]
async fn test_set_and_clear_session_round_trip() {
    let f = fixture(MockAuth::new(), vec![]);

    f.manager.set_session(alice()).unwrap();
    assert_eq!(
        f.storage.get(USER_KEY).unwrap().unwrap(),
        serde_json::to_string(&alice()).unwrap()
    );
    assert_eq!(f.manager.phase(), SessionPhase::Authenticated);

    f.manager.clear_session().unwrap();
    assert_eq!(f.storage.get(USER_KEY).unwrap(), None);
    assert_eq!(f.manager.phase(), SessionPhase::Anonymous);
    assert_consistent(&f.manager.snapshot());
}

#[tokio::test]
async fn test_init_discards_corrupt_storage() {
    let f = fixture(MockAuth::new(), vec![]);
    f.storage.set(USER_KEY, "{not json").unwrap();

    let phase = f.manager.init().await.unwrap();

    assert_eq!(phase, SessionPhase::Anonymous);
    assert_eq!(f.storage.get(USER_KEY).unwrap(), None);
    assert!(f.auth.calls().is_empty());
}

#[tokio::test]
async fn test_init_restores_stored_user() {
    let f = fixture(MockAuth::new(), vec![]);
    f.storage.set(USER_KEY, r#"{"_id":"u1","email":"a@b.com","name":"alice"}"#).unwrap();

    assert_eq!(f.manager.init().await.unwrap(), SessionPhase::Authenticated);
    assert_eq!(f.manager.snapshot().user(), Some(&alice()));
}

#[tokio::test]
async fn test_init_attaches_probed_wallet_to_stored_user() {
    let phantom = MockWallet::authorized(WalletKind::Phantom, PHANTOM_ADDR);
    let f = fixture(MockAuth::new(), vec![phantom]);
    f.manager.set_session(alice()).unwrap();

    let phase = f.manager.init().await.unwrap();

    assert_eq!(phase, SessionPhase::AuthenticatedWithWallet);
    let session = f.manager.snapshot();
    assert_eq!(session.user().unwrap().wallet_address.as_deref(), Some(PHANTOM_ADDR));
    assert_eq!(session.wallet().kind(), Some(WalletKind::Phantom));
    assert_eq!(stored_user(&f.storage).unwrap().wallet_address.as_deref(), Some(PHANTOM_ADDR));
    assert!(f.auth.calls().is_empty());
    assert_consistent(&session);
}

#[tokio::test]
async fn test_init_probes_phantom_before_solflare() {
    let phantom = MockWallet::authorized(WalletKind::Phantom, PHANTOM_ADDR);
    let solflare = MockWallet::authorized(WalletKind::Solflare, SOLFLARE_ADDR);
    let f = fixture(MockAuth::new(), vec![solflare, phantom.clone()]);
    f.manager.set_session(alice()).unwrap();

    f.manager.init().await.unwrap();
    assert_eq!(f.manager.snapshot().wallet().address(), Some(PHANTOM_ADDR));

    // Not installed: skipped even though authorized.
    let phantom = MockWallet::authorized(WalletKind::Phantom, PHANTOM_ADDR);
    phantom.installed.store(false, Ordering::SeqCst);
    let solflare = MockWallet::authorized(WalletKind::Solflare, SOLFLARE_ADDR);
    let f = fixture(MockAuth::new(), vec![phantom, solflare]);
    f.manager.init().await.unwrap();
    assert_eq!(f.manager.snapshot().wallet().kind(), Some(WalletKind::Solflare));
}

#[tokio::test]
async fn test_init_logs_in_known_wallet() {
    let mut known = alice();
    known.wallet_address = Some(PHANTOM_ADDR.to_string());
    let auth = MockAuth::new().with_wallet_user(PHANTOM_ADDR, known);
    let f = fixture(auth, vec![MockWallet::authorized(WalletKind::Phantom, PHANTOM_ADDR)]);

    assert_eq!(f.manager.init().await.unwrap(), SessionPhase::AuthenticatedWithWallet);
    assert_eq!(f.auth.calls(), vec!["login_with_wallet"]);
    assert_eq!(stored_user(&f.storage).unwrap().id, "u1");
}

#[tokio::test]
async fn test_init_registers_unknown_wallet() {
    let f = fixture(MockAuth::new(), vec![MockWallet::authorized(WalletKind::Solflare, SOLFLARE_ADDR)]);

    assert_eq!(f.manager.init().await.unwrap(), SessionPhase::AuthenticatedWithWallet);
    assert_eq!(f.auth.calls(), vec!["login_with_wallet", "create_user"]);

    let created = f.auth.created.lock()[0].clone();
    assert_eq!(created.username.as_deref(), Some("wallet_5FHwkrdx"));
    let password = created.password.unwrap();
    assert_eq!(password.len(), 32);
    assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(created.wallet.unwrap().wallet_type, WalletKind::Solflare);

    let user = f.manager.snapshot().user().cloned().unwrap();
    assert_eq!(user.display_name, "wallet_5FHwkrdx");
    assert_eq!(user.wallet_address.as_deref(), Some(SOLFLARE_ADDR));
}

#[tokio::test]
async fn test_init_swallows_wallet_login_failure() {
    let auth = MockAuth::new();
    *auth.wallet_login_error.lock() = Some(ApiError::Connectivity {
        url: "http://localhost:8080/users/login/wallet".to_string(),
    });
    let mut f = fixture(auth, vec![MockWallet::authorized(WalletKind::Phantom, PHANTOM_ADDR)]);
    let events = f.manager.subscribe();

    let phase = f.manager.init().await.unwrap();

    assert_eq!(phase, SessionPhase::WalletConnectedOnly);
    assert_eq!(f.storage.get(USER_KEY).unwrap(), None);

    let received: Vec<_> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    assert!(received.iter().any(|e| matches!(e, SessionEvent::WalletLoginSkipped(_))));
    assert_eq!(received.last(), Some(&SessionEvent::Restored(SessionPhase::WalletConnectedOnly)));
}

#[tokio::test]
async fn test_connect_wallet_links_existing_account() {
    let phantom = MockWallet::new(WalletKind::Phantom, PHANTOM_ADDR);
    let f = fixture(MockAuth::new(), vec![phantom]);
    f.manager.login_with_email("a@b.com", PASSWORD).await.unwrap();

    let address = f.manager.connect_wallet(WalletKind::Phantom).await.unwrap();

    assert_eq!(address, PHANTOM_ADDR);
    let session = f.manager.snapshot();
    assert_eq!(session.user().unwrap().id, "u1");
    assert_eq!(session.user().unwrap().wallet_address.as_deref(), Some(PHANTOM_ADDR));
    assert_eq!(session.phase(), SessionPhase::AuthenticatedWithWallet);
    assert_eq!(f.auth.calls(), vec!["login"]);
    assert_eq!(stored_user(&f.storage).unwrap().wallet_address.as_deref(), Some(PHANTOM_ADDR));
}

#[tokio::test]
async fn test_connect_wallet_unavailable_or_rejected() {
    let solflare = MockWallet::new(WalletKind::Solflare, SOLFLARE_ADDR);
    solflare.installed.store(false, Ordering::SeqCst);
    let phantom = MockWallet::new(WalletKind::Phantom, PHANTOM_ADDR);
    phantom.reject.store(true, Ordering::SeqCst);
    let f = fixture(MockAuth::new(), vec![phantom, solflare]);

    let err = f.manager.connect_wallet(WalletKind::Solflare).await.unwrap_err();
    assert!(matches!(err, SessionError::WalletUnavailable(WalletKind::Solflare)));

    let err = f.manager.connect_wallet(WalletKind::Phantom).await.unwrap_err();
    assert!(matches!(err, SessionError::WalletRejected(_)));

    assert_eq!(f.manager.phase(), SessionPhase::Anonymous);
    assert!(f.auth.calls().is_empty());

    let empty = fixture(MockAuth::new(), vec![]);
    let err = empty.manager.connect_wallet(WalletKind::Phantom).await.unwrap_err();
    assert!(matches!(err, SessionError::WalletUnavailable(WalletKind::Phantom)));
}

#[tokio::test]
async fn test_connect_wallet_backend_error_keeps_wallet_connected() {
    let auth = MockAuth::new();
    *auth.wallet_login_error.lock() = Some(ApiError::Server {
        status: 500,
        message: "Error 500: Internal Server Error".to_string(),
    });
    let f = fixture(auth, vec![MockWallet::new(WalletKind::Phantom, PHANTOM_ADDR)]);

    let err = f.manager.connect_wallet(WalletKind::Phantom).await.unwrap_err();

    assert!(matches!(err, SessionError::Api(ApiError::Server { status: 500, .. })));
    assert_eq!(f.manager.phase(), SessionPhase::WalletConnectedOnly);
    assert_consistent(&f.manager.snapshot());
}

#[tokio::test]
async fn test_register_with_wallet_conflict_retries_login_once() {
    let mut known = alice();
    known.wallet_address = Some(PHANTOM_ADDR.to_string());
    let auth = MockAuth::new().with_wallet_user(PHANTOM_ADDR, known);
    auth.create_conflict.store(true, Ordering::SeqCst);
    let f = fixture(auth, vec![]);

    let user = f.manager.register_with_wallet(PHANTOM_ADDR, WalletKind::Phantom).await.unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(f.auth.calls(), vec!["create_user", "login_with_wallet"]);
    assert!(f.manager.snapshot().is_authenticated());
}

#[tokio::test]
async fn test_register_with_wallet_conflict_surfaces_original_error() {
    let auth = MockAuth::new();
    auth.create_conflict.store(true, Ordering::SeqCst);
    let f = fixture(auth, vec![]);

    let err = f.manager.register_with_wallet(PHANTOM_ADDR, WalletKind::Phantom).await.unwrap_err();

    assert!(matches!(err, SessionError::Api(ApiError::Server { status: 409, .. })));
    assert_eq!(f.auth.calls(), vec!["create_user", "login_with_wallet"]);
    assert!(!f.manager.snapshot().is_authenticated());
}

#[tokio::test]
async fn test_disconnect_wallet_keeps_user_and_strips_address() {
    let phantom = MockWallet::new(WalletKind::Phantom, PHANTOM_ADDR);
    let f = fixture(MockAuth::new(), vec![phantom.clone()]);
    f.manager.login_with_email("a@b.com", PASSWORD).await.unwrap();
    f.manager.connect_wallet(WalletKind::Phantom).await.unwrap();

    f.manager.disconnect_wallet().await.unwrap();

    assert_eq!(phantom.disconnects.load(Ordering::SeqCst), 1);
    let session = f.manager.snapshot();
    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert_eq!(session.user().unwrap().wallet_address, None);
    assert_eq!(stored_user(&f.storage).unwrap().wallet_address, None);
    assert_consistent(&session);
}

#[tokio::test]
async fn test_disconnect_skips_provider_without_support() {
    let solflare = MockWallet::authorized(WalletKind::Solflare, SOLFLARE_ADDR);
    let f = fixture(MockAuth::new(), vec![solflare.clone()]);
    f.manager.init().await.unwrap();

    f.manager.disconnect_wallet().await.unwrap();

    assert_eq!(solflare.disconnects.load(Ordering::SeqCst), 0);
    assert!(!f.manager.snapshot().wallet().is_connected());
    // Logged in through the wallet; disconnecting does not log out.
    assert!(f.manager.snapshot().is_authenticated());
}

#[tokio::test]
async fn test_disconnect_with_failed_write_keeps_user_binding() {
    let phantom = MockWallet::new(WalletKind::Phantom, PHANTOM_ADDR);
    let storage = Arc::new(FlakyStorage::default());
    let manager = SessionManager::new(
        MockAuth::new(),
        storage.clone(),
        WalletRegistry::new().with(phantom.clone()),
    );
    manager.login_with_email("a@b.com", PASSWORD).await.unwrap();
    manager.connect_wallet(WalletKind::Phantom).await.unwrap();

    storage.fail_writes.store(true, Ordering::SeqCst);
    let err = manager.disconnect_wallet().await.unwrap_err();

    assert!(matches!(err, SessionError::Storage(StorageError::Io { .. })));
    assert_eq!(phantom.disconnects.load(Ordering::SeqCst), 1);
    let session = manager.snapshot();
    assert!(!session.wallet().is_connected());
    assert_eq!(session.user().unwrap().wallet_address.as_deref(), Some(PHANTOM_ADDR));
    assert_eq!(session.phase(), SessionPhase::Authenticated);
    assert_consistent(&session);

    let stored: User = serde_json::from_str(&storage.get(USER_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored.wallet_address.as_deref(), Some(PHANTOM_ADDR));
}

#[tokio::test]
async fn test_login_failure_leaves_session_anonymous() {
    let f = fixture(MockAuth::new(), vec![]);

    let err = f.manager.login_with_email("a@b.com", "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(f.manager.phase(), SessionPhase::Anonymous);
    assert_eq!(f.storage.get(USER_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_registration_steps_require_start() {
    let f = fixture(MockAuth::new(), vec![]);

    let err = f.manager.verify_email(CODE).await.unwrap_err();
    assert!(matches!(err, SessionError::RegistrationNotStarted));
    let err = f.manager.resend_verification_code().await.unwrap_err();
    assert!(matches!(err, SessionError::RegistrationNotStarted));
    let err = f.manager.complete_registration("alice", PASSWORD).await.unwrap_err();
    assert!(matches!(err, SessionError::RegistrationNotStarted));

    assert_eq!(f.manager.snapshot().registration(), &RegistrationState::default());
    assert!(f.auth.calls().is_empty());
}

#[tokio::test]
async fn test_email_registration_flow() {
    let f = fixture(MockAuth::new(), vec![]);

    f.manager.start_registration("a@b.com").await.unwrap();
    let registration = f.manager.snapshot().registration().clone();
    assert!(registration.in_progress());
    assert_eq!(registration.pending_email(), Some("a@b.com"));
    assert!(registration.verification_sent());

    assert!(f.manager.verify_email("000000").await.is_err());
    assert!(!f.manager.snapshot().registration().email_verified());

    f.manager.verify_email(CODE).await.unwrap();
    assert!(f.manager.snapshot().registration().email_verified());
    f.manager.resend_verification_code().await.unwrap();

    let user = f.manager.complete_registration("alice", PASSWORD).await.unwrap();
    assert_eq!(user.display_name, "alice");

    let session = f.manager.snapshot();
    assert!(session.is_authenticated());
    assert_eq!(session.registration(), &RegistrationState::default());
    assert_eq!(stored_user(&f.storage).unwrap().id, "u2");

    let completed = f.auth.completed.lock()[0].clone();
    assert_eq!(completed.email.as_deref(), Some("a@b.com"));
    assert_eq!(completed.wallet, None);
}

#[tokio::test]
async fn test_overlapping_action_is_refused() {
    let f = fixture(MockAuth::new(), vec![]);

    let guard = f.manager.action.try_lock().unwrap();
    let err = f.manager.login_with_email("a@b.com", PASSWORD).await.unwrap_err();
    assert!(matches!(err, SessionError::ActionInFlight("login")));
    assert!(matches!(f.manager.set_session(alice()), Err(SessionError::ActionInFlight(_))));
    drop(guard);

    f.manager.login_with_email("a@b.com", PASSWORD).await.unwrap();
    assert!(f.manager.snapshot().is_authenticated());
}

#[tokio::test]
async fn test_events_follow_committed_changes() {
    let mut f = fixture(MockAuth::new(), vec![]);
    let events = f.manager.subscribe();

    f.manager.login_with_email("a@b.com", PASSWORD).await.unwrap();
    f.manager.clear_session().unwrap();

    assert_eq!(events.try_recv().unwrap(), SessionEvent::Changed(SessionPhase::Authenticated));
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Changed(SessionPhase::Anonymous));
    assert!(events.try_recv().is_err());
}
