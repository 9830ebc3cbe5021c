//! # Services Module
//!
//! External collaborators of the session manager.
//!
//! ## Module Overview
//!
//! ```text
//! services/
//! ├── api/         - Backend HTTP client and per-domain endpoint tables
//! │                  (auth, collections, nfts, sales)
//! ├── storage.rs   - Durable key-value storage for the persisted user
//! └── wallet.rs    - Wallet providers (Phantom / Solflare)
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    SessionManager                       │
//! │                                                         │
//! │  ┌────────────┐   ┌────────────────┐   ┌────────────┐   │
//! │  │ ApiClient  │   │ SessionStorage │   │  Wallet    │   │
//! │  │ (api/)     │   │ (storage.rs)   │   │  Registry  │   │
//! │  └─────┬──────┘   └───────┬────────┘   └─────┬──────┘   │
//! └────────┼──────────────────┼──────────────────┼──────────┘
//!          │ HTTP/JSON        │ file             │ keypair file
//!          ▼                  ▼                  ▼
//!   U-Mint backend    ~/.umint/session.json   ~/.config/solana/id.json
//! ```

pub mod api;
pub mod storage;
pub mod wallet;
