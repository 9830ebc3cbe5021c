//! # Backend API Client Module
//!
//! HTTP client and typed endpoint facades for the marketplace backend.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs          - Module exports and documentation
//! ├── client.rs       - ApiClient: headers, cookies, error translation, envelopes
//! ├── auth.rs         - Users: create, login (email/wallet), registration flow
//! ├── collections.rs  - Collection CRUD and membership
//! ├── nfts.rs         - NFT CRUD and collection membership
//! └── sales.rs        - Listings, bids, auctions, on-chain actions
//! ```
//!
//! Facades are free functions taking `&ApiClient`; they hold no state:
//!
//! ```rust,no_run
//! # async fn demo() -> umint::core::ApiResult<()> {
//! use umint::services::api::{collections, ApiClient};
//!
//! let client = ApiClient::with_base_url("http://localhost:8080")?;
//! let all = collections::get_all(&client).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod collections;
pub mod nfts;
pub mod sales;

pub use client::ApiClient;
