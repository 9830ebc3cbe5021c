//! # Data Transfer Objects (DTOs)
//!
//! Structures exchanged with the marketplace REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Users, login, registration and wallet bindings
//! - [`envelope`] - Bare-or-wrapped user response normalization
//! - [`collections`] - NFT collections
//! - [`nfts`] - NFTs
//! - [`sales`] - Listings, auctions and bids
//!
//! ## Serialization Format
//!
//! The backend is document-oriented, so the wire format differs from the Rust names:
//!
//! - **Field naming**: camelCase (`#[serde(rename_all = "camelCase")]`)
//! - **Identifiers**: `_id`
//! - **Optional fields**: omitted when `None`
//! - **Enums**: lowercase strings
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /users/login
//! Content-Type: application/json
//!
//! { "email": "alice@example.com", "password": "MyPassword123!" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "user": { "_id": "64f1c0", "email": "alice@example.com", "name": "alice" },
//!   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
//! }
//! ```

pub mod auth;
pub mod collections;
pub mod envelope;
pub mod nfts;
pub mod sales;

pub use auth::*;
pub use collections::*;
pub use envelope::*;
pub use nfts::*;
pub use sales::*;
