//! # Marketplace Data Transfer Objects
//!
//! The contract between the marketplace client and the backend REST API.
//! Everything here is plain `serde` data; no I/O.
//!
//! ## Structure
//!
//! - **[`dto`]**: request/response bodies
//!   - **[`dto::auth`]**: users, login, registration, wallet bindings
//!   - **[`dto::envelope`]**: bare-or-wrapped user responses
//!   - **[`dto::collections`]**, **[`dto::nfts`]**, **[`dto::sales`]**: marketplace resources
//! - **[`utils`]**: wallet address helpers
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::{Envelope, User};
//!
//! let body = r#"{"user":{"_id":"1","email":"alice@example.com","name":"alice"}}"#;
//! let user: User = serde_json::from_str::<Envelope<User>>(body).unwrap().into_inner();
//! assert_eq!(user.display_name, "alice");
//! ```

pub mod dto;
pub mod utils;

// DTO crate: everything exported is public API
pub use dto::*;
pub use utils::*;
