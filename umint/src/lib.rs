//! # U-Mint Marketplace Client - Library Root
//!
//! Client SDK for the U-Mint NFT marketplace backend. Authenticates users by
//! email/password or by Solana wallet, keeps a durable session, and issues the
//! REST calls for collections, NFTs and sales.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │  umint binary (main.rs, clap)                          │
//! └───────────────────────────┬────────────────────────────┘
//!                             │
//! ┌───────────────────────────▼────────────────────────────┐
//! │  app::SessionManager                                   │
//! │  init / login / wallet connect / registration          │
//! └──────┬───────────────────────┬─────────────────┬───────┘
//!        │                       │                 │
//! ┌──────▼───────────┐  ┌────────▼────────┐  ┌─────▼──────────┐
//! │ services::api    │  │ services::      │  │ services::     │
//! │ ApiClient +      │  │ storage         │  │ wallet         │
//! │ auth/collections │  │ (session file)  │  │ (providers)    │
//! │ /nfts/sales      │  │                 │  │                │
//! └──────┬───────────┘  └─────────────────┘  └────────────────┘
//!        │ HTTP/JSON
//!        ▼
//!   U-Mint backend
//! ```
//!
//! ## Module Structure
//!
//! - **app**: [`app::SessionManager`], session state, routes
//! - **core**: errors, configuration, [`core::AuthService`]
//! - **services**: HTTP client and endpoint tables, storage, wallet providers
//! - **debug**: tracing subscriber setup
//! - **utils**: input validation
//!
//! Wire types live in the [`shared`] crate.

pub mod app;
pub mod core;
pub mod debug;
pub mod services;
pub mod utils;
