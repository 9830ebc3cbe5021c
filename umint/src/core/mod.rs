//! # Core Abstractions
//!
//! Error types, configuration and the service traits the session manager is
//! written against.
//!
//! ## Modules
//!
//! - **[`error`]**: [`ApiError`], [`SessionError`] and their `Result` aliases
//! - **[`config`]**: [`ClientConfig`] loaded from the environment
//! - **[`service`]**: [`AuthService`] for dependency injection
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use umint::core::{AuthService, ClientConfig};
//! use umint::services::api::ApiClient;
//!
//! let config = ClientConfig::from_env().unwrap();
//! // In production: the HTTP client
//! let auth: Arc<dyn AuthService> = Arc::new(ApiClient::new(&config).unwrap());
//! // In tests: any mock implementing AuthService
//! ```

pub mod config;
pub mod error;
pub mod service;

pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, Result, SessionError};
pub use service::AuthService;
