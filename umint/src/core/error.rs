//! # Common Error Types
//!
//! Error handling for the marketplace client.
//!
//! ## Error Categories
//!
//! - [`ApiError`]: backend communication (unreachable server, rejected request,
//!   malformed response)
//! - [`SessionError`]: everything a session action can fail with; wraps
//!   [`ApiError`], wallet failures and storage failures
//!
//! Wallet and storage errors are defined beside their services
//! ([`crate::services::wallet::WalletError`], [`crate::services::storage::StorageError`])
//! and convert into [`SessionError`] with `?`.
//!
//! ## Usage Pattern
//!
//! ```rust
//! use umint::core::error::ApiError;
//!
//! let err = ApiError::Server { status: 404, message: "not found".to_string() };
//! assert!(err.is_not_found());
//! assert_eq!(err.to_string(), "not found");
//! ```

use thiserror::Error;

use crate::services::storage::StorageError;
use crate::services::wallet::{WalletError, WalletKind};

/// Backend communication error.
///
/// The split between [`ApiError::Connectivity`] and [`ApiError::Server`] is
/// what callers use to tell "check that the server is up" apart from
/// "the server said no".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No HTTP response was received (connection refused, DNS failure, reset).
    #[error("Unable to connect to {url}. Make sure the API server is running and accepts requests from this client.")]
    Connectivity { url: String },

    /// The configured request timeout elapsed before a response arrived.
    ///
    /// The server may have been reached and still be working on the request.
    #[error("Request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// The server answered with a non-success status.
    ///
    /// `message` comes from the error body's `message` field, or is
    /// `"Error {status}: {reason}"` when the body has none.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A success response whose body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The request could not be built (bad URL, unserializable body).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status, for errors that came with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Connectivity { .. })
    }

    /// The backend has no record of the requested identity.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The backend refused to create something that already exists.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

/// Convenience alias for backend calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure of a session action.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The requested wallet provider is not installed or not registered.
    #[error("{0} wallet is not available")]
    WalletUnavailable(WalletKind),

    /// The user declined the wallet prompt or the provider failed.
    #[error("Wallet request rejected: {0}")]
    WalletRejected(String),

    /// A registration step was invoked before `start_registration`.
    #[error("Registration has not been started")]
    RegistrationNotStarted,

    /// The persisted session could not be encoded or decoded.
    ///
    /// A stored copy that fails to decode at startup is discarded instead of
    /// being reported.
    #[error("Stored session is unreadable: {0}")]
    Unparseable(String),

    /// Durable storage could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    /// The named action was refused because another one is still running.
    #[error("Cannot {0}: another session action is in progress")]
    ActionInFlight(&'static str),
}

impl From<WalletError> for SessionError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Unavailable(kind) => SessionError::WalletUnavailable(kind),
            WalletError::Rejected(msg) => SessionError::WalletRejected(msg),
        }
    }
}

/// Convenience type alias for `Result<T, SessionError>`.
pub type Result<T> = std::result::Result<T, SessionError>;
