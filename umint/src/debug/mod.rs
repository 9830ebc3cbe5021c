//! # Logging Infrastructure
//!
//! Installs the `tracing` subscriber for the `umint` binary.
//!
//! ## Features
//!
//! - **Daily-rotated log files** when `UMINT_LOG_DIR` is set, written through a
//!   non-blocking appender
//! - **stderr output** otherwise
//! - **JSON lines** with `UMINT_LOG_JSON=1`
//! - **Panic logging**: panics are recorded before the default hook runs
//!
//! ## Usage
//!
//! ```rust,no_run
//! use umint::core::ClientConfig;
//! use umint::debug::{self, LogConfig};
//!
//! let config = ClientConfig::from_env().unwrap();
//! // Keep the guard alive until exit so buffered lines are flushed.
//! let _guard = debug::init_logger(&LogConfig::from(&config)).unwrap();
//!
//! tracing::info!(endpoint = "/users/login", duration_ms = 234, "API call completed");
//! ```
//!
//! ## Configuration
//!
//! - `RUST_LOG`: filter directive (default `umint=info,warn`)
//! - `UMINT_LOG_DIR`: log directory
//! - `UMINT_LOG_JSON`: JSON output (1=on, 0=off)

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init as init_logger;
