//! # Utility Functions
//!
//! ## Modules
//!
//! - **[`validation`]**: Input validation for the CLI (emails, usernames, passwords, codes)
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Cross-crate utilities (address formatting, wallet usernames)
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
