//! # Session Action Handlers
//!
//! Action bodies, organized by domain. Each takes the manager after its
//! action guard has been acquired, so handlers may call each other freely.

pub(crate) mod auth;
pub(crate) mod registration;
pub(crate) mod wallet;
