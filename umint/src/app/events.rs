//! # Session Events
//!
//! Notifications sent to observers after a session change has been committed.

use crate::app::state::SessionPhase;

/// Session change notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A mutation was committed; carries the resulting phase
    Changed(SessionPhase),
    /// Startup reconciliation finished
    Restored(SessionPhase),
    /// Startup wallet login failed and was skipped (reason)
    WalletLoginSkipped(String),
}
