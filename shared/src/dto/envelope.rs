//! # Response Envelopes
//!
//! Some user endpoints answer with the user object itself, others wrap it as
//! `{ "user": {...}, "token": "...", "message": "..." }`. [`Envelope`] accepts
//! both so callers only ever see the inner payload.

use serde::{Deserialize, Serialize};

/// Either a wrapped `{ "user": T }` payload or a bare `T`.
///
/// The wrapped form is tried first; a bare object has no `user` field and
/// falls through to [`Envelope::Bare`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped {
        user: T,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Bare(T),
}

impl<T> Envelope<T> {
    /// Unwrap the payload regardless of shape.
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { user, .. } => user,
            Envelope::Bare(inner) => inner,
        }
    }

    /// Session token, when the backend sent one alongside the user.
    pub fn token(&self) -> Option<&str> {
        match self {
            Envelope::Wrapped { token, .. } => token.as_deref(),
            Envelope::Bare(_) => None,
        }
    }
}
