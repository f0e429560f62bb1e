//! Page error taxonomy.
//!
//! Two classes of failure flow out of the context layer. Programming errors
//! (`InvalidTransition`, `Precondition`) indicate caller misuse and are never
//! caught internally. Recoverable conditions (`NotFound`, `Tampered`) are
//! ordinary results the caller is expected to handle — a missing course
//! becomes a user-facing "not found" page, a tampered snapshot falls back to
//! reconstructing the context from the live request.

use thiserror::Error;

use crate::state::PageState;

/// Result alias used across all pageflow crates.
pub type PageResult<T> = Result<T, PageError>;

#[derive(Debug, Error)]
pub enum PageError {
    /// Illegal lifecycle advance: skip, regress, or already done.
    #[error("invalid page state transition: {from} -> {to}")]
    InvalidTransition { from: PageState, to: PageState },

    /// Caller misuse: mutating frozen fields, module before course,
    /// forcing a theme after resolution, and similar.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A referenced entity is absent in the backing store.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// Snapshot digest mismatch on restore (e.g. session secret rotated).
    #[error("edit snapshot failed integrity check")]
    Tampered,

    /// Serialization plumbing fault. Not part of the public taxonomy
    /// contract; callers treat it like a programming error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PageError {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the caller is expected to handle this error as an ordinary
    /// outcome rather than a bug.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Tampered)
    }
}
