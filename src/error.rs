//! Error values returned by the catalog, the user ledger and the lending service.

use thiserror::Error;

use crate::modules::users::models::UserId;

/// Every way a lending operation can be refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Book '{title}' not found in catalog.")]
    BookNotFound { title: String },

    #[error("User with ID {user_id} not found.")]
    UserNotFound { user_id: UserId },

    #[error("Book '{title}' is currently unavailable.")]
    BookUnavailable { title: String },

    #[error("User {user_id} has not borrowed '{title}'.")]
    NotHeld { user_id: UserId, title: String },

    #[error("returning '{title}' would exceed its {total} copies")]
    OverReturn { title: String, total: u32 },
}

impl LibraryError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a book not found error
    pub fn book_not_found(title: impl Into<String>) -> Self {
        Self::BookNotFound {
            title: title.into(),
        }
    }

    /// Create a user not found error
    pub fn user_not_found(user_id: UserId) -> Self {
        Self::UserNotFound { user_id }
    }

    /// Create a book unavailable error
    pub fn book_unavailable(title: impl Into<String>) -> Self {
        Self::BookUnavailable {
            title: title.into(),
        }
    }

    /// Create a not held error
    pub fn not_held(user_id: UserId, title: impl Into<String>) -> Self {
        Self::NotHeld {
            user_id,
            title: title.into(),
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::BookNotFound { .. } => "book_not_found",
            Self::UserNotFound { .. } => "user_not_found",
            Self::BookUnavailable { .. } => "book_unavailable",
            Self::NotHeld { .. } => "not_held",
            Self::OverReturn { .. } => "over_return",
        }
    }
}
