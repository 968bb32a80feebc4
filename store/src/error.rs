//! Error types for store operations.
//!
//! # Design
//! The two not-found variants stay separate because the HTTP surface reports
//! them with different messages. Validation failures are their own enum so
//! the validator can be exercised without a store.

use thiserror::Error;

/// A request body failed one of the create/update rules. `Display` is the
/// message returned to the client verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Not a JSON object, an unexpected key, or an empty update body.
    #[error("Invalid request body")]
    InvalidBody,

    #[error("Title is required")]
    TitleRequired,

    /// Not a string, numeric-looking, or blank.
    #[error("Title must be valid string type")]
    TitleInvalid,

    #[error("Title can't exceed 100 characters")]
    TitleTooLong,

    #[error("Status must be a valid string type")]
    StatusInvalid,

    #[error("Status can't exceed 50 characters")]
    StatusTooLong,
}

/// Errors returned by `TodoStore` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("User not found")]
    UserNotFound,

    #[error("Todo not found")]
    TodoNotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::UserNotFound | StoreError::TodoNotFound)
    }
}
