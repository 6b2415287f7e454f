//! Error types for setlist-catalog
//!
//! Every registry failure is one of four caller-facing kinds (validation,
//! conflict, not found, none available) or an internal failure whose detail
//! stays server-side.

use crate::db::StoreError;
use crate::models::PerformerId;
use thiserror::Error;

/// Main error type for the catalog
#[derive(Error, Debug)]
pub enum Error {
    /// A field constraint was violated
    #[error("{0}")]
    Validation(String),

    /// Performer name already taken
    #[error("A performer with the name '{name}' already exists")]
    Conflict { name: String },

    /// Referenced performer does not exist
    #[error("Performer not found with id {0}")]
    PerformerNotFound(PerformerId),

    /// Featured selection over an empty catalog
    #[error("No performer is available for the day")]
    NoPerformerAvailable,

    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Shared-library errors (configuration, I/O, initialization)
    #[error(transparent)]
    Common(#[from] setlist_common::Error),
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { name } => Error::Conflict { name },
            StoreError::Database(e) => Error::Database(e),
        }
    }
}

impl Error {
    /// True for failures the caller cannot correct
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Database(_) | Error::Common(_))
    }
}

/// Convenience Result type using the catalog Error
pub type Result<T> = std::result::Result<T, Error>;
