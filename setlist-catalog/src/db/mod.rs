//! Persistence gateway
//!
//! [`CatalogStore`] is the seam between the registries and storage. The
//! SQLite implementation lives in [`sqlite`].
//!
//! All implementations must satisfy these invariants:
//! - Identifiers are assigned by the store on insert and never reused.
//! - Listing returns performers and recordings in creation order.
//! - Performer name uniqueness is enforced atomically by the store and
//!   reported as [`StoreError::UniqueViolation`], whatever callers checked
//!   beforehand.

use crate::models::{NewPerformer, NewRecording, Performer, PerformerId, Recording};
use async_trait::async_trait;

pub mod sqlite;

pub use sqlite::SqliteStore;

/// Errors from store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Write would duplicate a performer name
    #[error("performer name already exists: {name}")]
    UniqueViolation { name: String },

    /// Any other database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert a performer with its aliases and return it with its new id
    async fn insert_performer(&self, performer: &NewPerformer) -> StoreResult<Performer>;

    /// Overwrite name and aliases of an existing performer
    ///
    /// Returns `Ok(None)` if no performer has this id.
    async fn update_performer(&self, performer: &Performer) -> StoreResult<Option<Performer>>;

    async fn find_performer(&self, id: PerformerId) -> StoreResult<Option<Performer>>;

    /// All performers in creation order
    async fn list_performers(&self) -> StoreResult<Vec<Performer>>;

    async fn performer_name_exists(&self, name: &str) -> StoreResult<bool>;

    /// Insert a recording and return it with its new id
    ///
    /// Returns `Ok(None)` if the referenced performer no longer exists.
    async fn insert_recording(&self, recording: &NewRecording) -> StoreResult<Option<Recording>>;

    /// Recordings linked to a performer, in creation order
    async fn find_recordings_by_performer(
        &self,
        performer_id: PerformerId,
    ) -> StoreResult<Vec<Recording>>;
}
