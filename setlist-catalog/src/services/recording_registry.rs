//! Recording registry
//!
//! Recordings are created against an existing performer, resolved through
//! the [`PerformerRegistry`], and looked up by performer.

use crate::db::CatalogStore;
use crate::error::{Error, Result};
use crate::models::{NewRecording, PerformerId, Recording};
use crate::services::PerformerRegistry;
use std::sync::Arc;
use tracing::info;

pub struct RecordingRegistry<S> {
    store: S,
    performers: Arc<PerformerRegistry<S>>,
}

impl<S: CatalogStore> RecordingRegistry<S> {
    pub fn new(store: S, performers: Arc<PerformerRegistry<S>>) -> Self {
        Self { store, performers }
    }

    /// Store a recording for an existing performer
    pub async fn create(&self, recording: NewRecording) -> Result<Recording> {
        recording.validate()?;

        let performer = self.performers.get_by_id(recording.performer_id).await?;

        // The performer may vanish between lookup and insert
        let created = self
            .store
            .insert_recording(&recording)
            .await?
            .ok_or(Error::PerformerNotFound(performer.id))?;

        info!(
            "Created recording {} '{}' for performer {} ({})",
            created.id, created.title, performer.id, performer.name
        );
        Ok(created)
    }

    /// Recordings of a performer in creation order
    ///
    /// An unknown performer is `PerformerNotFound`; a known performer without
    /// recordings yields an empty list.
    pub async fn find_by_performer_id(&self, performer_id: PerformerId) -> Result<Vec<Recording>> {
        self.performers.get_by_id(performer_id).await?;
        Ok(self.store.find_recordings_by_performer(performer_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::db::SqliteStore;
    use crate::models::NewPerformer;
    use setlist_common::config::default_featured_epoch;
    use setlist_common::db::init_memory_database;

    struct Fixture {
        performers: Arc<PerformerRegistry<SqliteStore>>,
        recordings: RecordingRegistry<SqliteStore>,
        store: SqliteStore,
    }

    async fn fixture() -> Fixture {
        let store = SqliteStore::new(init_memory_database().await.unwrap());
        let performers = Arc::new(PerformerRegistry::new(
            store.clone(),
            Arc::new(SystemClock),
            default_featured_epoch(),
        ));
        let recordings = RecordingRegistry::new(store.clone(), Arc::clone(&performers));
        Fixture {
            performers,
            recordings,
            store,
        }
    }

    fn recording(performer_id: PerformerId, title: &str, length: i64) -> NewRecording {
        NewRecording {
            title: title.to_string(),
            genre: "Pop".to_string(),
            length,
            performer_id,
        }
    }

    #[tokio::test]
    async fn test_create_recording() {
        let f = fixture().await;
        let nova = f.performers.create(NewPerformer::new("Nova", ["N"])).await.unwrap();

        let created = f
            .recordings
            .create(recording(nova.id, "Test Track 1", 180))
            .await
            .unwrap();

        assert_eq!(created.title, "Test Track 1");
        assert_eq!(created.length, 180);
        assert_eq!(created.performer_id, nova.id);
    }

    #[tokio::test]
    async fn test_create_for_unknown_performer_stores_nothing() {
        let f = fixture().await;

        let err = f
            .recordings
            .create(recording(PerformerId::new(42), "Orphan", 100))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::PerformerNotFound(id) if id == PerformerId::new(42)));
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recordings")
            .fetch_one(f.store.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_create_for_externally_deleted_performer() {
        let f = fixture().await;
        let nova = f.performers.create(NewPerformer::new("Nova", ["N"])).await.unwrap();

        sqlx::query("DELETE FROM performers WHERE id = ?")
            .bind(nova.id.get())
            .execute(f.store.pool())
            .await
            .unwrap();

        let err = f
            .recordings
            .create(recording(nova.id, "Too Late", 100))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::PerformerNotFound(_)));
    }

    #[tokio::test]
    async fn test_length_boundary() {
        let f = fixture().await;
        let nova = f.performers.create(NewPerformer::new("Nova", ["N"])).await.unwrap();

        let zero = f.recordings.create(recording(nova.id, "Silence", 0)).await;
        let one = f.recordings.create(recording(nova.id, "Blip", 1)).await;

        assert!(matches!(zero, Err(Error::Validation(_))));
        assert_eq!(one.unwrap().length, 1);
    }

    #[tokio::test]
    async fn test_find_by_performer() {
        let f = fixture().await;
        let nova = f.performers.create(NewPerformer::new("Nova", ["N"])).await.unwrap();
        let pulsar = f.performers.create(NewPerformer::new("Pulsar", ["P"])).await.unwrap();
        f.recordings.create(recording(nova.id, "First", 120)).await.unwrap();
        f.recordings.create(recording(pulsar.id, "Other", 90)).await.unwrap();
        f.recordings.create(recording(nova.id, "Second", 240)).await.unwrap();

        let found = f.recordings.find_by_performer_id(nova.id).await.unwrap();

        let titles: Vec<&str> = found.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_find_for_performer_without_recordings_is_empty() {
        let f = fixture().await;
        let nova = f.performers.create(NewPerformer::new("Nova", ["N"])).await.unwrap();

        let found = f.recordings.find_by_performer_id(nova.id).await.unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_find_for_unknown_performer() {
        let f = fixture().await;

        let err = f
            .recordings
            .find_by_performer_id(PerformerId::new(7))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::PerformerNotFound(_)));
    }
}
