//! Name uniqueness when the registry's pre-check is bypassed
//!
//! `BlindStore` reports every name as free, as if a concurrent writer took it
//! between the check and the write. The storage constraint must still reject
//! the duplicate and the registry must report it as a conflict.

use async_trait::async_trait;
use setlist_catalog::clock::SystemClock;
use setlist_catalog::db::{CatalogStore, SqliteStore, StoreResult};
use setlist_catalog::models::{
    NewPerformer, NewRecording, Performer, PerformerId, PerformerPatch, Recording,
};
use setlist_catalog::services::PerformerRegistry;
use setlist_catalog::Error;
use setlist_common::config::default_featured_epoch;
use setlist_common::db::init_memory_database;
use std::sync::Arc;

struct BlindStore(SqliteStore);

#[async_trait]
impl CatalogStore for BlindStore {
    async fn insert_performer(&self, performer: &NewPerformer) -> StoreResult<Performer> {
        self.0.insert_performer(performer).await
    }

    async fn update_performer(&self, performer: &Performer) -> StoreResult<Option<Performer>> {
        self.0.update_performer(performer).await
    }

    async fn find_performer(&self, id: PerformerId) -> StoreResult<Option<Performer>> {
        self.0.find_performer(id).await
    }

    async fn list_performers(&self) -> StoreResult<Vec<Performer>> {
        self.0.list_performers().await
    }

    async fn performer_name_exists(&self, _name: &str) -> StoreResult<bool> {
        Ok(false)
    }

    async fn insert_recording(&self, recording: &NewRecording) -> StoreResult<Option<Recording>> {
        self.0.insert_recording(recording).await
    }

    async fn find_recordings_by_performer(
        &self,
        performer_id: PerformerId,
    ) -> StoreResult<Vec<Recording>> {
        self.0.find_recordings_by_performer(performer_id).await
    }
}

async fn registry() -> PerformerRegistry<BlindStore> {
    let pool = init_memory_database().await.unwrap();
    PerformerRegistry::new(
        BlindStore(SqliteStore::new(pool)),
        Arc::new(SystemClock),
        default_featured_epoch(),
    )
}

#[tokio::test]
async fn test_late_duplicate_on_create_is_conflict() {
    let registry = registry().await;
    registry.create(NewPerformer::new("Nova", ["N"])).await.unwrap();

    let err = registry
        .create(NewPerformer::new("Nova", ["X"]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Conflict { ref name } if name == "Nova"));
    assert_eq!(
        err.to_string(),
        "A performer with the name 'Nova' already exists"
    );
    assert_eq!(registry.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_late_duplicate_on_update_is_conflict() {
    let registry = registry().await;
    registry.create(NewPerformer::new("Nova", ["N"])).await.unwrap();
    let pulsar = registry.create(NewPerformer::new("Pulsar", ["P"])).await.unwrap();

    let err = registry
        .update(
            pulsar.id,
            PerformerPatch {
                name: Some("Nova".to_string()),
                aliases: Some(["Q".to_string()].into_iter().collect()),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Conflict { .. }));

    // The failed update left nothing behind
    let stored = registry.get_by_id(pulsar.id).await.unwrap();
    assert_eq!(stored.name, "Pulsar");
    assert!(stored.aliases.contains("P"));
    assert!(!stored.aliases.contains("Q"));
}
