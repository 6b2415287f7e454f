//! SQLite-backed catalog store
//!
//! Schema is created by `setlist_common::db::init`. Performer names carry a
//! `UNIQUE` constraint; aliases live in `performer_aliases`.

use super::{CatalogStore, StoreError, StoreResult};
use crate::models::{NewPerformer, NewRecording, Performer, PerformerId, Recording, RecordingId};
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

type RecordingRow = (i64, String, String, i64, i64);

/// Catalog store over a shared SQLite pool
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Classify a write failure on `performers.name`
fn name_write_error(err: sqlx::Error, name: &str) -> StoreError {
    let unique = err
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);

    if unique {
        StoreError::UniqueViolation {
            name: name.to_string(),
        }
    } else {
        StoreError::Database(err)
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_foreign_key_violation())
        .unwrap_or(false)
}

fn row_to_recording(row: RecordingRow) -> Recording {
    let (id, title, genre, length, performer_id) = row;
    Recording {
        id: RecordingId::new(id),
        title,
        genre,
        length,
        performer_id: PerformerId::new(performer_id),
    }
}

async fn insert_aliases(
    tx: &mut Transaction<'static, Sqlite>,
    performer_id: i64,
    aliases: &BTreeSet<String>,
) -> Result<(), sqlx::Error> {
    for alias in aliases {
        sqlx::query("INSERT INTO performer_aliases (performer_id, alias) VALUES (?, ?)")
            .bind(performer_id)
            .bind(alias)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl CatalogStore for SqliteStore {
    async fn insert_performer(&self, performer: &NewPerformer) -> StoreResult<Performer> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query("INSERT INTO performers (name) VALUES (?)")
            .bind(&performer.name)
            .execute(&mut *tx)
            .await
            .map_err(|e| name_write_error(e, &performer.name))?
            .last_insert_rowid();

        insert_aliases(&mut tx, id, &performer.aliases).await?;
        tx.commit().await?;

        debug!("Inserted performer {} ({})", id, performer.name);

        Ok(Performer {
            id: PerformerId::new(id),
            name: performer.name.clone(),
            aliases: performer.aliases.clone(),
        })
    }

    async fn update_performer(&self, performer: &Performer) -> StoreResult<Option<Performer>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE performers SET name = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(&performer.name)
        .bind(performer.id.get())
        .execute(&mut *tx)
        .await
        .map_err(|e| name_write_error(e, &performer.name))?
        .rows_affected();

        if updated == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM performer_aliases WHERE performer_id = ?")
            .bind(performer.id.get())
            .execute(&mut *tx)
            .await?;
        insert_aliases(&mut tx, performer.id.get(), &performer.aliases).await?;
        tx.commit().await?;

        debug!("Updated performer {} ({})", performer.id, performer.name);

        Ok(Some(performer.clone()))
    }

    async fn find_performer(&self, id: PerformerId) -> StoreResult<Option<Performer>> {
        let mut tx = self.pool.begin().await?;

        let name: Option<String> = sqlx::query_scalar("SELECT name FROM performers WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(name) = name else {
            return Ok(None);
        };

        let aliases: Vec<String> = sqlx::query_scalar(
            "SELECT alias FROM performer_aliases WHERE performer_id = ? ORDER BY alias",
        )
        .bind(id.get())
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Some(Performer {
            id,
            name,
            aliases: aliases.into_iter().collect(),
        }))
    }

    async fn list_performers(&self) -> StoreResult<Vec<Performer>> {
        // Both reads share one transaction so aliases match the listed rows
        let mut tx = self.pool.begin().await?;

        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM performers ORDER BY id ASC")
                .fetch_all(&mut *tx)
                .await?;

        let alias_rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT performer_id, alias FROM performer_aliases")
                .fetch_all(&mut *tx)
                .await?;
        tx.commit().await?;

        let mut aliases: HashMap<i64, BTreeSet<String>> = HashMap::new();
        for (performer_id, alias) in alias_rows {
            aliases.entry(performer_id).or_default().insert(alias);
        }

        Ok(rows
            .into_iter()
            .map(|(id, name)| Performer {
                id: PerformerId::new(id),
                name,
                aliases: aliases.remove(&id).unwrap_or_default(),
            })
            .collect())
    }

    async fn performer_name_exists(&self, name: &str) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM performers WHERE name = ?)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert_recording(&self, recording: &NewRecording) -> StoreResult<Option<Recording>> {
        let result = sqlx::query(
            "INSERT INTO recordings (title, genre, length_seconds, performer_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&recording.title)
        .bind(&recording.genre)
        .bind(recording.length)
        .bind(recording.performer_id.get())
        .execute(&self.pool)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_rowid(),
            Err(e) if is_foreign_key_violation(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        debug!("Inserted recording {} for performer {}", id, recording.performer_id);

        Ok(Some(Recording {
            id: RecordingId::new(id),
            title: recording.title.clone(),
            genre: recording.genre.clone(),
            length: recording.length,
            performer_id: recording.performer_id,
        }))
    }

    async fn find_recordings_by_performer(
        &self,
        performer_id: PerformerId,
    ) -> StoreResult<Vec<Recording>> {
        let rows: Vec<RecordingRow> = sqlx::query_as(
            r#"
            SELECT id, title, genre, length_seconds, performer_id
            FROM recordings
            WHERE performer_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(performer_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_recording).collect())
    }
}
