//! Performer registry
//!
//! Creation, update and lookup of performers, plus the featured performer
//! of the day.
//!
//! Name uniqueness is pre-checked here to fail fast, but the store's
//! constraint is authoritative: a uniqueness violation reported by the store
//! surfaces as the same [`Error::Conflict`].

use crate::clock::Clock;
use crate::db::CatalogStore;
use crate::error::{Error, Result};
use crate::models::{NewPerformer, Performer, PerformerId, PerformerPatch};
use crate::services::featured::select_featured;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct PerformerRegistry<S> {
    store: S,
    clock: Arc<dyn Clock>,
    featured_epoch: NaiveDate,
}

impl<S: CatalogStore> PerformerRegistry<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>, featured_epoch: NaiveDate) -> Self {
        Self {
            store,
            clock,
            featured_epoch,
        }
    }

    /// Store a new performer
    pub async fn create(&self, performer: NewPerformer) -> Result<Performer> {
        performer.validate()?;

        if self.store.performer_name_exists(&performer.name).await? {
            warn!("Rejected duplicate performer name '{}'", performer.name);
            return Err(Error::Conflict {
                name: performer.name,
            });
        }

        let created = self.store.insert_performer(&performer).await?;
        info!("Created performer {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Apply a partial update
    ///
    /// Present fields replace the stored ones; the merged record is persisted.
    pub async fn update(&self, id: PerformerId, patch: PerformerPatch) -> Result<Performer> {
        patch.validate()?;

        let mut performer = self.get_by_id(id).await?;

        if let Some(name) = patch.name {
            if name != performer.name {
                if self.store.performer_name_exists(&name).await? {
                    warn!("Rejected rename of performer {} to taken name '{}'", id, name);
                    return Err(Error::Conflict { name });
                }
                performer.name = name;
            }
        }

        if let Some(aliases) = patch.aliases {
            performer.aliases = aliases;
        }

        let updated = self
            .store
            .update_performer(&performer)
            .await?
            .ok_or(Error::PerformerNotFound(id))?;

        info!("Updated performer {} ({})", updated.id, updated.name);
        Ok(updated)
    }

    pub async fn get_by_id(&self, id: PerformerId) -> Result<Performer> {
        self.store
            .find_performer(id)
            .await?
            .ok_or(Error::PerformerNotFound(id))
    }

    /// All performers in creation order
    pub async fn get_all(&self) -> Result<Vec<Performer>> {
        Ok(self.store.list_performers().await?)
    }

    /// Performer featured for the clock's current date
    pub async fn featured_of_the_day(&self) -> Result<Performer> {
        let today = self.clock.today();
        let all = self.store.list_performers().await?;

        let featured = select_featured(&all, self.featured_epoch, today)
            .cloned()
            .ok_or(Error::NoPerformerAvailable)?;

        debug!(
            "Featured performer for {} is {} ({}) of {}",
            today,
            featured.id,
            featured.name,
            all.len()
        );
        Ok(featured)
    }
}
