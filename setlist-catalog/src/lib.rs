//! setlist-catalog library - performer and recording catalog service
//!
//! Performers and their recordings behind a JSON HTTP API, with a featured
//! performer that rotates once per calendar day.

use axum::Router;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod clock;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use error::{Error, Result};

use clock::Clock;
use db::SqliteStore;
use services::{PerformerRegistry, RecordingRegistry};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub performers: Arc<PerformerRegistry<SqliteStore>>,
    pub recordings: Arc<RecordingRegistry<SqliteStore>>,
}

impl AppState {
    /// Wire both registries over one database pool
    pub fn new(db: SqlitePool, clock: Arc<dyn Clock>, featured_epoch: NaiveDate) -> Self {
        let store = SqliteStore::new(db);
        let performers = Arc::new(PerformerRegistry::new(store.clone(), clock, featured_epoch));
        let recordings = Arc::new(RecordingRegistry::new(store, Arc::clone(&performers)));
        Self {
            performers,
            recordings,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let performers = Router::new()
        .route(
            "/performers",
            post(api::create_performer).get(api::list_performers),
        )
        .route("/performers/featured", get(api::featured_performer))
        .route(
            "/performers/:id",
            get(api::get_performer).put(api::update_performer),
        );

    let recordings = Router::new()
        .route("/recordings", post(api::create_recording))
        .route(
            "/recordings/performer/:performer_id",
            get(api::recordings_by_performer),
        );

    Router::new()
        .merge(performers)
        .merge(recordings)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
