//! Performer endpoints
//!
//! - `POST /performers` create
//! - `PUT /performers/:id` partial update
//! - `GET /performers` list in creation order
//! - `GET /performers/:id` lookup
//! - `GET /performers/featured` featured performer of the day

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::collections::BTreeSet;

use crate::error::Error;
use crate::models::{NewPerformer, Performer, PerformerId, PerformerPatch};
use crate::AppState;

/// Request body for create and update
///
/// On create both fields are required; on update absent fields are left
/// unchanged.
#[derive(Debug, Deserialize)]
pub struct PerformerRequest {
    pub name: Option<String>,
    pub aliases: Option<BTreeSet<String>>,
}

impl PerformerRequest {
    fn into_new_performer(self) -> NewPerformer {
        NewPerformer {
            name: self.name.unwrap_or_default(),
            aliases: self.aliases.unwrap_or_default(),
        }
    }

    fn into_patch(self) -> PerformerPatch {
        PerformerPatch {
            name: self.name,
            aliases: self.aliases,
        }
    }
}

/// POST /performers
pub async fn create_performer(
    State(state): State<AppState>,
    Json(request): Json<PerformerRequest>,
) -> Result<(StatusCode, Json<Performer>), Error> {
    let performer = state
        .performers
        .create(request.into_new_performer())
        .await?;
    Ok((StatusCode::CREATED, Json(performer)))
}

/// PUT /performers/:id
pub async fn update_performer(
    State(state): State<AppState>,
    Path(id): Path<PerformerId>,
    Json(request): Json<PerformerRequest>,
) -> Result<Json<Performer>, Error> {
    let performer = state.performers.update(id, request.into_patch()).await?;
    Ok(Json(performer))
}

/// GET /performers
pub async fn list_performers(State(state): State<AppState>) -> Result<Json<Vec<Performer>>, Error> {
    Ok(Json(state.performers.get_all().await?))
}

/// GET /performers/:id
pub async fn get_performer(
    State(state): State<AppState>,
    Path(id): Path<PerformerId>,
) -> Result<Json<Performer>, Error> {
    Ok(Json(state.performers.get_by_id(id).await?))
}

/// GET /performers/featured
pub async fn featured_performer(State(state): State<AppState>) -> Result<Json<Performer>, Error> {
    Ok(Json(state.performers.featured_of_the_day().await?))
}
