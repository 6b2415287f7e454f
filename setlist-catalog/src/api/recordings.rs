//! Recording endpoints
//!
//! - `POST /recordings` create for an existing performer
//! - `GET /recordings/performer/:performer_id` recordings of one performer

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{NewRecording, PerformerId, Recording};
use crate::AppState;

/// Request body for `POST /recordings`
#[derive(Debug, Deserialize)]
pub struct RecordingRequest {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub length: Option<i64>,
    pub performer_id: Option<PerformerId>,
}

impl RecordingRequest {
    fn into_new_recording(self) -> Result<NewRecording> {
        let length = self
            .length
            .ok_or_else(|| Error::Validation("Length must be provided".to_string()))?;
        let performer_id = self
            .performer_id
            .ok_or_else(|| Error::Validation("Performer id must be provided".to_string()))?;

        Ok(NewRecording {
            title: self.title.unwrap_or_default(),
            genre: self.genre.unwrap_or_default(),
            length,
            performer_id,
        })
    }
}

/// POST /recordings
pub async fn create_recording(
    State(state): State<AppState>,
    Json(request): Json<RecordingRequest>,
) -> Result<(StatusCode, Json<Recording>)> {
    let recording = state
        .recordings
        .create(request.into_new_recording()?)
        .await?;
    Ok((StatusCode::CREATED, Json(recording)))
}

/// GET /recordings/performer/:performer_id
pub async fn recordings_by_performer(
    State(state): State<AppState>,
    Path(performer_id): Path<PerformerId>,
) -> Result<Json<Vec<Recording>>> {
    Ok(Json(state.recordings.find_by_performer_id(performer_id).await?))
}
