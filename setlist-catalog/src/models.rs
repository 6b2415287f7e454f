//! Catalog entities
//!
//! `Performer` and `Recording` are stored records. `NewPerformer`,
//! `PerformerPatch` and `NewRecording` are the inputs to the registries and
//! carry their own field validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Storage-assigned performer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerformerId(i64);

impl PerformerId {
    pub fn new(id: i64) -> Self {
        PerformerId(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PerformerId {
    fn from(id: i64) -> Self {
        PerformerId(id)
    }
}

impl fmt::Display for PerformerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Storage-assigned recording identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordingId(i64);

impl RecordingId {
    pub fn new(id: i64) -> Self {
        RecordingId(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named musical act
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performer {
    pub id: PerformerId,
    /// Unique across all performers (exact, case-sensitive)
    pub name: String,
    /// Never empty
    pub aliases: BTreeSet<String>,
}

/// Input for creating a performer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerformer {
    pub name: String,
    pub aliases: BTreeSet<String>,
}

impl NewPerformer {
    pub fn new<I, A>(name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            name: name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_aliases(&self.aliases)
    }
}

/// Partial update of a performer
///
/// Absent fields keep their stored value. The identifier is never changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformerPatch {
    pub name: Option<String>,
    pub aliases: Option<BTreeSet<String>>,
}

impl PerformerPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(aliases) = &self.aliases {
            validate_aliases(aliases)?;
        }
        Ok(())
    }
}

/// A titled piece of music linked to exactly one performer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    pub id: RecordingId,
    pub title: String,
    pub genre: String,
    /// Length in seconds, at least 1
    pub length: i64,
    pub performer_id: PerformerId,
}

/// Input for creating a recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecording {
    pub title: String,
    pub genre: String,
    pub length: i64,
    pub performer_id: PerformerId,
}

impl NewRecording {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("Title cannot be empty or blank".to_string()));
        }
        if self.genre.trim().is_empty() {
            return Err(Error::Validation("Genre cannot be empty or blank".to_string()));
        }
        if self.length < 1 {
            return Err(Error::Validation("Length must be at least 1 second".to_string()));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation("Name cannot be null or blank".to_string()));
    }
    Ok(())
}

fn validate_aliases(aliases: &BTreeSet<String>) -> Result<()> {
    if aliases.is_empty() {
        return Err(Error::Validation("Aliases cannot be null or blank".to_string()));
    }
    Ok(())
}
