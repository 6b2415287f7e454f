//! Catalog registries and the featured performer rotation

pub mod featured;
pub mod performer_registry;
pub mod recording_registry;

pub use performer_registry::PerformerRegistry;
pub use recording_registry::RecordingRegistry;
