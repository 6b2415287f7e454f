//! HTTP API handlers for setlist-catalog

pub mod error;
pub mod health;
pub mod performers;
pub mod recordings;

pub use error::ErrorResponse;
pub use health::health_routes;
pub use performers::{
    create_performer, featured_performer, get_performer, list_performers, update_performer,
};
pub use recordings::{create_recording, recordings_by_performer};
