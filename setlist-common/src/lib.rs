//! # Setlist Common Library
//!
//! Shared code for the Setlist catalog service:
//! - Error and result types
//! - Bootstrap configuration loading
//! - Database initialization and schema
//! - Calendar-day utilities

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
