//! Storage module for ringkas
//!
//! Persists summaries per user in SQLite.

mod database;
mod models;
mod repository;

pub use database::Database;
pub use models::{NewSummary, Summary};
pub use repository::{Owned, Repository};
