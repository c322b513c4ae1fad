//! Repository pattern wrapper for database operations
//!
//! Provides a higher-level, ownership-aware interface over summaries.

use anyhow::Result;

use crate::config::Settings;
use crate::storage::{Database, NewSummary, Summary};

/// Result of an ownership-checked lookup or delete
#[derive(Debug, Clone, PartialEq)]
pub enum Owned<T> {
    Found(T),
    Missing,
    Forbidden,
}

impl<T> Owned<T> {
    /// Map lookup outcomes onto the user-facing error taxonomy
    pub fn into_result(self) -> crate::Result<T> {
        match self {
            Self::Found(value) => Ok(value),
            Self::Missing => Err(crate::Error::NotFound),
            Self::Forbidden => Err(crate::Error::PermissionDenied),
        }
    }
}

/// Repository for managing summaries per user
pub struct Repository {
    db: Database,
}

impl Repository {
    /// Create a new repository
    pub fn new(settings: &Settings) -> Result<Self> {
        let db = Database::open(settings)?;
        Ok(Self { db })
    }

    /// Wrap an already opened database
    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Store a completed summary
    pub fn save(&self, summary: &NewSummary) -> Result<Summary> {
        self.db.insert_summary(summary)
    }

    /// Newest-first history for a user
    pub fn history(&self, user_id: &str, limit: usize) -> Result<Vec<Summary>> {
        self.db.list_summaries(user_id, limit)
    }

    /// Get a summary if it belongs to `user_id`
    pub fn get_owned(&self, user_id: &str, id: i64) -> Result<Owned<Summary>> {
        Ok(match self.db.get_summary(id)? {
            None => Owned::Missing,
            Some(summary) if summary.user_id != user_id => Owned::Forbidden,
            Some(summary) => Owned::Found(summary),
        })
    }

    /// Delete a summary if it belongs to `user_id`
    pub fn delete_owned(&self, user_id: &str, id: i64) -> Result<Owned<()>> {
        match self.get_owned(user_id, id)? {
            Owned::Found(_) => {
                if self.db.delete_summary(id)? {
                    Ok(Owned::Found(()))
                } else {
                    Ok(Owned::Missing)
                }
            }
            Owned::Missing => Ok(Owned::Missing),
            Owned::Forbidden => Ok(Owned::Forbidden),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
