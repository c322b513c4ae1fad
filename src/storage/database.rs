//! SQLite database management

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::config::Settings;
use crate::storage::models::{NewSummary, Summary};

/// Database wrapper for ringkas
pub struct Database {
    conn: Connection,
}

const CURRENT_SCHEMA_VERSION: i64 = 1;

const SUMMARY_COLUMNS: &str = "id, user_id, source_kind, summary_style, original_source, \
     processed_text, summary_text, created_at";

impl Database {
    /// Open or create the database
    pub fn open(settings: &Settings) -> Result<Self> {
        let db_path = settings.database_path();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        Self::open_path(&db_path)
    }

    /// Open database at a specific path (useful for testing)
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize database schema
    fn initialize(&self) -> Result<()> {
        let current_version = self.schema_version()?;
        if current_version > CURRENT_SCHEMA_VERSION {
            anyhow::bail!(
                "Database schema version {} is newer than supported version {}",
                current_version,
                CURRENT_SCHEMA_VERSION
            );
        }

        if current_version < 1 {
            self.migrate_to_v1()?;
            self.set_schema_version(1)?;
        }

        Ok(())
    }

    /// Current schema version tracked in PRAGMA user_version.
    pub fn schema_version(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?)
    }

    fn set_schema_version(&self, version: i64) -> Result<()> {
        self.conn
            .execute(&format!("PRAGMA user_version = {}", version), [])?;
        Ok(())
    }

    fn migrate_to_v1(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS summaries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                source_kind TEXT NOT NULL,
                summary_style TEXT NOT NULL,
                original_source TEXT,
                processed_text TEXT,
                summary_text TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_summaries_user_created
                ON summaries(user_id, created_at DESC);
            "#,
        )?;

        Ok(())
    }

    /// Insert a summary, returning it with its assigned id and timestamp
    pub fn insert_summary(&self, summary: &NewSummary) -> Result<Summary> {
        let created_at = Utc::now();

        self.conn.execute(
            r#"
            INSERT INTO summaries (user_id, source_kind, summary_style, original_source, processed_text, summary_text, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                summary.user_id,
                summary.source_kind.as_str(),
                summary.style.as_str(),
                summary.original_source,
                summary.processed_text,
                summary.summary_text,
                created_at.timestamp_millis(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_summary(id)?
            .context("Inserted summary could not be read back")
    }

    /// Get a summary by ID
    pub fn get_summary(&self, id: i64) -> Result<Option<Summary>> {
        let summary = self
            .conn
            .query_row(
                &format!("SELECT {SUMMARY_COLUMNS} FROM summaries WHERE id = ?1"),
                params![id],
                Self::row_to_summary,
            )
            .optional()?;

        Ok(summary)
    }

    /// List a user's summaries, newest first
    pub fn list_summaries(&self, user_id: &str, limit: usize) -> Result<Vec<Summary>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SUMMARY_COLUMNS}
             FROM summaries
             WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC
             LIMIT ?2"
        ))?;

        let summaries = stmt
            .query_map(params![user_id, limit as i64], Self::row_to_summary)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(summaries)
    }

    /// Delete a summary; returns whether a row was removed
    pub fn delete_summary(&self, id: i64) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM summaries WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    /// Number of stored summaries across all users
    pub fn count_summaries(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM summaries", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn row_to_summary(row: &rusqlite::Row) -> rusqlite::Result<Summary> {
        let kind: String = row.get(2)?;
        let style: String = row.get(3)?;
        let created_millis: i64 = row.get(7)?;

        Ok(Summary {
            id: row.get(0)?,
            user_id: row.get(1)?,
            source_kind: kind
                .parse()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?,
            style: style
                .parse()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?,
            original_source: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            processed_text: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            summary_text: row.get(6)?,
            created_at: Utc
                .timestamp_millis_opt(created_millis)
                .single()
                .ok_or(rusqlite::Error::IntegralValueOutOfRange(7, created_millis))?,
        })
    }
}
