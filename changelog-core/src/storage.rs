use crate::error::{Error, Result};
use crate::models::{Changelog, ChangelogFilter, ChangelogId};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use uuid::Uuid;

const SCHEMA_VERSION: i32 = 1;

const SELECT_COLUMNS: &str = "SELECT id, version, title, description, raw_git_diff, \
                              generated_content, published, created_at FROM changelogs";

pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let mut storage = Self { conn };
        storage.initialize()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut storage = Self { conn };
        storage.initialize()?;
        Ok(storage)
    }

    fn initialize(&mut self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            CREATE TABLE IF NOT EXISTS changelogs (
                id TEXT PRIMARY KEY,
                version TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                raw_git_diff TEXT,
                generated_content TEXT NOT NULL,
                published INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_changelogs_created ON changelogs(created_at);
            CREATE INDEX IF NOT EXISTS idx_changelogs_published ON changelogs(published);
            "#,
        )?;

        let version: Option<i32> = self
            .conn
            .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
            .optional()?;

        if version.is_none() {
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )?;
        }

        Ok(())
    }

    pub fn create_changelog(&self, changelog: &Changelog) -> Result<()> {
        self.conn.execute(
            "INSERT INTO changelogs (id, version, title, description, raw_git_diff,
                                     generated_content, published, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                changelog.id.to_string(),
                changelog.version,
                changelog.title,
                changelog.description,
                changelog.raw_git_diff,
                changelog.generated_content,
                changelog.published as i32,
                format_timestamp(&changelog.created_at),
            ],
        )?;

        Ok(())
    }

    pub fn get_changelog(&self, id: &ChangelogId) -> Result<Changelog> {
        self.conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id.to_string()],
                changelog_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Newest first.
    pub fn list_changelogs(&self, filter: ChangelogFilter) -> Result<Vec<Changelog>> {
        let sql = if filter.published_only {
            format!(
                "{} WHERE published = 1 ORDER BY created_at DESC, rowid DESC",
                SELECT_COLUMNS
            )
        } else {
            format!("{} ORDER BY created_at DESC, rowid DESC", SELECT_COLUMNS)
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let changelogs = stmt
            .query_map([], changelog_from_row)?
            .collect::<rusqlite::Result<Vec<Changelog>>>()?;

        Ok(changelogs)
    }

    /// Persists the editable fields of `changelog` and returns the stored row.
    /// `published` and `created_at` are never rewritten here.
    pub fn update_changelog(&self, changelog: &Changelog) -> Result<Changelog> {
        let updated = self.conn.execute(
            "UPDATE changelogs SET version = ?1, title = ?2, description = ?3,
                                   raw_git_diff = ?4, generated_content = ?5
             WHERE id = ?6",
            params![
                changelog.version,
                changelog.title,
                changelog.description,
                changelog.raw_git_diff,
                changelog.generated_content,
                changelog.id.to_string(),
            ],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(changelog.id.to_string()));
        }

        self.get_changelog(&changelog.id)
    }

    pub fn set_published(&self, id: &ChangelogId, published: bool) -> Result<Changelog> {
        let updated = self.conn.execute(
            "UPDATE changelogs SET published = ?1 WHERE id = ?2",
            params![published as i32, id.to_string()],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        self.get_changelog(id)
    }

    pub fn delete_changelog(&self, id: &ChangelogId) -> Result<()> {
        let deleted = self.conn.execute(
            "DELETE FROM changelogs WHERE id = ?1",
            params![id.to_string()],
        )?;

        if deleted == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }
}

// Fixed-width so that text ordering matches chronological ordering.
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn changelog_from_row(row: &Row) -> rusqlite::Result<Changelog> {
    let id: String = row.get(0)?;
    let published: i32 = row.get(6)?;
    let created_at: String = row.get(7)?;

    Ok(Changelog {
        id: Uuid::parse_str(&id)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?,
        version: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        raw_git_diff: row.get(4)?,
        generated_content: row.get(5)?,
        published: published != 0,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?
            .with_timezone(&Utc),
    })
}
