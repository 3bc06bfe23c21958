//! Database connection and table management.

use crate::error::Result;
use crate::schema;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Main database handle.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    url: String,
}

impl Database {
    /// Open or create a database at the given sqlx URL
    /// (e.g. `sqlite://data/glossa.db`).
    pub async fn open(url: &str, max_connections: u32) -> Result<Self> {
        if let Some(parent) = file_path(url).and_then(|p| p.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        tracing::debug!(url, "opened database");
        Ok(Self { pool, url: url.to_string() })
    }

    /// Open a private in-memory database.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that never expires.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool, url: "sqlite::memory:".to_string() })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Create all tables and indexes if they don't exist.
    pub async fn initialize(&self) -> Result<()> {
        for statement in schema::SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Check if a table exists.
    pub async fn table_exists(&self, name: &str) -> Result<bool> {
        let found: Option<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(found.is_some())
    }

    async fn count_rows(&self, table: &str) -> Result<u64> {
        if !self.table_exists(table).await? {
            return Ok(0);
        }
        // Table names come from the schema constants, never from input.
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    /// Get table statistics.
    pub async fn stats(&self) -> Result<DatabaseStats> {
        Ok(DatabaseStats {
            categories: self.count_rows(schema::TABLE_CATEGORIES).await?,
            terms: self.count_rows(schema::TABLE_TERMS).await?,
            term_details: self.count_rows(schema::TABLE_TERM_DETAILS).await?,
            related_terms: self.count_rows(schema::TABLE_RELATED_TERMS).await?,
            recommendations: self.count_rows(schema::TABLE_RECOMMENDATIONS).await?,
        })
    }
}

/// Extract the filesystem path from a sqlite URL, if it names a file.
fn file_path(url: &str) -> Option<&Path> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let rest = rest.split('?').next().unwrap_or(rest);
    if rest.is_empty() || rest.starts_with(":memory:") {
        return None;
    }
    Some(Path::new(rest))
}

/// Database statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct DatabaseStats {
    pub categories: u64,
    pub terms: u64,
    pub term_details: u64,
    pub related_terms: u64,
    pub recommendations: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_from_url() {
        assert_eq!(file_path("sqlite://data/glossa.db"), Some(Path::new("data/glossa.db")));
        assert_eq!(file_path("sqlite:glossa.db?mode=rwc"), Some(Path::new("glossa.db")));
        assert_eq!(file_path("sqlite::memory:"), None);
        assert_eq!(file_path("postgres://localhost/glossa"), None);
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let db = Database::open_in_memory().await.unwrap();
        db.initialize().await.unwrap();
        db.initialize().await.unwrap();

        assert!(db.table_exists(schema::TABLE_TERMS).await.unwrap());
        assert!(db.table_exists(schema::TABLE_RELATED_TERM_MEMBERS).await.unwrap());
        assert_eq!(db.stats().await.unwrap(), DatabaseStats::default());
    }

    #[tokio::test]
    async fn test_open_creates_file_and_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("glossa.db");
        let url = format!("sqlite://{}", path.display());

        let db = Database::open(&url, 2).await.unwrap();
        db.initialize().await.unwrap();

        assert!(path.exists());
        assert_eq!(db.url(), url);
    }
}
