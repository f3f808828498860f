//! Article store
//!
//! Persists articles in SQLite and serves the most recent one.
//!
//! ## Ordering
//!
//! "Latest" means the greatest `created_at`. Articles created within the
//! same microsecond are ordered by insertion (SQLite rowid), so the later
//! insert wins.
//!
//! ## Access
//!
//! Writers open the database read-write ([`ArticleStore::open`]); readers
//! open it read-only ([`ArticleStore::open_read_only`]) and cannot modify
//! it.
//!
//! ## Usage
//!
//! ```ignore
//! let store = ArticleStore::open(&config)?;
//! let id = store.create(&NewArticle::new("Title", "Subtitle", blocks))?;
//!
//! let reader = ArticleStore::open_read_only(&config.sqlite_path())?;
//! let latest = reader.latest()?;
//! ```

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::models::{Article, ContentBlock, NewArticle};
use crate::storage::{init_schema, needs_init, StoreError, StoreResult};

/// How long a connection waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed article store
pub struct ArticleStore {
    conn: Connection,
}

impl ArticleStore {
    /// Open the store read-write, creating the database if needed
    pub fn open(config: &Config) -> StoreResult<Self> {
        let path = config.sqlite_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        Self::open_path(&path)
    }

    /// Open a database file read-write, initializing the schema if needed
    pub fn open_path(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        if needs_init(&conn) {
            debug!(path = ?path, "initializing article schema");
            init_schema(&conn)?;
        }

        Ok(Self { conn })
    }

    /// Open an existing database file read-only
    ///
    /// Never creates the file; a missing database is [`StoreError::NotFound`].
    pub fn open_read_only(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            return Err(StoreError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Persist a new article, returning its assigned identifier
    pub fn create(&self, article: &NewArticle) -> StoreResult<Uuid> {
        self.create_at(article, Utc::now())
    }

    /// Persist a new article with an explicit creation time
    pub fn create_at(&self, article: &NewArticle, created_at: DateTime<Utc>) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        let content = serde_json::to_string(&article.content)?;

        self.conn.execute(
            "INSERT INTO articles (id, title, subtitle, content, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id.to_string(),
                article.title,
                article.subtitle,
                content,
                created_at.timestamp_micros()
            ],
        )?;

        debug!(%id, blocks = article.content.len(), "stored article");
        Ok(id)
    }

    /// The most recently created article, if any
    pub fn latest(&self) -> StoreResult<Option<Article>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, title, subtitle, content, created_at FROM articles
                 ORDER BY created_at DESC, rowid DESC LIMIT 1",
                [],
                |row| {
                    Ok(ArticleRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        subtitle: row.get(2)?,
                        content: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?;

        row.map(ArticleRow::hydrate).transpose()
    }

    /// Number of stored articles
    pub fn count(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

/// Raw row as read from SQLite
struct ArticleRow {
    id: String,
    title: String,
    subtitle: String,
    content: String,
    created_at: i64,
}

impl ArticleRow {
    fn hydrate(self) -> StoreResult<Article> {
        let id = Uuid::parse_str(&self.id).map_err(|e| StoreError::CorruptRow {
            id: self.id.clone(),
            details: format!("invalid id: {}", e),
        })?;

        let created_at =
            DateTime::<Utc>::from_timestamp_micros(self.created_at).ok_or_else(|| {
                StoreError::CorruptRow {
                    id: self.id.clone(),
                    details: format!("timestamp out of range: {}", self.created_at),
                }
            })?;

        let content: Vec<ContentBlock> = serde_json::from_str(&self.content)?;

        Ok(Article {
            id,
            title: self.title,
            subtitle: self.subtitle,
            content,
            created_at,
        })
    }
}
