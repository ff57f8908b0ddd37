use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use tokio::sync::Mutex;

use super::Prompt;
use super::repository::PromptRepository;

/// Errors from the SQLite store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("failed to open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS prompts (
    id         TEXT PRIMARY KEY,
    title      TEXT NOT NULL,
    content    TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_prompts_created_at ON prompts (created_at DESC);
";

const SELECT_COLUMNS: &str = "SELECT id, title, content, created_at, updated_at FROM prompts";

/// Prompt store backed by a single SQLite file. The connection is serialized
/// behind an async mutex; every query runs on the caller's task.
pub struct SqlitePromptRepository {
    conn: Mutex<Connection>,
}

impl SqlitePromptRepository {
    /// Open (or create) the database file and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).map_err(|e| StoreError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database with the same schema. Used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Open {
            path: PathBuf::from(":memory:"),
            source: e,
        })?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl PromptRepository for SqlitePromptRepository {
    async fn find_many(&self) -> Result<Vec<Prompt>> {
        let conn = self.conn.lock().await;
        let prompts = query_prompts(
            &conn,
            &format!("{SELECT_COLUMNS} ORDER BY created_at DESC"),
            params![],
        )?;
        Ok(prompts)
    }

    async fn search_many(&self, term: &str) -> Result<Vec<Prompt>> {
        let term = term.trim();
        if term.is_empty() {
            return self.find_many().await;
        }

        let pattern = format!("%{}%", term.to_lowercase());
        let conn = self.conn.lock().await;
        let prompts = query_prompts(
            &conn,
            &format!(
                "{SELECT_COLUMNS} \
                 WHERE lower(title) LIKE ?1 OR lower(content) LIKE ?1 \
                 ORDER BY created_at DESC"
            ),
            params![pattern],
        )?;
        Ok(prompts)
    }

    async fn get(&self, id: &str) -> Result<Option<Prompt>> {
        let conn = self.conn.lock().await;
        let prompt = conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .and_then(|mut stmt| stmt.query_row(params![id], row_to_prompt).optional())
            .map_err(StoreError::Query)?;
        Ok(prompt)
    }

    async fn save(&self, prompt: Prompt) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO prompts (id, title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                 title = excluded.title,
                 content = excluded.content,
                 updated_at = excluded.updated_at",
            params![
                prompt.id,
                prompt.title,
                prompt.content,
                format_ts(&prompt.created_at),
                format_ts(&prompt.updated_at),
            ],
        )
        .map_err(StoreError::Query)?;
        Ok(())
    }
}

fn query_prompts(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Prompt>, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, row_to_prompt)?;

    let mut prompts = Vec::new();
    for row in rows {
        prompts.push(row?);
    }
    Ok(prompts)
}

fn row_to_prompt(row: &rusqlite::Row<'_>) -> rusqlite::Result<Prompt> {
    Ok(Prompt {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: parse_ts(3, row.get::<_, String>(3)?)?,
        updated_at: parse_ts(4, row.get::<_, String>(4)?)?,
    })
}

/// Timestamps are stored as fixed-width UTC RFC 3339 text so that the
/// `ORDER BY created_at DESC` on the raw column is chronological.
fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_ts(idx: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}
