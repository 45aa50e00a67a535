//! SQLite Document Store 実装
//!
//! `documents (id TEXT PRIMARY KEY, content TEXT)` の 1 テーブルのみを使用します。
//! `rusqlite::Connection` は `Sync` ではないため `Mutex` で包み、
//! クエリは `spawn_blocking` 上で実行して非同期ランタイムを塞がないようにします。

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};

use crate::domain::{Document, DocumentContent, DocumentId, DocumentStore, StoreError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS documents (id TEXT PRIMARY KEY, content TEXT)";

fn unavailable(e: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

pub struct SqliteDocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDocumentStore {
    /// ファイルを開く（存在しなければ作成）。テーブルも必要なら作成する
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(unavailable)?;
        Self::from_connection(conn)
    }

    /// インメモリ DB を開く（テスト用）
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(unavailable)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA).map_err(unavailable)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))?;
            f(&conn)
        })
        .await
        .map_err(unavailable)?
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn create(&self, id: &DocumentId, content: &DocumentContent) -> Result<(), StoreError> {
        let id = id.clone();
        let content = content.clone();
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO documents (id, content) VALUES (?1, ?2)",
                params![id.as_str(), content.as_str()],
            )
            .map(|_| ())
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(err, _)
                    if err.code == ErrorCode::ConstraintViolation =>
                {
                    StoreError::AlreadyExists(id.as_str().to_string())
                }
                other => unavailable(other),
            })
        })
        .await
    }

    async fn upsert(&self, id: &DocumentId, content: &DocumentContent) -> Result<(), StoreError> {
        let id = id.clone();
        let content = content.clone();
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO documents (id, content) VALUES (?1, ?2)",
                params![id.as_str(), content.as_str()],
            )
            .map(|_| ())
            .map_err(unavailable)
        })
        .await
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, StoreError> {
        let id = id.clone();
        self.with_connection(move |conn| {
            let content = conn
                .query_row(
                    "SELECT content FROM documents WHERE id = ?1",
                    params![id.as_str()],
                    |row| row.get::<_, Option<String>>(0),
                )
                .optional()
                .map_err(unavailable)?;
            // content カラムは NULL を許容するので空文字列として扱う
            Ok(content.map(|content| {
                Document::new(id, DocumentContent::from(content.unwrap_or_default()))
            }))
        })
        .await
    }

    async fn update(&self, id: &DocumentId, content: &DocumentContent) -> Result<(), StoreError> {
        let id = id.clone();
        let content = content.clone();
        self.with_connection(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE documents SET content = ?1 WHERE id = ?2",
                    params![content.as_str(), id.as_str()],
                )
                .map_err(unavailable)?;
            if changed == 0 {
                return Err(StoreError::NotFound(id.into_string()));
            }
            Ok(())
        })
        .await
    }
}
