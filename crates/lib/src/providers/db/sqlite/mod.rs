use crate::{
    errors::PromptError,
    providers::db::storage::{ContentSearch, SearchHistory},
    types::{ContentType, RecordedResult, SearchRecord, SearchResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::{self, Debug};
use tracing::{debug, warn};
use turso::{params, Database, Value as TursoValue};

mod sql;

/// A provider for interacting with a local SQLite database using Turso.
///
/// This provider holds a `Database` instance, which manages a connection
/// pool. When cloned, it shares the same underlying database, allowing for
/// concurrent and shared access to the same database file or in-memory
/// instance.
#[derive(Clone)]
pub struct SqliteProvider {
    /// The Turso database instance. It's cloneable and thread-safe.
    pub db: Database,
}

impl SqliteProvider {
    /// Creates a new `SqliteProvider` from a file path or in-memory.
    ///
    /// # Arguments
    ///
    /// * `db_path`: The path to the SQLite database file. Use ":memory:"
    ///   for a unique, isolated in-memory database. To share an in-memory
    ///   database across multiple `SqliteProvider` instances (e.g., in
    ///   tests), create one provider and then `.clone()` it.
    pub async fn new(db_path: &str) -> Result<Self, PromptError> {
        let db = turso::Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| PromptError::StorageConnection(e.to_string()))?;

        // Enable WAL mode for better concurrency. It has no effect on
        // in-memory databases but is safe to run.
        let conn = db
            .connect()
            .map_err(|e| PromptError::StorageConnection(e.to_string()))?;
        // Use `query` for PRAGMA statements that return a value to avoid
        // "unexpected row" errors.
        conn.query("PRAGMA journal_mode=WAL;", ())
            .await
            .map_err(|e| PromptError::StorageConnection(e.to_string()))?;

        Ok(Self { db })
    }

    /// A helper for tests to pre-populate data by executing multiple SQL
    /// statements.
    pub async fn initialize_with_data(&self, init_sql: &str) -> Result<(), PromptError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| PromptError::StorageConnection(e.to_string()))?;

        for statement in init_sql.split(';').filter(|s| !s.trim().is_empty()) {
            conn.execute(statement, ())
                .await
                .map_err(|e| PromptError::StorageOperationFailed(e.to_string()))?;
        }
        Ok(())
    }

    /// Ensures that all required application tables and indexes exist.
    /// Idempotent and safe to call on every application startup.
    pub async fn initialize_schema(&self) -> Result<(), PromptError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| PromptError::StorageConnection(e.to_string()))?;

        for statement in sql::ALL_TABLE_CREATION_SQL {
            conn.execute(statement, ())
                .await
                .map_err(|e| PromptError::StorageOperationFailed(e.to_string()))?;
        }
        Ok(())
    }
}

impl Debug for SqliteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteProvider").finish_non_exhaustive()
    }
}

impl AsRef<Database> for SqliteProvider {
    fn as_ref(&self) -> &Database {
        &self.db
    }
}

fn text_value(value: TursoValue) -> String {
    match value {
        TursoValue::Text(s) => s,
        _ => String::new(),
    }
}

fn integer_value(value: TursoValue) -> i64 {
    match value {
        TursoValue::Integer(i) => i,
        _ => 0,
    }
}

/// Encodes an embedding as a little-endian f32 BLOB.
fn encode_embedding(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Decodes a little-endian f32 BLOB back into an embedding. Trailing bytes
/// that do not form a full f32 are ignored.
fn decode_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

#[async_trait]
impl ContentSearch for SqliteProvider {
    /// Runs the per-collection keyword query and maps rows into unscored
    /// results (score 0, newest-first). Scoring is the search engine's job.
    async fn keyword_search(
        &self,
        content_type: ContentType,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SearchResult>, PromptError> {
        let statement = match content_type {
            ContentType::Blog => sql::keyword_search_blogs(limit),
            ContentType::Project => sql::keyword_search_projects(limit),
            ContentType::Service => sql::keyword_search_services(limit),
            ContentType::Message => sql::keyword_search_messages(limit),
            ContentType::All => {
                return Err(PromptError::StorageOperationFailed(
                    "keyword search requires a concrete collection, not 'all'".to_string(),
                ))
            }
        };
        let result_type = content_type.result_type().ok_or_else(|| {
            PromptError::StorageOperationFailed(
                "content type does not map to a collection".to_string(),
            )
        })?;

        let pattern = format!("%{}%", query.to_lowercase());
        debug!(collection = content_type.as_str(), %pattern, "--> Executing keyword search");

        let conn = self
            .db
            .connect()
            .map_err(|e| PromptError::StorageConnection(e.to_string()))?;
        let mut rows = conn
            .query(&statement, params![pattern])
            .await
            .map_err(|e| PromptError::StorageQueryFailed(e.to_string()))?;

        let mut results = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| PromptError::StorageQueryFailed(e.to_string()))?
        {
            results.push(SearchResult {
                id: integer_value(row.get_value(0).map_err(storage_op_err)?),
                title: text_value(row.get_value(1).map_err(storage_op_err)?),
                description: text_value(row.get_value(2).map_err(storage_op_err)?),
                content_type,
                result_type,
                score: 0.0,
                created_at: text_value(row.get_value(3).map_err(storage_op_err)?),
                embedding: None,
            });
        }
        Ok(results)
    }
}

fn storage_op_err(e: turso::Error) -> PromptError {
    PromptError::StorageOperationFailed(e.to_string())
}

#[async_trait]
impl SearchHistory for SqliteProvider {
    async fn insert_search(&self, record: &SearchRecord) -> Result<(), PromptError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| PromptError::StorageConnection(e.to_string()))?;

        let embedding = match &record.embedding {
            Some(vector) => TursoValue::Blob(encode_embedding(vector)),
            None => TursoValue::Null,
        };
        let user_id = match &record.user_id {
            Some(user_id) => TursoValue::Text(user_id.clone()),
            None => TursoValue::Null,
        };
        let results_json = serde_json::to_string(&record.results)?;

        conn.execute(
            sql::INSERT_SEARCH,
            params![
                record.query.clone(),
                record.content_type.as_str(),
                embedding,
                results_json,
                user_id,
                record.created_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(storage_op_err)?;
        Ok(())
    }

    async fn recent_searches(
        &self,
        user_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<SearchRecord>, PromptError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| PromptError::StorageConnection(e.to_string()))?;

        let statement = sql::recent_searches(user_id.is_some(), limit);
        let mut rows = match user_id {
            Some(user_id) => conn.query(&statement, params![user_id]).await,
            None => conn.query(&statement, ()).await,
        }
        .map_err(|e| PromptError::StorageQueryFailed(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| PromptError::StorageQueryFailed(e.to_string()))?
        {
            let embedding = match row.get_value(2).map_err(storage_op_err)? {
                TursoValue::Blob(bytes) => Some(decode_embedding(&bytes)),
                _ => None,
            };
            let results_json = text_value(row.get_value(3).map_err(storage_op_err)?);
            let results: Vec<RecordedResult> = match serde_json::from_str(&results_json) {
                Ok(results) => results,
                Err(e) => {
                    warn!("Skipping malformed results payload in search record: {e}");
                    Vec::new()
                }
            };
            let user_id = match row.get_value(4).map_err(storage_op_err)? {
                TursoValue::Text(s) => Some(s),
                _ => None,
            };
            let created_at = text_value(row.get_value(5).map_err(storage_op_err)?);
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_default();

            records.push(SearchRecord {
                query: text_value(row.get_value(0).map_err(storage_op_err)?),
                content_type: ContentType::parse(&text_value(
                    row.get_value(1).map_err(storage_op_err)?,
                ))
                .unwrap_or_default(),
                embedding,
                results,
                user_id,
                created_at,
            });
        }
        Ok(records)
    }
}
