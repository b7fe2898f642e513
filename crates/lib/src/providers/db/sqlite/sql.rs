//! # SQLite Specific SQL Queries
//!
//! This module centralizes SQL query strings for the SQLite provider.
//! This keeps the provider logic cleaner and isolates database-specific
//! syntax in one place.

/// All table and index creation statements. Every statement is idempotent
/// (`IF NOT EXISTS`), so running the full set on startup is safe.
pub const ALL_TABLE_CREATION_SQL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS blogs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT NOT NULL DEFAULT '',
        tags TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )",
    "CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        tags TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )",
    "CREATE TABLE IF NOT EXISTS services (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        category TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )",
    "CREATE TABLE IF NOT EXISTS messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        content TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )",
    "CREATE TABLE IF NOT EXISTS searches (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        query TEXT NOT NULL,
        content_type TEXT NOT NULL,
        embedding BLOB,
        results TEXT NOT NULL DEFAULT '[]',
        user_id TEXT,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )",
    "CREATE INDEX IF NOT EXISTS idx_searches_query ON searches(query)",
    "CREATE INDEX IF NOT EXISTS idx_searches_user_recency ON searches(user_id, created_at)",
];

/// Returns the keyword search query for the `blogs` collection.
///
/// All collection searches use `LOWER()` for case-insensitive matching over
/// that collection's own field set, expect a single `?1` pattern parameter
/// (e.g. `%keyword%`), and return rows newest-first.
pub fn keyword_search_blogs(limit: u32) -> String {
    format!(
        "
        SELECT id, title, content, created_at
        FROM blogs
        WHERE LOWER(title) LIKE ?1 OR LOWER(content) LIKE ?1 OR LOWER(tags) LIKE ?1
        ORDER BY created_at DESC
        LIMIT {limit};
    "
    )
}

/// Returns the keyword search query for the `projects` collection.
pub fn keyword_search_projects(limit: u32) -> String {
    format!(
        "
        SELECT id, name, description, created_at
        FROM projects
        WHERE LOWER(name) LIKE ?1 OR LOWER(description) LIKE ?1 OR LOWER(tags) LIKE ?1
        ORDER BY created_at DESC
        LIMIT {limit};
    "
    )
}

/// Returns the keyword search query for the `services` collection.
pub fn keyword_search_services(limit: u32) -> String {
    format!(
        "
        SELECT id, name, description, created_at
        FROM services
        WHERE LOWER(name) LIKE ?1 OR LOWER(description) LIKE ?1 OR LOWER(category) LIKE ?1
        ORDER BY created_at DESC
        LIMIT {limit};
    "
    )
}

/// Returns the keyword search query for the `messages` collection.
pub fn keyword_search_messages(limit: u32) -> String {
    format!(
        "
        SELECT id, name, content, created_at
        FROM messages
        WHERE LOWER(name) LIKE ?1 OR LOWER(content) LIKE ?1
        ORDER BY created_at DESC
        LIMIT {limit};
    "
    )
}

/// The insert statement for one search history record.
pub const INSERT_SEARCH: &str = "
    INSERT INTO searches (query, content_type, embedding, results, user_id, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6);
";

/// Returns the recent-searches query, newest-first. When `filter_user` is
/// set the query expects the user id as `?1`.
pub fn recent_searches(filter_user: bool, limit: u32) -> String {
    let where_clause = if filter_user {
        "WHERE user_id = ?1"
    } else {
        ""
    };
    format!(
        "
        SELECT query, content_type, embedding, results, user_id, created_at
        FROM searches
        {where_clause}
        ORDER BY created_at DESC
        LIMIT {limit};
    "
    )
}
