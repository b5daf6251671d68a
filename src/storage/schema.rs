//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the session database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per domain; saving a new crawl replaces the row
CREATE TABLE IF NOT EXISTS crawl_sessions (
    domain TEXT PRIMARY KEY,
    seed_url TEXT NOT NULL,
    captured_at TEXT NOT NULL
);

-- Subpage URLs of a session, in enumeration order
CREATE TABLE IF NOT EXISTS session_urls (
    domain TEXT NOT NULL REFERENCES crawl_sessions(domain) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    url TEXT NOT NULL,
    PRIMARY KEY (domain, position)
);
"#;

/// Initializes the database schema
///
/// Creates all tables if they don't exist.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_creation() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(tables, vec!["crawl_sessions", "session_urls"]);
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();
    }
}
