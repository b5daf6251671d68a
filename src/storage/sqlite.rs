//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the SessionStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{SessionStore, StorageError, StorageResult};
use crate::storage::CrawlSession;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// SQLite session store
pub struct SqliteSessionStore {
    conn: Mutex<Connection>,
    /// Backing file; `None` for in-memory databases
    path: Option<PathBuf>,
}

impl SqliteSessionStore {
    /// Opens (or creates) the session database at `path`
    ///
    /// A file that is not a SQLite database, or is corrupt, is moved aside to
    /// `<path>.corrupt` and replaced by a fresh database. Other initialization
    /// failures are logged and accepted: loads then report no sessions and saves
    /// return errors.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = match open_configured(path) {
            Ok(conn) => conn,
            Err(e) if is_corruption(&e) => {
                tracing::warn!(
                    "Session database {} is unreadable ({}), starting a new one",
                    path.display(),
                    e
                );
                rebuild(path)?
            }
            Err(e) => {
                tracing::warn!(
                    "Session database {} could not be initialized: {}",
                    path.display(),
                    e
                );
                Connection::open(path)?
            }
        };

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A panic while holding the lock leaves the connection itself usable
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Configures SQLite and creates the schema
fn configure(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
    ",
    )?;
    initialize_schema(conn)
}

fn open_configured(path: &Path) -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open(path)?;
    configure(&conn)?;
    Ok(conn)
}

/// True for errors meaning the file is not a usable database
fn is_corruption(error: &rusqlite::Error) -> bool {
    matches!(
        error.sqlite_error_code(),
        Some(ErrorCode::NotADatabase) | Some(ErrorCode::DatabaseCorrupt)
    )
}

/// Moves an unreadable database file aside and opens a fresh one in its place
fn rebuild(path: &Path) -> StorageResult<Connection> {
    let mut aside = path.as_os_str().to_owned();
    aside.push(".corrupt");

    if let Err(e) = std::fs::rename(path, &aside) {
        tracing::warn!("Could not move {} aside: {}", path.display(), e);
        std::fs::remove_file(path)?;
    }

    Ok(open_configured(path)?)
}

/// Replaces one domain's session inside a transaction
fn write_session(
    conn: &mut Connection,
    domain: &str,
    seed_url: &str,
    subpage_urls: &[String],
) -> StorageResult<()> {
    let tx = conn.transaction()?;
    initialize_schema(&tx)?;

    tx.execute(
        "DELETE FROM session_urls WHERE domain = ?1",
        params![domain],
    )?;
    tx.execute(
        "INSERT OR REPLACE INTO crawl_sessions (domain, seed_url, captured_at) VALUES (?1, ?2, ?3)",
        params![domain, seed_url, Utc::now().to_rfc3339()],
    )?;

    {
        let mut insert = tx.prepare(
            "INSERT INTO session_urls (domain, position, url) VALUES (?1, ?2, ?3)",
        )?;
        for (position, url) in subpage_urls.iter().enumerate() {
            insert.execute(params![domain, position as i64, url])?;
        }
    }

    tx.commit()?;
    Ok(())
}

/// Reads one domain's session, if present
fn read_session(conn: &Connection, domain: &str) -> StorageResult<Option<CrawlSession>> {
    let row: Option<(String, String)> = conn
        .query_row(
            "SELECT seed_url, captured_at FROM crawl_sessions WHERE domain = ?1",
            params![domain],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (seed_url, captured_at) = match row {
        Some(row) => row,
        None => return Ok(None),
    };

    let captured_at = DateTime::parse_from_rfc3339(&captured_at)
        .map_err(|e| StorageError::Database(format!("Invalid captured_at for {}: {}", domain, e)))?
        .with_timezone(&Utc);

    let mut stmt =
        conn.prepare("SELECT url FROM session_urls WHERE domain = ?1 ORDER BY position")?;
    let subpage_urls = stmt
        .query_map(params![domain], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;

    Ok(Some(CrawlSession {
        domain: domain.to_string(),
        seed_url,
        subpage_urls,
        captured_at,
    }))
}

impl SessionStore for SqliteSessionStore {
    fn save(&self, domain: &str, seed_url: &str, subpage_urls: &[String]) -> StorageResult<()> {
        let mut conn = self.lock();

        match write_session(&mut conn, domain, seed_url, subpage_urls) {
            Err(StorageError::Sqlite(e)) if is_corruption(&e) => {
                let path = match &self.path {
                    Some(path) => path,
                    None => return Err(e.into()),
                };
                tracing::warn!(
                    "Session database {} became unreadable ({}), starting a new one",
                    path.display(),
                    e
                );
                *conn = rebuild(path)?;
                write_session(&mut conn, domain, seed_url, subpage_urls)?;
            }
            result => result?,
        }

        tracing::debug!(
            "Saved crawl session for {} ({} subpages)",
            domain,
            subpage_urls.len()
        );
        Ok(())
    }

    fn load_session(&self, domain: &str) -> Option<CrawlSession> {
        let conn = self.lock();
        match read_session(&conn, domain) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Could not read crawl session for {}: {}", domain, e);
                None
            }
        }
    }
}
