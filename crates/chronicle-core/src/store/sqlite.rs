//! SQLite-backed key-value store

use std::path::Path;
use std::rc::Rc;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::schema::create_schema;
use super::KeyValueStore;
use crate::error::{ChronicleError, Result};
use crate::map_store_err;

/// Database file name inside the store root
pub const DB_FILE: &str = "chronicle.db";

/// SQLite database holding every bucket of a store
#[derive(Debug, Clone)]
pub struct Database {
    conn: Rc<Connection>,
}

/// One bucket of the database, usable as a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Rc<Connection>,
    bucket: String,
}

impl Database {
    /// Open or create the database at the given store root
    ///
    /// The store only holds derived data, so a corrupt database file is
    /// deleted and recreated empty.
    pub fn open(store_root: &Path) -> Result<Self> {
        let db_path = store_root.join(DB_FILE);

        match Self::open_internal(&db_path) {
            Ok(db) => Ok(db),
            Err(e) if Self::is_corruption_error(&e) && db_path.exists() => {
                tracing::error!(
                    "Database corruption detected at {}: {}. Recreating...",
                    db_path.display(),
                    e
                );

                if let Err(delete_err) = std::fs::remove_file(&db_path) {
                    return Err(ChronicleError::storage(
                        "delete corrupted database",
                        format!("{} (original error: {})", delete_err, e),
                    ));
                }
                let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
                let _ = std::fs::remove_file(db_path.with_extension("db-shm"));

                tracing::info!("Deleted corrupted database, recreating empty store");
                Self::open_internal(&db_path)
            }
            Err(e) => Err(e),
        }
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(map_store_err!("open database"))?;
        create_schema(&conn).map_err(map_store_err!("create database schema"))?;
        Ok(Database {
            conn: Rc::new(conn),
        })
    }

    fn open_internal(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(|e| {
            ChronicleError::storage(&format!("open database at {}", db_path.display()), e)
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(map_store_err!("enable WAL mode"))?;

        create_schema(&conn).map_err(map_store_err!("create database schema"))?;

        Ok(Database {
            conn: Rc::new(conn),
        })
    }

    fn is_corruption_error(error: &ChronicleError) -> bool {
        match error {
            ChronicleError::Storage { reason, .. } => {
                let reason = reason.to_lowercase();
                reason.contains("malformed")
                    || reason.contains("corrupt")
                    || reason.contains("file is not a database")
            }
            _ => false,
        }
    }

    /// A view of one bucket
    pub fn bucket(&self, name: &str) -> SqliteStore {
        SqliteStore {
            conn: Rc::clone(&self.conn),
            bucket: name.to_string(),
        }
    }

    pub fn get_schema_version(&self) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT value FROM index_meta WHERE key = 'schema_version'",
                [],
                |r| {
                    let s: String = r.get(0)?;
                    Ok(s.parse().unwrap_or(0))
                },
            )
            .map_err(map_store_err!("get schema version"))
    }
}

impl SqliteStore {
    /// Number of keys in this bucket
    pub fn count(&self) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM kv WHERE bucket = ?1",
                params![self.bucket],
                |r| r.get(0),
            )
            .map_err(map_store_err!("count keys"))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv WHERE bucket = ?1 AND key = ?2",
                params![self.bucket, key],
                |r| r.get(0),
            )
            .optional()
            .map_err(map_store_err!(&format!("get {}", key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (bucket, key, value, updated) VALUES (?1, ?2, ?3, ?4)",
                params![self.bucket, key, value, Utc::now().to_rfc3339()],
            )
            .map_err(map_store_err!(&format!("set {}", key)))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM kv WHERE bucket = ?1 AND key = ?2",
                params![self.bucket, key],
            )
            .map_err(map_store_err!(&format!("delete {}", key)))?;
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT key FROM kv WHERE bucket = ?1 AND substr(key, 1, length(?2)) = ?2 \
                 ORDER BY key",
            )
            .map_err(map_store_err!("prepare prefix query"))?;

        let keys = stmt
            .query_map(params![self.bucket, prefix], |r| r.get::<_, String>(0))
            .map_err(map_store_err!(&format!("list keys with prefix {}", prefix)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(map_store_err!("read key"))?;
        Ok(keys)
    }
}
