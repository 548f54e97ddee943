//! SQLite database schema for the chronicle store

use rusqlite::{Connection, Result};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

const SCHEMA_SQL: &str = r#"
-- Derived key-value records, partitioned by bucket
CREATE TABLE IF NOT EXISTS kv (
    bucket TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    updated TEXT NOT NULL,
    PRIMARY KEY (bucket, key)
);

-- Store metadata
CREATE TABLE IF NOT EXISTS index_meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute("DROP TABLE IF EXISTS kv", [])?;
    conn.execute("DROP TABLE IF EXISTS index_meta", [])?;
    Ok(())
}

/// Create the schema, recreating it when the stored version is older.
///
/// Everything in the store can be recomputed from the journal, so an old
/// schema is dropped rather than migrated.
pub fn create_schema(conn: &Connection) -> Result<()> {
    let current_version: Option<i32> = conn
        .query_row(
            "SELECT value FROM index_meta WHERE key = 'schema_version'",
            [],
            |r| r.get::<_, String>(0).map(|s| s.parse().unwrap_or(0)),
        )
        .ok();

    match current_version {
        Some(v) if v >= CURRENT_SCHEMA_VERSION => return Ok(()),
        Some(v) => {
            tracing::info!(
                from = v,
                to = CURRENT_SCHEMA_VERSION,
                "recreating store schema"
            );
            drop_all_tables(conn)?;
        }
        None => {}
    }

    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR REPLACE INTO index_meta (key, value) VALUES ('schema_version', ?1)",
        [&CURRENT_SCHEMA_VERSION.to_string()],
    )?;
    Ok(())
}
