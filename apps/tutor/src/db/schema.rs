//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Key-value table backing the persistence gateway.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Bytes used by every row except the one being replaced.
pub const USED_BYTES_EXCLUDING: &str = r#"
SELECT COALESCE(SUM(length(CAST(key AS BLOB)) + length(CAST(value AS BLOB))), 0)
FROM kv
WHERE key != ?1
"#;

/// Bytes used by every row in the table.
pub const USED_BYTES: &str = r#"
SELECT COALESCE(SUM(length(CAST(key AS BLOB)) + length(CAST(value AS BLOB))), 0)
FROM kv
"#;
