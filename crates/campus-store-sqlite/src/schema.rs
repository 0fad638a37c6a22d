//! SQL schema for the Campus360 SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per document. Documents are never updated or deleted.
CREATE TABLE IF NOT EXISTS documents (
    doc_id      TEXT PRIMARY KEY,   -- opaque store-assigned identifier
    db_name     TEXT NOT NULL,      -- logical database the document belongs to
    collection  TEXT NOT NULL,
    body        TEXT NOT NULL       -- JSON object, without the identifier
);

CREATE INDEX IF NOT EXISTS documents_collection_idx
    ON documents(db_name, collection);

PRAGMA user_version = 1;
";
