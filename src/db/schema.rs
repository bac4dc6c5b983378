//! SQL DDL for the local store.
//! Table names mirror the hosted backend so the two backends stay interchangeable.

/// SQLite schema with:
/// - `Novels`, `Books`, `Users` keyed by `id`
/// - `Library` keyed by the composite `(user_id, novel_id)`
/// - `Books.novel_id` indexed for the per-novel listing
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS "Novels" (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    cover TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    chapters INTEGER
);

CREATE TABLE IF NOT EXISTS "Books" (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    novel_id INTEGER NOT NULL REFERENCES "Novels"(id),
    title TEXT NOT NULL,
    cover TEXT NOT NULL DEFAULT '',
    volume INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_books_novel_id ON "Books"(novel_id);

CREATE TABLE IF NOT EXISTS "Users" (
    id TEXT PRIMARY KEY,
    admin INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS "Library" (
    user_id TEXT NOT NULL,
    novel_id INTEGER NOT NULL,
    status TEXT NOT NULL,
    score INTEGER NULL,
    progress INTEGER NULL,
    date_started TEXT NULL, -- YYYY-MM-DD
    date_finished TEXT NULL, -- YYYY-MM-DD
    PRIMARY KEY (user_id, novel_id)
)
"#;
