//! SQL schema for the Swot SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated
//! on the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Foreign keys cascade-delete a user's favorites and flashcards; papers
/// are only ever pruned by the directory sync, which cascades into
/// favorites.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL    -- PHC string (argon2)
);

-- Static reference data, seeded at init.
CREATE TABLE IF NOT EXISTS subjects (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL
);

-- Immutable after seeding; rows track the files in the papers directory.
CREATE TABLE IF NOT EXISTS papers (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    subject_id   INTEGER NOT NULL REFERENCES subjects(id),
    year         INTEGER NOT NULL,
    level        TEXT NOT NULL CHECK(level IN ('HL', 'SL')),
    type         TEXT NOT NULL CHECK(type IN ('QP', 'MS')),
    paper_number INTEGER NOT NULL,
    filename     TEXT UNIQUE NOT NULL
);

-- Presence of a row is the only state: present = favorited.
CREATE TABLE IF NOT EXISTS favorites (
    user_id  INTEGER NOT NULL REFERENCES users(id)  ON DELETE CASCADE,
    paper_id INTEGER NOT NULL REFERENCES papers(id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, paper_id)
);

CREATE TABLE IF NOT EXISTS flashcards (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id          INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    subject_id       INTEGER NOT NULL REFERENCES subjects(id),
    question         TEXT NOT NULL,
    answer           TEXT NOT NULL,
    leitner_box      INTEGER NOT NULL DEFAULT 1,
    next_review_date TEXT NOT NULL,   -- RFC 3339 UTC
    last_reviewed    TEXT             -- RFC 3339 UTC; NULL until first review
);

CREATE INDEX IF NOT EXISTS idx_papers_filter ON papers(subject_id, year);
CREATE INDEX IF NOT EXISTS idx_cards_review  ON flashcards(user_id, next_review_date);

PRAGMA user_version = 1;
";
