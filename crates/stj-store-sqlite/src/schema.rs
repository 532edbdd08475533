//! SQL schema for the STJ SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS cases (
    case_id             INTEGER PRIMARY KEY AUTOINCREMENT,
    registration_number TEXT NOT NULL UNIQUE,
    case_date           TEXT NOT NULL,   -- ISO 8601 calendar date
    jurisdiction        TEXT NOT NULL,
    inserted_at         TEXT NOT NULL    -- RFC 3339 UTC; server-assigned
);

-- Stages follow their case on re-keying and deletion.
CREATE TABLE IF NOT EXISTS stages (
    stage_id            INTEGER PRIMARY KEY AUTOINCREMENT,
    registration_number TEXT NOT NULL
                        REFERENCES cases(registration_number)
                        ON UPDATE CASCADE
                        ON DELETE CASCADE,
    text                TEXT NOT NULL CHECK (length(text) <= 4000),
    inserted_at         TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS stages_registration_idx ON stages(registration_number);

PRAGMA user_version = 1;
";
