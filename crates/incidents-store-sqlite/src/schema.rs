//! SQL schema for the incident store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS incidents (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    urgency     TEXT,            -- 'H' | 'M' | 'L'
    status      TEXT,            -- 'N' | 'A' | 'I' | 'H' | 'R' | 'C'
    customer_id TEXT             -- remote business partner id, not enforced
);

-- Cached projection of remote business partners.
-- Rows are only ever upserted; the processor never deletes them.
CREATE TABLE IF NOT EXISTS customers (
    id          TEXT PRIMARY KEY,
    first_name  TEXT,
    last_name   TEXT,
    name        TEXT,
    email       TEXT,
    phone       TEXT
);

CREATE INDEX IF NOT EXISTS incidents_customer_idx ON incidents(customer_id);

PRAGMA user_version = 1;
";
