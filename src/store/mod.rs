mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::{Ledger, Record};

/// Where a [`Ledger`] is loaded from and flushed to.
pub(crate) trait LedgerStore {
    fn load(&self) -> Result<Ledger>;
    fn save(&mut self, ledger: &Ledger) -> Result<()>;
}

/// String-keyed entries in a local SQLite file.
pub(crate) struct Store {
    conn: Connection,
}

impl Store {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open store: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set store pragmas")?;
        let mut store = Self { conn };
        store.migrate().context("Store migration failed")?;
        tracing::debug!(path = %path.display(), "opened store");
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }

    pub(crate) fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?)
    }

    #[cfg(test)]
    pub(crate) fn set(&self, key: &str, value: &str) -> Result<()> {
        upsert(&self.conn, key, value)
    }
}

impl LedgerStore for Store {
    fn load(&self) -> Result<Ledger> {
        let (raw_records, raw_balance) =
            (self.get(schema::RECORDS_KEY)?, self.get(schema::BALANCE_KEY)?);
        if raw_records.is_none() && raw_balance.is_none() {
            tracing::debug!("nothing saved yet; starting with an empty ledger");
            return Ok(Ledger::new());
        }
        let records = raw_records.map(|raw| decode_records(&raw)).unwrap_or_default();
        let balance = raw_balance.map_or(Decimal::ZERO, |raw| decode_balance(&raw));
        tracing::debug!(records = records.len(), %balance, "loaded ledger");
        Ok(Ledger::from_parts(records, balance))
    }

    fn save(&mut self, ledger: &Ledger) -> Result<()> {
        let records =
            serde_json::to_string(ledger.records()).context("Failed to encode records")?;
        let balance = ledger.balance().to_string();

        let tx = self.conn.transaction()?;
        for (key, value) in [
            (schema::RECORDS_KEY, records.as_str()),
            (schema::BALANCE_KEY, balance.as_str()),
        ] {
            upsert(&tx, key, value)?;
        }
        tx.commit().context("Failed to save ledger")?;
        tracing::debug!(records = ledger.len(), %balance, "saved ledger");
        Ok(())
    }
}

fn upsert(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Parse the stored record list. Anything unreadable yields an empty list.
pub(crate) fn decode_records(raw: &str) -> Vec<Record> {
    match serde_json::from_str(raw) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "stored records are malformed; starting with an empty list");
            Vec::new()
        }
    }
}

/// Parse the stored balance. Anything that is not a number (including a
/// stray `NaN`) resets to zero.
pub(crate) fn decode_balance(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or_else(|e| {
            tracing::warn!(value = trimmed, error = %e, "stored balance is not a number; resetting to zero");
            Decimal::ZERO
        })
}
