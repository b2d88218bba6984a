//! Persistent lookup store.
//!
//! Resolved searches are remembered keyed by the normalized title text
//! and the mask mode, so repeating a query skips the provider entirely.
//! The store is an optimization: callers treat every failure here as a
//! miss, never as a fatal error.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::KinodexError;
use crate::mask::MaskMode;
use crate::provider::TitleId;

const SCHEMA: &str = include_str!("../../../migrations/001_lookup.sql");

/// SQLite-backed store of past resolutions.
pub struct Lookup {
    conn: Connection,
}

impl Lookup {
    /// Open (or create) the database at the given path and run migrations.
    pub fn open(path: &Path) -> Result<Self, KinodexError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, KinodexError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Previously resolved id for this search, if any.
    pub fn recall(&self, search: &str, mask: MaskMode) -> Result<Option<TitleId>, KinodexError> {
        self.conn
            .query_row(
                "SELECT title_id FROM title_lookup WHERE search = ?1 AND mask = ?2",
                params![search, mask.as_db_int()],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map(|id| id.map(|id| TitleId(id as u64)))
            .map_err(Into::into)
    }

    /// Record the outcome of a resolution, replacing any earlier one.
    pub fn remember(
        &self,
        search: &str,
        mask: MaskMode,
        id: TitleId,
    ) -> Result<(), KinodexError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO title_lookup (search, mask, title_id, resolved_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                search,
                mask.as_db_int(),
                id.0 as i64,
                Utc::now().to_rfc3339(),
            ],
        )?;
        debug!(search, %id, "lookup stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recall_misses_on_fresh_store() {
        let store = Lookup::open_memory().unwrap();
        assert_eq!(store.recall("some title", MaskMode::None).unwrap(), None);
    }

    #[test]
    fn remember_then_recall_round_trips() {
        let store = Lookup::open_memory().unwrap();
        store
            .remember("some title 2003", MaskMode::Video, TitleId(364_569))
            .unwrap();
        assert_eq!(
            store.recall("some title 2003", MaskMode::Video).unwrap(),
            Some(TitleId(364_569))
        );
    }

    #[test]
    fn mask_mode_separates_entries() {
        let store = Lookup::open_memory().unwrap();
        store
            .remember("portal", MaskMode::VideoGame, TitleId(1_454_029))
            .unwrap();
        assert_eq!(store.recall("portal", MaskMode::Video).unwrap(), None);
        assert_eq!(store.recall("portal", MaskMode::None).unwrap(), None);
        assert_eq!(
            store.recall("portal", MaskMode::VideoGame).unwrap(),
            Some(TitleId(1_454_029))
        );
    }

    #[test]
    fn remember_overwrites_earlier_entry() {
        let store = Lookup::open_memory().unwrap();
        store
            .remember("old film", MaskMode::None, TitleId(1))
            .unwrap();
        store
            .remember("old film", MaskMode::None, TitleId(2))
            .unwrap();
        assert_eq!(
            store.recall("old film", MaskMode::None).unwrap(),
            Some(TitleId(2))
        );
    }

    #[test]
    fn open_creates_the_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lookup.db");
        {
            let store = Lookup::open(&path).unwrap();
            store
                .remember("some title", MaskMode::None, TitleId(99))
                .unwrap();
        }
        let store = Lookup::open(&path).unwrap();
        assert_eq!(
            store.recall("some title", MaskMode::None).unwrap(),
            Some(TitleId(99))
        );
    }
}
