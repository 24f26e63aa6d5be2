// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use lexdrill_core::ErrorReport;
use lexdrill_core::Fallible;
use lexdrill_core::KeyValueStore;
use lexdrill_core::MemoryStore;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;

/// A key-value medium in a SQLite database file.
pub struct SqliteStore {
    conn: Connection,
}

fn sql_error(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("Database error: {e}"))
}

impl SqliteStore {
    pub fn open(path: &Path) -> Fallible<Self> {
        log::debug!("Opening database at {}", path.display());
        let conn = Connection::open(path).map_err(sql_error)?;
        Self::init(conn)
    }

    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory().map_err(sql_error)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Fallible<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value BLOB NOT NULL)",
            [],
        )
        .map_err(sql_error)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Fallible<Option<Vec<u8>>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()
            .map_err(sql_error)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Fallible<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(sql_error)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Fallible<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(sql_error)?;
        Ok(())
    }
}

/// The database when it can be opened, otherwise an in-process store that
/// lasts until the command exits.
pub enum Medium {
    Sqlite(SqliteStore),
    Memory(MemoryStore),
}

impl Medium {
    pub fn open(path: &Path) -> Self {
        match SqliteStore::open(path) {
            Ok(store) => Medium::Sqlite(store),
            Err(e) => {
                log::warn!("{e}; review history will not be kept after this session");
                Medium::Memory(MemoryStore::new())
            }
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, Medium::Sqlite(_))
    }
}

impl KeyValueStore for Medium {
    fn get(&self, key: &str) -> Fallible<Option<Vec<u8>>> {
        match self {
            Medium::Sqlite(store) => store.get(key),
            Medium::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Fallible<()> {
        match self {
            Medium::Sqlite(store) => store.set(key, value),
            Medium::Memory(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Fallible<()> {
        match self {
            Medium::Sqlite(store) => store.remove(key),
            Medium::Memory(store) => store.remove(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use lexdrill_core::Quality;
    use lexdrill_core::ReviewStatStore;
    use lexdrill_core::ReviewStats;
    use lexdrill_core::Timestamp;
    use lexdrill_core::advance;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_get_set_remove() -> Fallible<()> {
        let mut store = SqliteStore::in_memory()?;
        assert_eq!(store.get("k")?, None);
        store.set("k", b"one")?;
        store.set("k", b"two")?;
        assert_eq!(store.get("k")?, Some(b"two".to_vec()));
        store.remove("k")?;
        assert_eq!(store.get("k")?, None);
        store.remove("k")?;
        Ok(())
    }

    #[test]
    fn test_stats_survive_reopen() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("lexdrill.db");
        let mut stats = ReviewStats::new();
        stats.insert(
            "hund".to_string(),
            advance(None, Quality::Good, Timestamp::from_millis(1_000)),
        );
        {
            let mut store = ReviewStatStore::new(SqliteStore::open(&path)?);
            store.save(&stats)?;
        }
        let store = ReviewStatStore::new(SqliteStore::open(&path)?);
        assert_eq!(store.load(), stats);
        Ok(())
    }

    #[test]
    fn test_unopenable_database_falls_back_to_memory() -> Fallible<()> {
        let dir = tempdir()?;
        let mut medium = Medium::open(&dir.path().join("no/such/dir/x.db"));
        assert!(!medium.is_persistent());
        medium.set("k", b"v")?;
        assert_eq!(medium.get("k")?, Some(b"v".to_vec()));
        Ok(())
    }

    #[test]
    fn test_openable_database_is_persistent() -> Fallible<()> {
        let dir = tempdir()?;
        let medium = Medium::open(&dir.path().join("lexdrill.db"));
        assert!(medium.is_persistent());
        Ok(())
    }
}
